//! Request body sent to the CMDB

use serde::Serialize;

/// Body of the PUT request. Optional fields are omitted entirely when empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourcePayload {
    #[serde(rename = "Resource Name")]
    pub resource_name: String,
    #[serde(rename = "Version", skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(rename = "Status", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ResourcePayload {
    pub fn new(resource_name: &str, version: &str, status: &str) -> Self {
        Self {
            resource_name: resource_name.to_string(),
            version: non_empty(version),
            status: non_empty(status),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_only() {
        let payload = ResourcePayload::new("OrderService", "", "");
        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"Resource Name":"OrderService"}"#
        );
    }

    #[test]
    fn test_all_fields_in_order() {
        let payload = ResourcePayload::new("billing-db", "2024.1", "Deployed");
        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"Resource Name":"billing-db","Version":"2024.1","Status":"Deployed"}"#
        );
    }

    #[test]
    fn test_status_without_version() {
        let payload = ResourcePayload::new("gateway", "", "Offline");
        assert_eq!(payload.version, None);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({"Resource Name": "gateway", "Status": "Offline"})
        );
    }
}
