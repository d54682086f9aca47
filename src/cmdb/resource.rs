//! Resource types and their CMDB endpoints
//!
//! The endpoint map is fixed at compile time: each label the pipeline can
//! send resolves to exactly one API path segment.

use crate::error::ActionError;
use std::fmt;
use std::str::FromStr;

/// Category of the entity being recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    EnvironmentInstance,
    SystemComponent,
    SystemInterface,
}

impl ResourceType {
    /// All supported types, in the order they are listed to operators
    pub const ALL: [ResourceType; 3] = [
        ResourceType::EnvironmentInstance,
        ResourceType::SystemComponent,
        ResourceType::SystemInterface,
    ];

    /// Label as written in the pipeline input
    pub fn label(self) -> &'static str {
        match self {
            ResourceType::EnvironmentInstance => "Environment Instance",
            ResourceType::SystemComponent => "System Component",
            ResourceType::SystemInterface => "System Interface",
        }
    }

    /// Path segment under `/api/`
    pub fn api_path(self) -> &'static str {
        match self {
            ResourceType::EnvironmentInstance => "SystemInstance",
            ResourceType::SystemComponent => "SystemComponent",
            ResourceType::SystemInterface => "SystemInterface",
        }
    }

    /// Allowed labels joined for error messages
    pub fn allowed_labels() -> String {
        Self::ALL
            .iter()
            .map(|t| t.label())
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

impl FromStr for ResourceType {
    type Err = ActionError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.label() == label)
            .ok_or_else(|| ActionError::UnsupportedResourceType {
                given: label.to_string(),
                allowed: Self::allowed_labels(),
            })
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Resolve a resource-type label to its API path segment
pub fn resolve_api_path(label: &str) -> Result<&'static str, ActionError> {
    label.parse::<ResourceType>().map(ResourceType::api_path)
}

/// Build `{base_url}/api/{segment}`; `base_url` must already be free of
/// trailing slashes
pub fn endpoint_url(base_url: &str, resource_type: ResourceType) -> String {
    format!("{}/api/{}", base_url, resource_type.api_path())
}
