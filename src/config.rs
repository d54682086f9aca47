//! Step configuration
//!
//! Turns raw action inputs into a validated [`ActionConfig`]. Reading stops
//! at the first missing or invalid value.

use crate::cmdb::resource::{endpoint_url, ResourceType};
use crate::error::ActionError;
use crate::input::{get_input, parse_bool, InputOptions, InputSource};
use std::fmt;
use url::Url;

/// Validated inputs for one run
#[derive(Clone, PartialEq, Eq)]
pub struct ActionConfig {
    pub resource_type: ResourceType,
    pub resource_name: String,
    pub include_version: bool,
    pub include_status: bool,
    /// Empty when not supplied
    pub version: String,
    /// Empty when not supplied
    pub status: String,
    pub app_id: String,
    pub app_key: String,
    /// CMDB base URL without trailing slashes
    pub base_url: String,
    pub insecure_skip_tls_verify: bool,
}

impl ActionConfig {
    /// Read and validate all inputs
    pub fn from_inputs(source: &dyn InputSource) -> Result<Self, ActionError> {
        let resource_type = get_input(source, "resourceType", InputOptions::required())?;
        let resource_name = get_input(source, "resourceName", InputOptions::required())?;

        let include_version = read_flag(source, "includeVersion")?;
        let include_status = read_flag(source, "includeStatus")?;

        let version = get_input(source, "version", InputOptions::required_if(include_version))?;
        let status = get_input(source, "status", InputOptions::required_if(include_status))?;

        let app_id = get_input(source, "app_id", InputOptions::required())?;
        let app_key = get_input(source, "app_key", InputOptions::required())?;
        let base_url = strip_trailing_slashes(&get_input(
            source,
            "enov8_url",
            InputOptions::required(),
        )?);

        let insecure_skip_tls_verify = read_flag(source, "insecure_skip_tls_verify")?;

        let resource_type = resource_type.parse::<ResourceType>()?;
        validate_base_url(&base_url)?;

        Ok(Self {
            resource_type,
            resource_name,
            include_version,
            include_status,
            version,
            status,
            app_id,
            app_key,
            base_url,
            insecure_skip_tls_verify,
        })
    }

    /// Full URL of the endpoint for the configured resource type
    pub fn target_url(&self) -> String {
        endpoint_url(&self.base_url, self.resource_type)
    }

    /// True when the base URL is plain `http`, so credentials travel unencrypted
    pub fn uses_plain_http(&self) -> bool {
        self.base_url
            .get(..7)
            .is_some_and(|scheme| scheme.eq_ignore_ascii_case("http://"))
    }

    /// Authentication headers expected by the CMDB
    pub fn auth_headers(&self) -> [(&str, &str); 3] {
        [
            ("user-id", self.app_id.as_str()),
            ("app-id", self.app_id.as_str()),
            ("app-key", self.app_key.as_str()),
        ]
    }
}

// Security: app_key stays out of Debug output so it never reaches the logs
impl fmt::Debug for ActionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionConfig")
            .field("resource_type", &self.resource_type)
            .field("resource_name", &self.resource_name)
            .field("include_version", &self.include_version)
            .field("include_status", &self.include_status)
            .field("version", &self.version)
            .field("status", &self.status)
            .field("app_id", &self.app_id)
            .field("app_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("insecure_skip_tls_verify", &self.insecure_skip_tls_verify)
            .finish()
    }
}

fn read_flag(source: &dyn InputSource, name: &str) -> Result<bool, ActionError> {
    let raw = get_input(source, name, InputOptions::with_default("false"))?;
    Ok(parse_bool(raw.as_str(), false))
}

/// `https://cmdb.example.com//` -> `https://cmdb.example.com`
pub fn strip_trailing_slashes(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

fn validate_base_url(base_url: &str) -> Result<(), ActionError> {
    let invalid = |reason: String| ActionError::InvalidUrl {
        url: base_url.to_string(),
        reason,
    };

    let parsed = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "https" | "http" => {}
        other => return Err(invalid(format!("unsupported scheme '{}'", other))),
    }
    if parsed.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }

    Ok(())
}
