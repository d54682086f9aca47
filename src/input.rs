//! Action inputs
//!
//! Inputs reach the step as `INPUT_<NAME>` environment variables. The lookup
//! goes through [`InputSource`] so tests can supply a plain map instead of
//! mutating the process environment.

use crate::error::ActionError;
use std::collections::HashMap;

/// Values treated as `true` by [`parse_bool`] (after trim + lowercase)
const TRUTHY: &[&str] = &["1", "true", "yes", "on"];

/// Where raw input values come from
pub trait InputSource {
    /// Raw value stored under an environment-style key such as `INPUT_APP_ID`
    fn raw(&self, key: &str) -> Option<String>;
}

/// Reads inputs from the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSource;

impl InputSource for EnvSource {
    fn raw(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl InputSource for HashMap<String, String> {
    fn raw(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Options for [`get_input`]
#[derive(Debug, Clone, Copy, Default)]
pub struct InputOptions<'a> {
    pub required: bool,
    pub default_value: &'a str,
}

impl<'a> InputOptions<'a> {
    pub fn required() -> Self {
        Self {
            required: true,
            default_value: "",
        }
    }

    pub fn required_if(required: bool) -> Self {
        Self {
            required,
            default_value: "",
        }
    }

    pub fn with_default(default_value: &'a str) -> Self {
        Self {
            required: false,
            default_value,
        }
    }
}

/// Environment key for a logical input name (`app_id` -> `INPUT_APP_ID`)
pub fn input_env_key(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

/// Read a trimmed input value.
///
/// Blank and absent values resolve to `options.default_value`, unless the
/// input is required, in which case the run fails naming the input.
pub fn get_input(
    source: &dyn InputSource,
    name: &str,
    options: InputOptions<'_>,
) -> Result<String, ActionError> {
    let raw = source.raw(&input_env_key(name)).unwrap_or_default();
    let value = raw.trim();

    if value.is_empty() {
        if options.required {
            return Err(ActionError::MissingRequiredInput(name.to_string()));
        }
        return Ok(options.default_value.to_string());
    }

    Ok(value.to_string())
}

/// Parse a millisecond timeout. Blank means `default_ms`, like any other
/// unset input.
pub fn parse_timeout_ms(raw: &str, default_ms: u64) -> Result<u64, String> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(default_ms);
    }
    value
        .parse::<u64>()
        .map_err(|e| format!("invalid timeout '{}': {}", value, e))
}

/// Anything that can be read as an on/off flag
pub trait FlagValue {
    fn to_flag(&self, default: bool) -> bool;
}

impl FlagValue for bool {
    fn to_flag(&self, _default: bool) -> bool {
        *self
    }
}

impl FlagValue for str {
    fn to_flag(&self, default: bool) -> bool {
        let normalized = self.trim().to_lowercase();
        if TRUTHY.contains(&normalized.as_str()) {
            true
        } else {
            default
        }
    }
}

impl FlagValue for String {
    fn to_flag(&self, default: bool) -> bool {
        self.as_str().to_flag(default)
    }
}

impl<T: FlagValue> FlagValue for Option<T> {
    fn to_flag(&self, default: bool) -> bool {
        match self {
            Some(value) => value.to_flag(default),
            None => default,
        }
    }
}

/// Normalize a truthy value (`1`, `true`, `yes`, `on`, any case) to `true`.
/// Booleans pass through unchanged; everything else yields `default`.
pub fn parse_bool<V: FlagValue + ?Sized>(value: &V, default: bool) -> bool {
    value.to_flag(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(name, value)| (input_env_key(name), value.to_string()))
            .collect()
    }

    #[test]
    fn test_input_env_key() {
        assert_eq!(input_env_key("resourceType"), "INPUT_RESOURCETYPE");
        assert_eq!(input_env_key("app_id"), "INPUT_APP_ID");
        assert_eq!(input_env_key("my input"), "INPUT_MY_INPUT");
    }

    #[test]
    fn test_get_input_trims() {
        let inputs = source(&[("resourceName", "  OrderService \n")]);
        let value = get_input(&inputs, "resourceName", InputOptions::required()).unwrap();
        assert_eq!(value, "OrderService");
    }

    #[test]
    fn test_get_input_required_blank_fails() {
        let inputs = source(&[("app_key", "   ")]);
        let err = get_input(&inputs, "app_key", InputOptions::required()).unwrap_err();
        assert!(matches!(err, ActionError::MissingRequiredInput(ref name) if name == "app_key"));

        let err = get_input(&inputs, "app_id", InputOptions::required()).unwrap_err();
        assert_eq!(err.to_string(), "Input required and not supplied: app_id");
    }

    #[test]
    fn test_get_input_default() {
        let inputs = source(&[("includeStatus", "")]);
        let value =
            get_input(&inputs, "includeStatus", InputOptions::with_default("false")).unwrap();
        assert_eq!(value, "false");

        let value = get_input(&inputs, "status", InputOptions::required_if(false)).unwrap();
        assert_eq!(value, "");
    }

    #[test]
    fn test_parse_timeout_ms() {
        assert_eq!(parse_timeout_ms("", 20_000), Ok(20_000));
        assert_eq!(parse_timeout_ms("  ", 20_000), Ok(20_000));
        assert_eq!(parse_timeout_ms(" 1500 ", 20_000), Ok(1500));
        assert!(parse_timeout_ms("soon", 20_000).is_err());
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("TRUE", false));
        assert!(parse_bool(" yes ", false));
        assert!(parse_bool("On", false));
        assert!(parse_bool("1", false));
        assert!(!parse_bool("no", false));
        assert!(!parse_bool("", false));
        assert!(parse_bool("", true));
        assert!(parse_bool(&true, false));
        assert!(!parse_bool(&false, true));
        assert!(!parse_bool(&None::<String>, false));
        assert!(parse_bool(&Some("true".to_string()), false));
    }
}
