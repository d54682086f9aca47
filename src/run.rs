//! Step orchestration
//!
//! Reads inputs, builds the request and performs the single PUT. Every
//! failure is returned as-is; the caller decides how to exit.

use crate::cmdb::http::{CmdbHttpClient, TransportOptions, DEFAULT_TIMEOUT};
use crate::cmdb::payload::ResourcePayload;
use crate::config::ActionConfig;
use crate::error::ActionError;
use crate::input::InputSource;
use crate::output::StepOutput;
use serde_json::Value;
use std::io::Write;
use std::time::Duration;

/// Name of the step output carrying the CMDB response
pub const RESULT_OUTPUT: &str = "result";

/// Process-level settings that are not action inputs
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub timeout: Duration,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Run the step end to end and return the CMDB response
pub async fn run<W: Write>(
    source: &dyn InputSource,
    options: &RunOptions,
    output: &mut StepOutput<W>,
) -> Result<Value, ActionError> {
    let config = ActionConfig::from_inputs(source)?;
    tracing::debug!("Resolved configuration: {:?}", config);

    if config.insecure_skip_tls_verify {
        tracing::warn!("Warning: TLS verification disabled (insecure_skip_tls_verify=true)");
    }

    if config.uses_plain_http() {
        tracing::warn!("Warning: enov8_url uses plain http; app-key will be sent unencrypted");
    }

    let url = config.target_url();
    let payload = ResourcePayload::new(&config.resource_name, &config.version, &config.status);

    tracing::info!("📡 PUT {}", url);
    tracing::info!("📦 Payload:\n{}", serde_json::to_string_pretty(&payload)?);

    let client = CmdbHttpClient::new(TransportOptions {
        timeout: options.timeout,
        insecure_skip_tls_verify: config.insecure_skip_tls_verify,
    })?;

    let result = client
        .put(&url, &config.auth_headers(), serde_json::to_string(&payload)?)
        .await?;

    tracing::info!("✅ Enov8 CMDB updated successfully.");
    output.set(RESULT_OUTPUT, &result)?;

    Ok(result)
}
