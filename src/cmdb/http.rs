//! HTTP client for the CMDB REST API

use crate::error::ActionError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde_json::Value;
use std::time::Duration;

/// Default bound on a single request, connect to last body byte
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(20_000);

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let cut = (0..=MAX_LOG_BODY_LENGTH)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| c.is_control(), "")
}

/// Transport settings fixed for the lifetime of one client
#[derive(Debug, Clone, Copy)]
pub struct TransportOptions {
    pub timeout: Duration,
    /// Accept self-signed or otherwise invalid server certificates.
    /// Applies to this client only.
    pub insecure_skip_tls_verify: bool,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            insecure_skip_tls_verify: false,
        }
    }
}

/// One outbound request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    /// Applied after `Content-Type: application/json`, so a caller value wins
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn put(body: String) -> Self {
        Self {
            method: Method::PUT,
            headers: Vec::new(),
            body: Some(body),
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

/// HTTP client wrapper for CMDB API calls
#[derive(Clone)]
pub struct CmdbHttpClient {
    client: Client,
    timeout: Duration,
}

impl CmdbHttpClient {
    /// Create a new HTTP client
    pub fn new(options: TransportOptions) -> Result<Self, ActionError> {
        let client = Client::builder()
            .user_agent(format!("enov8-cmdb-update/{}", crate::VERSION))
            .timeout(options.timeout)
            .danger_accept_invalid_certs(options.insecure_skip_tls_verify)
            .build()
            .map_err(ActionError::Transport)?;

        Ok(Self {
            client,
            timeout: options.timeout,
        })
    }

    /// Send one request and bucket the outcome by status.
    ///
    /// A 2xx response resolves to the parsed JSON body, or to the raw text as
    /// a JSON string when the body is not JSON. Anything else is an error;
    /// there are no retries.
    pub async fn send(&self, url: &str, request: HttpRequest) -> Result<Value, ActionError> {
        tracing::debug!("{} {}", request.method, url);

        let headers = merge_headers(&request.headers)?;
        let mut builder = self.client.request(request.method, url).headers(headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| self.classify(e))?;

        let status = response.status();
        let raw = response.text().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::debug!("CMDB error: {} - {}", status, sanitize_for_log(&raw));
            return Err(ActionError::HttpStatus {
                status: status.as_u16(),
                body: raw,
            });
        }

        tracing::debug!("CMDB response: {} - {}", status, sanitize_for_log(&raw));
        Ok(serde_json::from_str(&raw).unwrap_or(Value::String(raw)))
    }

    /// PUT a JSON document
    pub async fn put(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: String,
    ) -> Result<Value, ActionError> {
        let request = headers
            .iter()
            .fold(HttpRequest::put(body), |req, (name, value)| {
                req.header(name, value)
            });
        self.send(url, request).await
    }

    fn classify(&self, error: reqwest::Error) -> ActionError {
        if error.is_timeout() {
            ActionError::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else {
            ActionError::Transport(error)
        }
    }
}

/// `Content-Type: application/json` first, then caller headers on top
fn merge_headers(extra: &[(String, String)]) -> Result<HeaderMap, ActionError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    for (name, value) in extra {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            ActionError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            }
        })?;
        let value = HeaderValue::from_str(value).map_err(|e| ActionError::InvalidHeader {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        headers.insert(name, value);
    }

    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_headers_caller_wins() {
        let headers = merge_headers(&[
            ("app-id".to_string(), "svc".to_string()),
            ("Content-Type".to_string(), "application/merge-patch+json".to_string()),
        ])
        .unwrap();

        assert_eq!(headers.get("app-id").unwrap(), "svc");
        assert_eq!(
            headers.get(CONTENT_TYPE).unwrap(),
            "application/merge-patch+json"
        );
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn test_merge_headers_default_content_type() {
        let headers = merge_headers(&[]).unwrap();
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn test_merge_headers_rejects_bad_value() {
        let err = merge_headers(&[("app-key".to_string(), "line\nbreak".to_string())])
            .unwrap_err();
        assert!(matches!(err, ActionError::InvalidHeader { ref name, .. } if name == "app-key"));
    }

    #[test]
    fn test_sanitize_for_log_truncates() {
        let body = "x".repeat(500);
        let logged = sanitize_for_log(&body);
        assert!(logged.starts_with(&"x".repeat(MAX_LOG_BODY_LENGTH)));
        assert!(logged.contains("500 bytes total"));
    }

    #[test]
    fn test_sanitize_for_log_multibyte_boundary() {
        let body = "é".repeat(150);
        let logged = sanitize_for_log(&body);
        assert!(logged.contains("300 bytes total"));
    }

    #[test]
    fn test_client_builds_insecure() {
        let client = CmdbHttpClient::new(TransportOptions {
            timeout: Duration::from_millis(500),
            insecure_skip_tls_verify: true,
        });
        assert!(client.is_ok());
    }
}
