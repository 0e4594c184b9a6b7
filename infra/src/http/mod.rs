//! Shared HTTP plumbing for the gateway and backend clients.

use std::time::Duration;

use reqwest::Response;

use crate::InfrastructureError;

/// Build a reqwest client with the configured request timeout
pub fn build_client(timeout_secs: u64) -> Result<reqwest::Client, InfrastructureError> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()?)
}

/// Whether a transport error means no HTTP response was received at all
pub fn is_network_error(err: &reqwest::Error) -> bool {
    err.is_connect() || err.is_timeout()
}

/// Extract a human-readable message from an error response body.
///
/// Non-2xx bodies are parsed as JSON looking for a `message` or `error`
/// field; anything else falls back to a generic message with the status.
pub async fn response_error_message(response: Response) -> String {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    parse_error_body(&body).unwrap_or_else(|| format!("HTTP {status}"))
}

/// Pull `message`/`error` out of a JSON error body, if present
pub fn parse_error_body(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .or_else(|| value.get("error"))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}
