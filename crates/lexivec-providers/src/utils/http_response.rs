//! HTTP Response Utilities
//!
//! Shared response handling for the API providers (embedding, article
//! source). The search-engine gateway does its own status handling
//! because it translates specific engine statuses into typed errors.

use lexivec_domain::error::{Error, Result};
use reqwest::Response;

/// Check response status and parse the body as JSON.
///
/// # Arguments
/// * `response` - The HTTP response to check
/// * `provider_name` - Provider label used in error messages
/// * `to_error` - Constructor for the provider's error kind
///
/// # Returns
/// Parsed JSON value on success, or the provider's error kind carrying
/// the status code and response text.
pub async fn check_and_parse(
    response: Response,
    provider_name: &str,
    to_error: fn(String) -> Error,
) -> Result<serde_json::Value> {
    let status = response.status();

    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        return Err(to_error(format!(
            "{} request failed ({}): {}",
            provider_name,
            status.as_u16(),
            error_text
        )));
    }

    response.json().await.map_err(|e| {
        to_error(format!(
            "{} response parse failed: {}",
            provider_name, e
        ))
    })
}
