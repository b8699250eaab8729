//! Shared JSON-over-HTTP plumbing for the hosted and local backends.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::{ProviderError, ProviderResult, parse_api_error};

/// Token budget for every completion; answers are a short list of names.
pub const MAX_TOKENS: u32 = 50;

/// Sampling temperature for chat-style backends.
pub const TEMPERATURE: f32 = 0.7;

/// Send a prepared request and decode a JSON body.
///
/// Non-success statuses become [`ProviderError::Api`] with the best message
/// found in the error body.
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> ProviderResult<T> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::Api {
            status: status.as_u16(),
            message: parse_api_error(&body, status.as_u16()),
        });
    }
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Trim a trailing slash so `{base}/v1/...` joins cleanly.
pub(crate) fn normalize_base(base_url: &str, default: &str) -> String {
    let base = if base_url.trim().is_empty() {
        default
    } else {
        base_url.trim()
    };
    base.trim_end_matches('/').to_string()
}

/// Pick the configured model or the backend default.
pub(crate) fn model_or(model: &str, default: &str) -> String {
    if model.trim().is_empty() {
        default.to_string()
    } else {
        model.trim().to_string()
    }
}

pub(crate) fn millis(ms: u64) -> Duration {
    Duration::from_millis(ms)
}
