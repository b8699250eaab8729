//! Anthropic messages backend.

use std::time::Duration;

use async_trait::async_trait;
use namer_core::ProviderKind;
use namer_settings::HostedProviderSettings;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ProviderError, ProviderResult};
use crate::http::{MAX_TOKENS, millis, model_or, normalize_base, send_json};
use crate::provider::SuggestionProvider;
use crate::security::ApiKey;

/// Public API origin.
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "claude-3-5-haiku-latest";
/// Value of the `anthropic-version` header.
pub const API_VERSION: &str = "2023-06-01";

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [UserMessage<'a>; 1],
}

#[derive(Serialize)]
struct UserMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

/// `POST {base}/v1/messages` with `x-api-key`.
pub struct AnthropicProvider {
    client: reqwest::Client,
    api_key: Option<ApiKey>,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl AnthropicProvider {
    /// Build from settings; an empty key leaves the provider unavailable.
    pub fn new(settings: &HostedProviderSettings) -> Self {
        let base_url = normalize_base(&settings.base_url, DEFAULT_BASE_URL);
        let model = model_or(&settings.model, DEFAULT_MODEL);
        debug!(%model, %base_url, "Anthropic provider configured");
        Self {
            client: reqwest::Client::new(),
            api_key: ApiKey::from_config(&settings.api_key),
            model,
            base_url,
            timeout: millis(settings.timeout_ms),
        }
    }

    /// Effective model id.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl SuggestionProvider for AnthropicProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    async fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(&self, prompt: &str) -> ProviderResult<String> {
        let key = self.api_key.as_ref().ok_or(ProviderError::MissingApiKey {
            provider: "anthropic",
        })?;
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            messages: [UserMessage {
                role: "user",
                content: prompt,
            }],
        };
        let request = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", key.expose())
            .header("anthropic-version", API_VERSION)
            .timeout(self.timeout)
            .json(&body);

        let response: MessagesResponse = send_json(request).await?;
        response
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text)
            .ok_or_else(|| ProviderError::malformed("no text content block"))
    }
}
