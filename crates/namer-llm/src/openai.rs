//! `OpenAI` chat completions backend.

use std::time::Duration;

use async_trait::async_trait;
use namer_core::ProviderKind;
use namer_settings::HostedProviderSettings;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ProviderError, ProviderResult};
use crate::http::{MAX_TOKENS, TEMPERATURE, millis, model_or, normalize_base, send_json};
use crate::provider::SuggestionProvider;
use crate::security::ApiKey;

/// Public API origin.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

const SYSTEM_PROMPT: &str =
    "You are an expert in naming conventions for JavaScript and TypeScript code.";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// `POST {base}/v1/chat/completions` with bearer auth.
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: Option<ApiKey>,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl OpenAiProvider {
    /// Build from settings; an empty key leaves the provider unavailable.
    pub fn new(settings: &HostedProviderSettings) -> Self {
        let base_url = normalize_base(&settings.base_url, DEFAULT_BASE_URL);
        let model = model_or(&settings.model, DEFAULT_MODEL);
        debug!(%model, %base_url, "OpenAI provider configured");
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
impl SuggestionProvider for OpenAiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    async fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(&self, prompt: &str) -> ProviderResult<String> {
        let key = self.api_key.as_ref().ok_or(ProviderError::MissingApiKey {
            provider: "openai",
        })?;
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };
        let request = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(key.expose())
            .timeout(self.timeout)
            .json(&body);

        let response: ChatResponse = send_json(request).await?;
        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::malformed("no choices[0].message.content"))
    }
}
