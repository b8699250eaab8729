//! Google Gemini `generateContent` backend.

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
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

/// `POST {base}/v1beta/models/{model}:generateContent` with `x-goog-api-key`.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: Option<ApiKey>,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl GeminiProvider {
    /// Build from settings; an empty key leaves the provider unavailable.
    pub fn new(settings: &HostedProviderSettings) -> Self {
        let base_url = normalize_base(&settings.base_url, DEFAULT_BASE_URL);
        let model = model_or(&settings.model, DEFAULT_MODEL);
        debug!(%model, %base_url, "Gemini provider configured");
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

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl SuggestionProvider for GeminiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    async fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(&self, prompt: &str) -> ProviderResult<String> {
        let key = self.api_key.as_ref().ok_or(ProviderError::MissingApiKey {
            provider: "gemini",
        })?;
        let body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: MAX_TOKENS,
                temperature: TEMPERATURE,
            },
        };
        let request = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", key.expose())
            .timeout(self.timeout)
            .json(&body);

        let response: GenerateResponse = send_json(request).await?;
        response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
            .ok_or_else(|| ProviderError::malformed("no candidates[0].content.parts text"))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use namer_core::{FileContext, IdentifierKind, PromptContext};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn settings(base_url: &str) -> HostedProviderSettings {
        HostedProviderSettings {
            api_key: "g-key".into(),
            model: String::new(),
            base_url: base_url.into(),
            timeout_ms: 2_000,
        }
    }

    #[test]
    fn endpoint_embeds_model() {
        let provider = GeminiProvider::new(&settings(""));
        assert_eq!(
            provider.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn parses_candidate_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
            .and(header("x-goog-api-key", "g-key"))
            .and(body_partial_json(json!({"generationConfig": {"maxOutputTokens": 50}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": [{"text": "counter, index"}], "role": "model"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = GeminiProvider::new(&settings(&server.uri()));
        let ctx = PromptContext::new("cnt", IdentifierKind::Variable, "", FileContext::default());
        let response = provider.get_suggestions(&ctx).await;
        assert_eq!(response.suggestions.into_vec(), ["counter", "index"]);
    }

    #[tokio::test]
    async fn blocked_prompt_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "promptFeedback": {"blockReason": "SAFETY"}
            })))
            .mount(&server)
            .await;

        let provider = GeminiProvider::new(&settings(&server.uri()));
        assert_matches!(provider.complete("p").await, Err(ProviderError::Malformed { .. }));
    }

    #[tokio::test]
    async fn invalid_json_body_is_json_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let provider = GeminiProvider::new(&settings(&server.uri()));
        assert_matches!(provider.complete("p").await, Err(ProviderError::Json(_)));
    }
}
