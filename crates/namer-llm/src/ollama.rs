//! Local Ollama server backend.

use std::time::Duration;

use async_trait::async_trait;
use namer_core::ProviderKind;
use namer_settings::LocalServerSettings;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ProviderError, ProviderResult};
use crate::http::{millis, model_or, send_json};
use crate::provider::SuggestionProvider;

/// Default `generate` endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434/api/generate";
/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "llama3";

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: Option<String>,
}

/// `POST {endpoint}` non-streaming; availability probes the sibling `/tags`.
pub struct OllamaProvider {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    timeout: Duration,
    probe_timeout: Duration,
}

impl OllamaProvider {
    /// Build from settings.
    pub fn new(settings: &LocalServerSettings) -> Self {
        let endpoint = if settings.endpoint.trim().is_empty() {
            DEFAULT_ENDPOINT.to_string()
        } else {
            settings.endpoint.trim().to_string()
        };
        let model = model_or(&settings.model, DEFAULT_MODEL);
        debug!(%model, %endpoint, "Ollama provider configured");
        Self {
            client: reqwest::Client::new(),
            endpoint,
            model,
            timeout: millis(settings.timeout_ms),
            probe_timeout: millis(settings.probe_timeout_ms),
        }
    }

    /// Model-listing URL derived from the generate endpoint.
    pub fn tags_url(&self) -> String {
        tags_url(&self.endpoint)
    }
}

/// `…/api/generate` → `…/api/tags`; otherwise `{endpoint}/api/tags`.
pub fn tags_url(endpoint: &str) -> String {
    if endpoint.contains("/generate") {
        endpoint.replacen("/generate", "/tags", 1)
    } else {
        format!("{}/api/tags", endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl SuggestionProvider for OllamaProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Ollama
    }

    async fn is_available(&self) -> bool {
        let probe = self
            .client
            .get(self.tags_url())
            .timeout(self.probe_timeout)
            .send()
            .await;
        match probe {
            Ok(response) => response.status().is_success(),
            Err(error) => {
                debug!(endpoint = %self.endpoint, %error, "Ollama not reachable");
                false
            }
        }
    }

    async fn complete(&self, prompt: &str) -> ProviderResult<String> {
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };
        let request = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(&body);

        let response: GenerateResponse = send_json(request).await?;
        response
            .response
            .ok_or_else(|| ProviderError::malformed("no response field"))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use namer_core::{FileContext, IdentifierKind, PromptContext};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn settings(endpoint: &str) -> LocalServerSettings {
        LocalServerSettings {
            endpoint: endpoint.into(),
            model: "codellama".into(),
            timeout_ms: 2_000,
            probe_timeout_ms: 500,
        }
    }

    #[test]
    fn tags_url_variants() {
        assert_eq!(tags_url(DEFAULT_ENDPOINT), "http://localhost:11434/api/tags");
        assert_eq!(tags_url("http://box:11434/"), "http://box:11434/api/tags");
    }

    #[test]
    fn empty_endpoint_uses_default() {
        let provider = OllamaProvider::new(&settings(""));
        assert_eq!(provider.endpoint, DEFAULT_ENDPOINT);
    }

    #[tokio::test]
    async fn available_when_tags_answers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"models": []})))
            .expect(1)
            .mount(&server)
            .await;

        let provider = OllamaProvider::new(&settings(&format!("{}/api/generate", server.uri())));
        assert!(provider.is_available().await);
    }

    #[tokio::test]
    async fn unavailable_when_probe_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let provider = OllamaProvider::new(&settings(&format!("{}/api/generate", server.uri())));
        assert!(!provider.is_available().await);
    }

    #[tokio::test]
    async fn unavailable_when_nothing_listens() {
        let provider = OllamaProvider::new(&settings("http://127.0.0.1:1/api/generate"));
        assert!(!provider.is_available().await);
    }

    #[tokio::test]
    async fn generate_non_streaming() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_json(json!({
                "model": "codellama",
                "prompt": "p",
                "stream": false
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "codellama",
                "response": "isVisible, shown",
                "done": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = OllamaProvider::new(&settings(&format!("{}/api/generate", server.uri())));
        assert_eq!(provider.complete("p").await.unwrap(), "isVisible, shown");
    }

    #[tokio::test]
    async fn slow_server_times_out_to_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"response": "late"}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let mut cfg = settings(&format!("{}/api/generate", server.uri()));
        cfg.timeout_ms = 50;
        let provider = OllamaProvider::new(&cfg);
        assert_matches!(
            provider.complete("p").await,
            Err(ProviderError::Http(ref e)) if e.is_timeout()
        );

        let ctx = PromptContext::new("flag", IdentifierKind::Variable, "", FileContext::default());
        assert!(provider.get_suggestions(&ctx).await.suggestions.is_empty());
    }
}
