//! Construct concrete providers from settings.

use std::sync::Arc;

use namer_core::ProviderKind;
use namer_settings::AiSettings;

use crate::anthropic::AnthropicProvider;
use crate::copilot::CopilotProvider;
use crate::gemini::GeminiProvider;
use crate::ollama::OllamaProvider;
use crate::openai::OpenAiProvider;
use crate::provider::SuggestionProvider;

/// Shared handle used by the orchestrator.
pub type SharedProvider = Arc<dyn SuggestionProvider>;

/// One backend configured from `settings`.
pub fn build_provider(kind: ProviderKind, settings: &AiSettings) -> SharedProvider {
    match kind {
        ProviderKind::Copilot => Arc::new(CopilotProvider::new(&settings.copilot)),
        ProviderKind::OpenAi => Arc::new(OpenAiProvider::new(&settings.openai)),
        ProviderKind::Anthropic => Arc::new(AnthropicProvider::new(&settings.anthropic)),
        ProviderKind::Gemini => Arc::new(GeminiProvider::new(&settings.gemini)),
        ProviderKind::Ollama => Arc::new(OllamaProvider::new(&settings.ollama)),
    }
}

/// Every backend, in auto-fallback priority order.
pub fn build_providers(settings: &AiSettings) -> Vec<SharedProvider> {
    ProviderKind::AUTO_ORDER
        .into_iter()
        .map(|kind| build_provider(kind, settings))
        .collect()
}
