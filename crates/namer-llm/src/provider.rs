//! # Provider Trait
//!
//! Every backend implements [`SuggestionProvider`]. Backends only differ in
//! transport: they supply [`complete`](SuggestionProvider::complete) and
//! inherit prompt building, response parsing and error containment.

use async_trait::async_trait;
use namer_core::{PromptContext, ProviderKind, ProviderResponse};
use tracing::debug;

use crate::error::ProviderResult;
use crate::prompt;

/// A source of AI-generated name suggestions.
///
/// Implementors must be `Send + Sync` so the orchestrator can hold them
/// behind `Arc<dyn SuggestionProvider>`.
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Which backend this is.
    fn kind(&self) -> ProviderKind;

    /// Name reported in [`ProviderResponse::provider`].
    fn label(&self) -> &str {
        self.kind().label()
    }

    /// Cheap readiness check. Never fails; bounded by a short timeout.
    async fn is_available(&self) -> bool;

    /// Instruction text sent to the backend.
    fn build_prompt(&self, ctx: &PromptContext) -> String {
        prompt::build_prompt(ctx)
    }

    /// Send `prompt` and return the raw answer text.
    async fn complete(&self, prompt: &str) -> ProviderResult<String>;

    /// Ask for names. Never fails: errors are logged and become an empty response.
    async fn get_suggestions(&self, ctx: &PromptContext) -> ProviderResponse {
        let prompt = self.build_prompt(ctx);
        match self.complete(&prompt).await {
            Ok(text) => {
                let suggestions = prompt::parse_suggestions(&text, &ctx.original);
                debug!(
                    provider = %self.kind(),
                    original = %ctx.original,
                    count = suggestions.len(),
                    "provider answered"
                );
                ProviderResponse::from_provider(suggestions, self.label())
            }
            Err(error) => {
                debug!(
                    provider = %self.kind(),
                    original = %ctx.original,
                    category = error.category(),
                    %error,
                    "provider request failed"
                );
                ProviderResponse::empty(&ctx.original)
            }
        }
    }
}
