//! Rules first, then AI according to policy, then the fallback.

use namer_core::{FileContext, IdentifierKind, PromptContext, ProviderKind, SuggestionSet};
use namer_llm::{SharedProvider, build_providers};
use namer_rules::RuleEngine;
use namer_settings::{AiSettings, ProviderPolicy};
use serde::Serialize;
use tracing::{debug, info};

use crate::fallback::fallback_suggestions;

/// Outcome of one resolution, with provenance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionReport {
    /// Final ordered names. Never empty, never contains the original.
    pub suggestions: Vec<String>,
    /// How many came from the rule engine.
    pub rule_count: usize,
    /// Backend that contributed, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// How many AI names survived de-duplication.
    pub ai_count: usize,
    /// True when rules and AI were both empty.
    pub used_fallback: bool,
}

/// Combines the rule engine with configured AI backends.
///
/// Providers are consulted one at a time; the configuration is read-only
/// once constructed.
pub struct SuggestionOrchestrator {
    rules: RuleEngine,
    policy: ProviderPolicy,
    providers: Vec<SharedProvider>,
}

impl SuggestionOrchestrator {
    /// Build every backend from `settings`. Rules-only builds none.
    pub fn new(settings: &AiSettings) -> Self {
        let providers = if settings.provider == ProviderPolicy::Rules {
            Vec::new()
        } else {
            build_providers(settings)
        };
        Self::with_providers(settings.provider, providers)
    }

    /// Use explicit providers. Under `Auto` they are tried in the given order.
    pub fn with_providers(policy: ProviderPolicy, providers: Vec<SharedProvider>) -> Self {
        Self {
            rules: RuleEngine::new(),
            policy,
            providers,
        }
    }

    /// Active selection policy.
    pub fn policy(&self) -> ProviderPolicy {
        self.policy
    }

    /// Ordered suggestions for one identifier. Never empty.
    pub async fn get_suggestions(
        &self,
        original: &str,
        kind: IdentifierKind,
        context: &str,
        file: &FileContext,
    ) -> Vec<String> {
        self.resolve(original, kind, context, file).await.suggestions
    }

    /// Like [`Self::get_suggestions`] but reports where names came from.
    pub async fn resolve(
        &self,
        original: &str,
        kind: IdentifierKind,
        context: &str,
        file: &FileContext,
    ) -> SuggestionReport {
        let mut combined = self.rules.suggest(original, kind, context, file);
        let rule_count = combined.len();
        debug!(original, rule_count, "rule suggestions");

        let (provider, ai) = match self.policy {
            ProviderPolicy::Rules => (None, None),
            ProviderPolicy::Single(wanted) => {
                let prompt = PromptContext::new(original, kind, context, file.clone());
                self.try_single(wanted, &prompt).await
            }
            ProviderPolicy::Auto => {
                let prompt = PromptContext::new(original, kind, context, file.clone());
                self.try_in_order(&prompt).await
            }
        };

        let ai_count = ai.map_or(0, |names| {
            let before = combined.len();
            combined.extend(names.into_vec());
            combined.len() - before
        });

        let used_fallback = combined.is_empty();
        if used_fallback {
            debug!(original, %kind, "no rule or AI suggestions, using fallback");
            combined = fallback_suggestions(original, kind);
        }

        SuggestionReport {
            suggestions: combined.into_vec(),
            rule_count,
            provider,
            ai_count,
            used_fallback,
        }
    }

    async fn try_single(
        &self,
        wanted: ProviderKind,
        prompt: &PromptContext,
    ) -> (Option<String>, Option<SuggestionSet>) {
        let Some(provider) = self.providers.iter().find(|p| p.kind() == wanted) else {
            info!(provider = %wanted, "provider not configured");
            return (None, None);
        };
        if !provider.is_available().await {
            info!(provider = %wanted, "provider not available");
            return (None, None);
        }
        let response = provider.get_suggestions(prompt).await;
        if response.suggestions.is_empty() {
            return (None, None);
        }
        info!(provider = %wanted, count = response.suggestions.len(), "AI suggestions obtained");
        (response.provider, Some(response.suggestions))
    }

    async fn try_in_order(
        &self,
        prompt: &PromptContext,
    ) -> (Option<String>, Option<SuggestionSet>) {
        for provider in &self.providers {
            let kind = provider.kind();
            if !provider.is_available().await {
                debug!(provider = %kind, "skipping unavailable provider");
                continue;
            }
            debug!(provider = %kind, "trying provider");
            let response = provider.get_suggestions(prompt).await;
            if !response.suggestions.is_empty() {
                info!(
                    provider = %kind,
                    count = response.suggestions.len(),
                    "AI suggestions obtained"
                );
                return (response.provider, Some(response.suggestions));
            }
        }
        info!("no AI provider produced suggestions, using rules only");
        (None, None)
    }
}
