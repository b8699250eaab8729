//! Settings types.
//!
//! All structs use `#[serde(default)]` so a partial config file only needs
//! the keys it changes. Empty strings mean "use the backend's default".

use std::fmt;
use std::str::FromStr;

use namer_core::ProviderKind;
use serde::{Deserialize, Serialize};

use crate::errors::SettingsError;

/// Which suggestion source the orchestrator consults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ProviderPolicy {
    /// Try every backend in priority order, falling back to rules.
    Auto,
    /// Never call a backend.
    #[default]
    Rules,
    /// Only the named backend, falling back to rules.
    Single(ProviderKind),
}

impl ProviderPolicy {
    /// Config name (`"auto"`, `"rules"`, or a provider name).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Rules => "rules",
            Self::Single(kind) => kind.as_str(),
        }
    }
}

impl fmt::Display for ProviderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderPolicy {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "rules" | "" => Ok(Self::Rules),
            other => other
                .parse::<ProviderKind>()
                .map(Self::Single)
                .map_err(|e| SettingsError::InvalidValue(e.to_string())),
        }
    }
}

impl TryFrom<String> for ProviderPolicy {
    type Error = SettingsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ProviderPolicy> for String {
    fn from(policy: ProviderPolicy) -> Self {
        policy.as_str().to_string()
    }
}

/// Root settings object, mirrors `.ai-config.json`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AiSettings {
    /// Selection policy.
    pub provider: ProviderPolicy,
    /// `gh copilot` subprocess.
    pub copilot: CliAssistantSettings,
    /// `OpenAI` chat completions.
    pub openai: HostedProviderSettings,
    /// Anthropic messages.
    pub anthropic: HostedProviderSettings,
    /// Gemini `generateContent`.
    pub gemini: HostedProviderSettings,
    /// Local Ollama server.
    pub ollama: LocalServerSettings,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            provider: ProviderPolicy::default(),
            copilot: CliAssistantSettings::default(),
            openai: HostedProviderSettings::with_model("gpt-4o-mini"),
            anthropic: HostedProviderSettings::with_model("claude-3-5-haiku-latest"),
            gemini: HostedProviderSettings::with_model("gemini-1.5-flash"),
            ollama: LocalServerSettings::default(),
        }
    }
}

impl AiSettings {
    /// Settings for one hosted backend; `None` for copilot and ollama.
    pub fn hosted(&self, kind: ProviderKind) -> Option<&HostedProviderSettings> {
        match kind {
            ProviderKind::OpenAi => Some(&self.openai),
            ProviderKind::Anthropic => Some(&self.anthropic),
            ProviderKind::Gemini => Some(&self.gemini),
            ProviderKind::Copilot | ProviderKind::Ollama => None,
        }
    }

    /// Mutable variant of [`Self::hosted`].
    pub fn hosted_mut(&mut self, kind: ProviderKind) -> Option<&mut HostedProviderSettings> {
        match kind {
            ProviderKind::OpenAi => Some(&mut self.openai),
            ProviderKind::Anthropic => Some(&mut self.anthropic),
            ProviderKind::Gemini => Some(&mut self.gemini),
            ProviderKind::Copilot | ProviderKind::Ollama => None,
        }
    }

    /// Copy with every API key replaced by `"***"` (empty keys stay empty).
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        for kind in ProviderKind::AUTO_ORDER {
            if let Some(hosted) = copy.hosted_mut(kind) {
                if !hosted.api_key.is_empty() {
                    hosted.api_key = "***".to_string();
                }
            }
        }
        copy
    }
}

/// Command-line assistant settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CliAssistantSettings {
    /// Executable to spawn.
    pub program: String,
    /// Hard limit for one suggestion request.
    pub timeout_ms: u64,
    /// Hard limit for the availability probe.
    pub probe_timeout_ms: u64,
}

impl Default for CliAssistantSettings {
    fn default() -> Self {
        Self {
            program: "gh".to_string(),
            timeout_ms: 8_000,
            probe_timeout_ms: 5_000,
        }
    }
}

/// Hosted LLM API settings (`OpenAI`, Anthropic, Gemini).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HostedProviderSettings {
    /// Secret key. Empty means the backend is unavailable.
    pub api_key: String,
    /// Model id. Empty means the backend default.
    pub model: String,
    /// API origin override. Empty means the public endpoint.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout_ms: u64,
}

impl Default for HostedProviderSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: String::new(),
            base_url: String::new(),
            timeout_ms: 10_000,
        }
    }
}

impl HostedProviderSettings {
    /// Defaults with a model preset.
    pub fn with_model(model: &str) -> Self {
        Self {
            model: model.to_string(),
            ..Self::default()
        }
    }

    /// True when a non-empty key is configured.
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// Local LLM server settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocalServerSettings {
    /// Full `generate` URL.
    pub endpoint: String,
    /// Model name.
    pub model: String,
    /// Per-request timeout.
    pub timeout_ms: u64,
    /// Timeout for the `/api/tags` reachability probe.
    pub probe_timeout_ms: u64,
}

impl Default for LocalServerSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434/api/generate".to_string(),
            model: "llama3".to_string(),
            timeout_ms: 10_000,
            probe_timeout_ms: 3_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn default_policy_is_rules() {
        let settings = AiSettings::default();
        assert_eq!(settings.provider, ProviderPolicy::Rules);
        assert_eq!(settings.openai.model, "gpt-4o-mini");
        assert_eq!(settings.ollama.model, "llama3");
        assert_eq!(settings.copilot.program, "gh");
        assert!(!settings.anthropic.has_api_key());
    }

    #[test]
    fn policy_parses_names() {
        assert_eq!("auto".parse::<ProviderPolicy>().unwrap(), ProviderPolicy::Auto);
        assert_eq!("RULES".parse::<ProviderPolicy>().unwrap(), ProviderPolicy::Rules);
        assert_eq!(
            "ollama".parse::<ProviderPolicy>().unwrap(),
            ProviderPolicy::Single(ProviderKind::Ollama)
        );
        assert_matches!(
            "bard".parse::<ProviderPolicy>(),
            Err(SettingsError::InvalidValue(_))
        );
    }

    #[test]
    fn policy_serializes_as_string() {
        let json = serde_json::to_string(&ProviderPolicy::Single(ProviderKind::OpenAi)).unwrap();
        assert_eq!(json, "\"openai\"");
        let parsed: ProviderPolicy = serde_json::from_str("\"gemini\"").unwrap();
        assert_eq!(parsed, ProviderPolicy::Single(ProviderKind::Gemini));
        assert!(serde_json::from_str::<ProviderPolicy>("\"nope\"").is_err());
    }

    #[test]
    fn partial_file_uses_defaults() {
        let settings: AiSettings =
            serde_json::from_str(r#"{"provider":"auto","openai":{"apiKey":"sk-1"}}"#).unwrap();
        assert_eq!(settings.provider, ProviderPolicy::Auto);
        assert_eq!(settings.openai.api_key, "sk-1");
        assert_eq!(settings.openai.timeout_ms, 10_000);
        assert_eq!(settings.ollama.endpoint, "http://localhost:11434/api/generate");
    }

    #[test]
    fn camel_case_keys() {
        let value = serde_json::to_value(AiSettings::default()).unwrap();
        assert!(value["openai"].get("apiKey").is_some());
        assert!(value["openai"].get("baseUrl").is_some());
        assert!(value["copilot"].get("probeTimeoutMs").is_some());
    }

    #[test]
    fn redaction_hides_keys_only() {
        let mut settings = AiSettings::default();
        settings.gemini.api_key = "secret".to_string();
        let redacted = settings.redacted();
        assert_eq!(redacted.gemini.api_key, "***");
        assert_eq!(redacted.openai.api_key, "");
        assert_eq!(redacted.gemini.model, settings.gemini.model);
    }

    #[test]
    fn hosted_lookup() {
        let settings = AiSettings::default();
        assert!(settings.hosted(ProviderKind::Anthropic).is_some());
        assert!(settings.hosted(ProviderKind::Copilot).is_none());
        assert!(settings.hosted(ProviderKind::Ollama).is_none());
    }
}
