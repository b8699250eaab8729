//! The closed set of AI backends.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Supported suggestion backends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Local command-line assistant (`gh copilot`).
    Copilot,
    /// `OpenAI` chat completions.
    #[serde(rename = "openai")]
    OpenAi,
    /// Anthropic messages API.
    Anthropic,
    /// Google Gemini `generateContent`.
    Gemini,
    /// Local Ollama server.
    Ollama,
}

impl ProviderKind {
    /// Priority order used by the `auto` policy.
    pub const AUTO_ORDER: [Self; 5] = [
        Self::Copilot,
        Self::OpenAi,
        Self::Anthropic,
        Self::Gemini,
        Self::Ollama,
    ];

    /// Config/CLI name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Copilot => "copilot",
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Gemini => "gemini",
            Self::Ollama => "ollama",
        }
    }

    /// Human-readable backend name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Copilot => "GitHub Copilot CLI",
            Self::OpenAi => "OpenAI",
            Self::Anthropic => "Anthropic Claude",
            Self::Gemini => "Google Gemini",
            Self::Ollama => "Ollama",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a [`ProviderKind`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown provider: {0}")]
pub struct ParseProviderError(pub String);

impl FromStr for ProviderKind {
    type Err = ParseProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::AUTO_ORDER
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseProviderError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_order_starts_with_local_cli() {
        assert_eq!(ProviderKind::AUTO_ORDER[0], ProviderKind::Copilot);
        assert_eq!(ProviderKind::AUTO_ORDER[4], ProviderKind::Ollama);
    }

    #[test]
    fn parses_names() {
        assert_eq!("openai".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
        assert_eq!("Gemini".parse::<ProviderKind>().unwrap(), ProviderKind::Gemini);
        assert!("bard".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn serde_uses_config_names() {
        let json = serde_json::to_string(&ProviderKind::OpenAi).unwrap();
        assert_eq!(json, "\"openai\"");
    }
}
