//! Provider error type.
//!
//! Errors stay inside the provider boundary: [`SuggestionProvider::get_suggestions`]
//! logs them and returns an empty response.
//!
//! [`SuggestionProvider::get_suggestions`]: crate::SuggestionProvider::get_suggestions

/// Result type alias for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors that can occur while asking a backend for names.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Provider returned a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },

    /// No API key configured.
    #[error("missing API key for {provider}")]
    MissingApiKey {
        /// Provider name.
        provider: &'static str,
    },

    /// Subprocess could not be spawned or exited unsuccessfully.
    #[error("process error: {message}")]
    Process {
        /// Error description.
        message: String,
    },

    /// Request or subprocess exceeded its time limit.
    #[error("timed out after {timeout_ms}ms")]
    Timeout {
        /// Configured limit.
        timeout_ms: u64,
    },

    /// Payload parsed but did not contain the expected text.
    #[error("malformed response: {message}")]
    Malformed {
        /// What was missing.
        message: String,
    },

    /// Provider-specific error.
    #[error("{message}")]
    Other {
        /// Error description.
        message: String,
    },
}

impl ProviderError {
    /// Error category string for log fields.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Http(e) if e.is_timeout() => "timeout",
            Self::Http(_) => "network",
            Self::Json(_) | Self::Malformed { .. } => "parse",
            Self::Api { .. } => "api",
            Self::MissingApiKey { .. } => "auth",
            Self::Process { .. } => "process",
            Self::Timeout { .. } => "timeout",
            Self::Other { .. } => "unknown",
        }
    }

    /// Shorthand for [`ProviderError::Malformed`].
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }
}

/// Pull a human-readable message out of an error body.
///
/// Understands `{"error": {"message": ...}}` (`OpenAI`, Anthropic, Gemini) and
/// `{"error": "..."}` (Ollama); anything else is echoed with the status.
pub(crate) fn parse_api_error(body: &str, status: u16) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        let error = &json["error"];
        if let Some(message) = error["message"].as_str().or_else(|| error.as_str()) {
            return message.to_string();
        }
    }
    format!("HTTP {status}: {body}")
}
