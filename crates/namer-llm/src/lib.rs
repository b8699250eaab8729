//! # namer-llm
//!
//! AI suggestion backends behind one trait.
//!
//! - [`SuggestionProvider`]: availability check plus never-failing `get_suggestions`
//! - Backends: [`CopilotProvider`] (subprocess), [`OpenAiProvider`],
//!   [`AnthropicProvider`], [`GeminiProvider`] (hosted HTTP), [`OllamaProvider`]
//!   (local HTTP)
//! - [`MockProvider`]: scripted replies for tests
//! - [`build_providers`]: all backends from [`namer_settings::AiSettings`]

#![deny(unsafe_code)]

pub mod anthropic;
pub mod copilot;
pub mod error;
pub mod gemini;
mod http;
pub mod mock;
pub mod ollama;
pub mod openai;
pub mod prompt;
pub mod provider;
pub mod registry;
pub mod security;

pub use anthropic::AnthropicProvider;
pub use copilot::CopilotProvider;
pub use error::{ProviderError, ProviderResult};
pub use gemini::GeminiProvider;
pub use http::{MAX_TOKENS, TEMPERATURE};
pub use mock::{MockProvider, MockReply};
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;
pub use prompt::{build_cli_prompt, build_prompt, parse_suggestions};
pub use provider::SuggestionProvider;
pub use registry::{SharedProvider, build_provider, build_providers};
pub use security::ApiKey;
