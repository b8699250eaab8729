//! # namer-core
//!
//! Shared types for the naming assistant.
//!
//! - [`Identifier`] / [`IdentifierKind`]: what the analyzer extracted
//! - [`FileContext`] / [`DomainTag`]: per-file classification
//! - [`SuggestionSet`]: ordered, unique candidate names that never contain the original
//! - [`PromptContext`] / [`ProviderResponse`]: the unit exchanged with AI providers
//! - [`ProviderKind`]: the fixed set of AI backends

#![deny(unsafe_code)]

pub mod context;
pub mod identifier;
pub mod provider;
pub mod suggestions;
pub mod text;

pub use context::{DomainTag, FileContext, PromptContext};
pub use identifier::{Identifier, IdentifierKind, ParseKindError};
pub use provider::{ParseProviderError, ProviderKind};
pub use suggestions::{ProviderResponse, SuggestionSet};
pub use text::{capitalize, char_len};
