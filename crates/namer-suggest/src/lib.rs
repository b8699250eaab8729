//! # namer-suggest
//!
//! The suggestion pipeline for one identifier:
//! 1. [`namer_rules::RuleEngine`] suggestions, always
//! 2. AI suggestions per [`namer_settings::ProviderPolicy`]: none, one named
//!    backend, or the first backend in priority order that answers
//! 3. Union in first-seen order, rules first
//! 4. [`fallback_suggestions`] when the union is empty
//!
//! [`SuggestionOrchestrator::get_suggestions`] never fails and never returns
//! an empty list.

#![deny(unsafe_code)]

pub mod fallback;
pub mod orchestrator;

pub use fallback::fallback_suggestions;
pub use orchestrator::{SuggestionOrchestrator, SuggestionReport};
