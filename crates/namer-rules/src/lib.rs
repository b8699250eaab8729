//! # namer-rules
//!
//! Rule-based name suggestions. No I/O, no configuration: the same input
//! always produces the same ordered suggestions.
//!
//! Heuristic groups are evaluated in a fixed order and unioned:
//! 1. Function-like verbs (handlers, accessors, mutators, fetchers, validators, initializers)
//! 2. Variable-like nouns (data holders, counters, flags, short names)
//! 3. React conventions (components, hooks, handlers, state)
//! 4. Test naming (`should…` / `it…`)
//! 5. Short-name padding, regardless of kind

#![deny(unsafe_code)]

pub mod engine;
pub mod patterns;

pub use engine::RuleEngine;
