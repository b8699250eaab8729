//! # namer-analyzer
//!
//! Turns JavaScript/TypeScript source into the inputs of the suggestion
//! pipeline: [`Identifier`](namer_core::Identifier)s via tree-sitter and one
//! [`FileContext`](namer_core::FileContext) per file. Also finds source files
//! and detects the project type.

#![deny(unsafe_code)]

pub mod analyze;
pub mod context;
pub mod discover;
pub mod error;
pub mod extract;
pub mod project;

pub use analyze::{AnalysisResult, analyze_file, analyze_source};
pub use context::{classify_domain, extract_file_context, extract_header_comment, extract_imports};
pub use discover::{DEFAULT_MAX_DEPTH, discover_sources};
pub use error::{AnalyzerError, Result};
pub use extract::{SOURCE_EXTENSIONS, SourceLanguage, extract_identifiers};
pub use project::{Framework, ProjectInfo, ProjectLanguage, detect_project};
