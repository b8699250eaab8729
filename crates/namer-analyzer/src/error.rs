//! Analyzer error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or parsing a source file.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Failed to read the file.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Extension is not a JavaScript/TypeScript one.
    #[error("unsupported source file: {0}")]
    Unsupported(PathBuf),
    /// The grammar could not be loaded into the parser.
    #[error("failed to load grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    /// The parser gave up without producing a tree.
    #[error("parser produced no syntax tree")]
    NoTree,
}

/// Result type for analyzer operations.
pub type Result<T> = std::result::Result<T, AnalyzerError>;
