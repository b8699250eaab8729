//! Markdown log of the naming decisions taken during `namer review`.
//!
//! Entries are appended to the first writable of `./namer-suggester.log` and
//! `~/namer-suggester.log`. A new file starts with a title line.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, SecondsFormat};
use namer_core::{FileContext, Identifier};
use tracing::debug;

/// File name used in both candidate directories.
pub const LOG_FILE_NAME: &str = "namer-suggester.log";

const HEADER: &str = "# Name suggestion log\n\n";

/// Why an entry could not be recorded.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// A single candidate failed.
    #[error("failed to write {path}: {source}")]
    Io {
        /// Candidate path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Every candidate failed.
    #[error("no writable log location (tried {tried})")]
    Unwritable {
        /// Comma-separated candidate paths.
        tried: String,
    },
}

/// One review decision.
#[derive(Clone, Copy, Debug)]
pub struct Decision<'a> {
    /// When the choice was made.
    pub timestamp: DateTime<Local>,
    /// Analyzed file.
    pub file: &'a Path,
    /// The identifier under review.
    pub identifier: &'a Identifier,
    /// Context of the file it lives in.
    pub file_context: &'a FileContext,
    /// What was offered, in display order.
    pub suggestions: &'a [String],
    /// The chosen name, equal to the original when kept.
    pub selected: &'a str,
}

/// Appends decisions to the first writable candidate path.
#[derive(Clone, Debug)]
pub struct DecisionLog {
    candidates: Vec<PathBuf>,
}

impl Default for DecisionLog {
    fn default() -> Self {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
        Self::with_candidates(vec![
            PathBuf::from(LOG_FILE_NAME),
            PathBuf::from(home).join(LOG_FILE_NAME),
        ])
    }
}

impl DecisionLog {
    /// Log that tries `candidates` in order.
    pub fn with_candidates(candidates: Vec<PathBuf>) -> Self {
        Self { candidates }
    }

    /// Append one entry; returns the file that received it.
    pub fn record(&self, decision: &Decision<'_>) -> Result<PathBuf, LogError> {
        let entry = format_entry(decision);
        for path in &self.candidates {
            match append(path, &entry) {
                Ok(()) => return Ok(path.clone()),
                Err(e) => debug!(error = %e, "decision log candidate failed"),
            }
        }
        let tried = self
            .candidates
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Err(LogError::Unwritable { tried })
    }
}

fn append(path: &Path, entry: &str) -> Result<(), LogError> {
    let io = |source| LogError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io)?;
    if file.metadata().map_err(io)?.len() == 0 {
        file.write_all(HEADER.as_bytes()).map_err(io)?;
    }
    file.write_all(entry.as_bytes()).map_err(io)
}

/// Markdown section for one decision.
pub fn format_entry(decision: &Decision<'_>) -> String {
    let file_name = decision
        .file
        .file_name()
        .map_or_else(|| decision.file.display().to_string(), |n| n.to_string_lossy().into_owned());
    let line = decision
        .identifier
        .line
        .map_or_else(|| "N/A".to_string(), |l| l.to_string());
    let suggestions = decision
        .suggestions
        .iter()
        .map(|s| format!("`{s}`"))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "## {timestamp} - {file_name}\n\
         - **File**: `{file}`\n\
         - **Kind**: {kind}\n\
         - **Line**: {line}\n\
         - **Original**: `{original}`\n\
         - **Domain**: {domain}\n\
         - **Suggestions**: {suggestions}\n\
         - **Selected**: `{selected}`\n\n",
        timestamp = decision.timestamp.to_rfc3339_opts(SecondsFormat::Secs, false),
        file = decision.file.display(),
        kind = decision.identifier.kind,
        original = decision.identifier.name,
        domain = decision.file_context.domain,
        selected = decision.selected,
    )
}
