//! Whole-file analysis: identifiers plus file context.

use std::path::Path;

use namer_core::{FileContext, Identifier};
use serde::Serialize;
use tracing::debug;

use crate::context::extract_file_context;
use crate::error::{AnalyzerError, Result};
use crate::extract::{SourceLanguage, extract_identifiers};

/// Everything the suggestion pipeline needs from one file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Declarations in document order.
    pub identifiers: Vec<Identifier>,
    /// Shared context for every identifier of the file.
    pub file_context: FileContext,
}

/// Analyze in-memory source.
pub fn analyze_source(source: &str, language: SourceLanguage) -> Result<AnalysisResult> {
    Ok(AnalysisResult {
        identifiers: extract_identifiers(source, language)?,
        file_context: extract_file_context(source),
    })
}

/// Read and analyze a file; the grammar follows its extension.
pub fn analyze_file(path: &Path) -> Result<AnalysisResult> {
    let language = SourceLanguage::from_path(path)
        .ok_or_else(|| AnalyzerError::Unsupported(path.to_path_buf()))?;
    let source = std::fs::read_to_string(path).map_err(|source| AnalyzerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let result = analyze_source(&source, language)?;
    debug!(
        ?path,
        identifiers = result.identifiers.len(),
        domain = %result.file_context.domain,
        "analyzed file"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use namer_core::{DomainTag, IdentifierKind};

    use super::*;

    #[test]
    fn analyzes_a_hooks_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("useMenu.js");
        std::fs::write(
            &path,
            "// Menu state\nimport { useState } from 'react';\n\nexport const useMenu = () => {\n  const [open, setOpen] = useState(false);\n  const toggle = () => setOpen(!open);\n  return { open, toggle };\n};\n",
        )
        .unwrap();

        let result = analyze_file(&path).unwrap();
        assert_eq!(result.file_context.domain, DomainTag::ReactHooks);
        assert_eq!(result.file_context.imports, ["react"]);
        let names: Vec<_> = result.identifiers.iter().map(|i| (i.name.as_str(), i.kind)).collect();
        assert_eq!(
            names,
            [("useMenu", IdentifierKind::ArrowFunction), ("toggle", IdentifierKind::ArrowFunction)]
        );
    }

    #[test]
    fn unsupported_extension() {
        assert_matches!(
            analyze_file(Path::new("notes.md")),
            Err(AnalyzerError::Unsupported(_))
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert_matches!(
            analyze_file(&dir.path().join("gone.ts")),
            Err(AnalyzerError::Io { .. })
        );
    }

    #[test]
    fn serializes_camel_case() {
        let result = analyze_source("const a = 1;", SourceLanguage::Tsx).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("fileContext").is_some());
        assert_eq!(json["identifiers"][0]["name"], "a");
    }
}
