//! File-level context and the prompt unit handed to AI providers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::identifier::IdentifierKind;

/// Coarse classification of a file's purpose.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DomainTag {
    /// File defines React components.
    ReactComponent,
    /// File uses React hooks.
    ReactHooks,
    /// Test suite.
    Testing,
    /// Network / API client code.
    Api,
    /// Anything else.
    #[default]
    General,
}

impl DomainTag {
    /// Wire name (`"react-component"`, `"testing"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReactComponent => "react-component",
            Self::ReactHooks => "react-hooks",
            Self::Testing => "testing",
            Self::Api => "api",
            Self::General => "general",
        }
    }

    /// True for both React domains.
    pub fn is_react(self) -> bool {
        matches!(self, Self::ReactComponent | Self::ReactHooks)
    }
}

impl fmt::Display for DomainTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Computed once per file, read-only afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileContext {
    /// What the file is about.
    pub domain: DomainTag,
    /// Module paths from `import ... from '...'`, in source order.
    pub imports: Vec<String>,
    /// First comment block of the file.
    pub header_comment: String,
}

impl FileContext {
    /// A context with the given domain and nothing else.
    pub fn with_domain(domain: DomainTag) -> Self {
        Self {
            domain,
            ..Self::default()
        }
    }
}

/// Everything a provider needs to build its request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptContext {
    /// Current identifier name.
    pub original: String,
    /// Identifier category.
    pub kind: IdentifierKind,
    /// Free-form context (leading comments).
    pub context: String,
    /// Context of the enclosing file.
    pub file: FileContext,
}

impl PromptContext {
    /// Bundle the prompt inputs.
    pub fn new(
        original: impl Into<String>,
        kind: IdentifierKind,
        context: impl Into<String>,
        file: FileContext,
    ) -> Self {
        Self {
            original: original.into(),
            kind,
            context: context.into(),
            file,
        }
    }
}
