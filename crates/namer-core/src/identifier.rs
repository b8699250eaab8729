//! Identifiers extracted from source files.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Syntactic category of an identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdentifierKind {
    /// `function foo() {}`
    Function,
    /// `const foo = () => {}`
    ArrowFunction,
    /// Class method.
    Method,
    /// Method shorthand inside an object literal.
    ObjectMethod,
    /// Any other variable binding.
    Variable,
    /// Class field.
    Property,
}

impl IdentifierKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Function,
        Self::ArrowFunction,
        Self::Method,
        Self::ObjectMethod,
        Self::Variable,
        Self::Property,
    ];

    /// Stable wire name (`"arrow-function"`, `"object-method"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::ArrowFunction => "arrow-function",
            Self::Method => "method",
            Self::ObjectMethod => "object-method",
            Self::Variable => "variable",
            Self::Property => "property",
        }
    }

    /// Functions, arrow functions, methods and object methods.
    pub fn is_function_like(self) -> bool {
        matches!(
            self,
            Self::Function | Self::ArrowFunction | Self::Method | Self::ObjectMethod
        )
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name an [`IdentifierKind`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown identifier kind: {0}")]
pub struct ParseKindError(pub String);

impl FromStr for IdentifierKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseKindError(s.to_string()))
    }
}

/// A named function, method, variable or property found in a source file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identifier {
    /// The name as written in the source.
    pub name: String,
    /// Syntactic category.
    pub kind: IdentifierKind,
    /// Free text around the declaration, usually its leading comments.
    #[serde(default)]
    pub source_context: String,
    /// 1-based line of the declaration, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl Identifier {
    /// Create an identifier with no context and no line.
    pub fn new(name: impl Into<String>, kind: IdentifierKind) -> Self {
        Self {
            name: name.into(),
            kind,
            source_context: String::new(),
            line: None,
        }
    }

    /// Attach the leading-comment context.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.source_context = context.into();
        self
    }

    /// Attach the 1-based source line.
    #[must_use]
    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }
}
