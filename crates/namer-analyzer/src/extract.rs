//! Identifier extraction over a tree-sitter syntax tree.

use std::path::Path;

use namer_core::{Identifier, IdentifierKind};
use tree_sitter::{Node, Parser};

use crate::error::{AnalyzerError, Result};

/// Grammar used for a file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceLanguage {
    /// Plain TypeScript (`.ts`, `.mts`, `.cts`). Allows `<T>expr` casts, no JSX.
    TypeScript,
    /// TypeScript + JSX. Also used for JavaScript, which it parses as a subset.
    Tsx,
}

/// Extensions picked up by discovery.
pub const SOURCE_EXTENSIONS: [&str; 8] = ["js", "jsx", "mjs", "cjs", "ts", "tsx", "mts", "cts"];

impl SourceLanguage {
    /// Grammar for a path, by extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "tsx" | "js" | "jsx" | "mjs" | "cjs" => Some(Self::Tsx),
            _ => None,
        }
    }

    fn grammar(self) -> tree_sitter::Language {
        match self {
            Self::TypeScript => tree_sitter_typescript::language_typescript(),
            Self::Tsx => tree_sitter_typescript::language_tsx(),
        }
    }
}

/// Extract named declarations in document order.
///
/// The parser is error-tolerant: declarations outside broken regions are
/// still reported.
pub fn extract_identifiers(source: &str, language: SourceLanguage) -> Result<Vec<Identifier>> {
    let mut parser = Parser::new();
    parser.set_language(&language.grammar())?;
    let tree = parser.parse(source, None).ok_or(AnalyzerError::NoTree)?;

    let bytes = source.as_bytes();
    let mut found = Vec::new();
    let mut cursor = tree.walk();
    loop {
        if let Some(identifier) = classify(cursor.node(), bytes) {
            found.push(identifier);
        }
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return Ok(found);
            }
        }
    }
}

fn classify(node: Node<'_>, bytes: &[u8]) -> Option<Identifier> {
    let (kind, name_node, anchor) = match node.kind() {
        "function_declaration" | "generator_function_declaration" => {
            (IdentifierKind::Function, node.child_by_field_name("name")?, exported(node))
        }
        "variable_declarator" => {
            let is_arrow = node
                .child_by_field_name("value")
                .is_some_and(|v| v.kind() == "arrow_function");
            let kind = if is_arrow {
                IdentifierKind::ArrowFunction
            } else {
                IdentifierKind::Variable
            };
            let declaration = node.parent().map_or(node, exported);
            (kind, node.child_by_field_name("name")?, declaration)
        }
        "method_definition" => {
            let kind = match node.parent()?.kind() {
                "class_body" => IdentifierKind::Method,
                "object" => IdentifierKind::ObjectMethod,
                _ => return None,
            };
            (kind, node.child_by_field_name("name")?, node)
        }
        "public_field_definition" | "field_definition" => {
            let name = node
                .child_by_field_name("name")
                .or_else(|| node.child_by_field_name("property"))?;
            (IdentifierKind::Property, name, node)
        }
        _ => return None,
    };

    if !matches!(name_node.kind(), "identifier" | "property_identifier") {
        return None;
    }
    let name = name_node.utf8_text(bytes).ok()?;
    let line = u32::try_from(node.start_position().row + 1).unwrap_or(u32::MAX);

    Some(
        Identifier::new(name, kind)
            .with_context(leading_comments(anchor, bytes))
            .with_line(line),
    )
}

/// The `export …` wrapper when there is one, so its comments count.
fn exported(node: Node<'_>) -> Node<'_> {
    match node.parent() {
        Some(parent) if parent.kind() == "export_statement" => parent,
        _ => node,
    }
}

/// Comments directly above `node`, oldest first, delimiters stripped.
fn leading_comments(node: Node<'_>, bytes: &[u8]) -> String {
    let mut comments = Vec::new();
    let mut current = node.prev_sibling();
    while let Some(sibling) = current {
        match sibling.kind() {
            "comment" => {
                if let Ok(text) = sibling.utf8_text(bytes) {
                    comments.push(comment_body(text));
                }
            }
            "decorator" | "," => {}
            _ => break,
        }
        current = sibling.prev_sibling();
    }
    comments.reverse();
    comments.join("\n")
}

fn comment_body(raw: &str) -> String {
    let body = if let Some(line) = raw.strip_prefix("//") {
        line
    } else {
        raw.strip_prefix("/*")
            .and_then(|rest| rest.strip_suffix("*/"))
            .unwrap_or(raw)
    };
    body.trim().to_string()
}
