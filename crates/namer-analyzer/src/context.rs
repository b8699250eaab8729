//! File-level classification from raw source text.

use std::sync::LazyLock;

use namer_core::{DomainTag, FileContext};
use regex::Regex;

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid built-in pattern {pattern}: {e}"))
}

static HEADER_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?m)^(//.*|/\*[\s\S]*?\*/)\s*$"));
static IMPORT_FROM: LazyLock<Regex> =
    LazyLock::new(|| re(r#"import\s+.*?\s+from\s+['"](.+?)['"]"#));
static COMPONENT_FUNCTION: LazyLock<Regex> =
    LazyLock::new(|| re(r"function\s+[A-Z][a-zA-Z]*\s*\("));
static COMPONENT_CONST: LazyLock<Regex> = LazyLock::new(|| re(r"const\s+[A-Z][a-zA-Z]*\s*="));

const HOOKS: [&str; 4] = ["useState", "useEffect", "useContext", "useReducer"];
const TEST_CALLS: [&str; 2] = ["test(", "describe("];
const API_WORDS: [&str; 3] = ["api", "fetch", "axios"];

/// Header comment, imports and domain for a whole file.
pub fn extract_file_context(source: &str) -> FileContext {
    FileContext {
        domain: classify_domain(source),
        imports: extract_imports(source),
        header_comment: extract_header_comment(source),
    }
}

/// First line comment or block comment that sits on its own line(s).
pub fn extract_header_comment(source: &str) -> String {
    HEADER_COMMENT
        .find(source)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Module specifiers of `import … from '…'`, in source order.
pub fn extract_imports(source: &str) -> Vec<String> {
    IMPORT_FROM
        .captures_iter(source)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// First matching domain wins: component, hooks, testing, api, general.
pub fn classify_domain(source: &str) -> DomainTag {
    if COMPONENT_FUNCTION.is_match(source) || COMPONENT_CONST.is_match(source) {
        DomainTag::ReactComponent
    } else if HOOKS.iter().any(|hook| source.contains(hook)) {
        DomainTag::ReactHooks
    } else if TEST_CALLS.iter().any(|call| source.contains(call)) {
        DomainTag::Testing
    } else if API_WORDS.iter().any(|word| source.contains(word)) {
        DomainTag::Api
    } else {
        DomainTag::General
    }
}
