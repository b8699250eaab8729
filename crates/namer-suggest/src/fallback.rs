//! Last-resort names when neither rules nor AI produced anything.

use namer_core::{IdentifierKind, SuggestionSet, capitalize, char_len};

/// Deterministic, never-empty suggestions for `original`.
pub fn fallback_suggestions(original: &str, kind: IdentifierKind) -> SuggestionSet {
    let mut out = SuggestionSet::new(original);
    let cap = capitalize(original);

    if kind.is_function_like() {
        out.extend([format!("process{cap}"), format!("handle{cap}")]);
        if ["click", "change", "submit"]
            .iter()
            .any(|event| original.contains(event))
        {
            let _ = out.insert(format!("on{cap}"));
        }
        if let Some(rest) = original.strip_prefix("get") {
            out.extend([format!("fetch{rest}"), format!("retrieve{rest}")]);
        }
    } else {
        out.extend([format!("{original}Value"), format!("{original}Data")]);
        if char_len(original) <= 3 {
            out.extend([format!("{original}Item"), format!("{original}Element")]);
        }
    }

    if out.is_empty() {
        out.extend([format!("improved{cap}"), format!("better{cap}")]);
    }
    out
}
