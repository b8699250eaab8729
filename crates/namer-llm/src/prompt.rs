//! Prompt construction and response parsing shared by every backend.

use namer_core::{PromptContext, SuggestionSet};

const LANGUAGE: &str = "JavaScript/TypeScript";

fn or_none(text: &str) -> &str {
    if text.trim().is_empty() { "none" } else { text.trim() }
}

fn imports_line(ctx: &PromptContext) -> String {
    if ctx.file.imports.is_empty() {
        "none".to_string()
    } else {
        ctx.file.imports.join(", ")
    }
}

/// Multi-line instruction for chat-style APIs.
pub fn build_prompt(ctx: &PromptContext) -> String {
    format!(
        "You are an expert in naming conventions for {LANGUAGE} code.\n\
         Suggest 3 to 5 better names for a {kind} named \"{original}\" in a {domain} {LANGUAGE} file.\n\
         Additional context: {context}.\n\
         File imports: {imports}.\n\
         Answer ONLY with the alternative names separated by commas, without explanations.",
        kind = ctx.kind,
        original = ctx.original,
        domain = ctx.file.domain,
        context = or_none(&ctx.context),
        imports = imports_line(ctx),
    )
}

/// Single-line instruction for the command-line assistant.
pub fn build_cli_prompt(ctx: &PromptContext) -> String {
    let context = or_none(&ctx.context).replace('\n', " ");
    format!(
        "Suggest 3 better names for the {kind} \"{original}\" in a {domain} {LANGUAGE} file. \
         Context: {context}. Reply only with the names separated by commas, without explanations.",
        kind = ctx.kind,
        original = ctx.original,
        domain = ctx.file.domain,
    )
}

/// Split a comma-separated answer into candidate names.
///
/// Candidates are trimmed; empty ones, ones with embedded whitespace and the
/// original itself are dropped. Duplicates collapse in first-seen order.
pub fn parse_suggestions(text: &str, original: &str) -> SuggestionSet {
    let mut out = SuggestionSet::new(original);
    for candidate in text.split(',').map(str::trim) {
        if candidate.is_empty() || candidate.chars().any(char::is_whitespace) {
            continue;
        }
        let _ = out.insert(candidate);
    }
    out
}
