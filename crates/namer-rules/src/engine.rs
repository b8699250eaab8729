//! The rule engine: identifier + kind + context → candidate names.

use namer_core::{DomainTag, FileContext, IdentifierKind, SuggestionSet, capitalize};

use crate::patterns;

/// Stateless heuristic suggester.
#[derive(Clone, Copy, Debug, Default)]
pub struct RuleEngine;

impl RuleEngine {
    /// Create the engine.
    pub fn new() -> Self {
        Self
    }

    /// Suggest better names for `original`.
    ///
    /// Total and deterministic. The result never contains `original` and may
    /// be empty when no heuristic fires. `item_context` is accepted for parity
    /// with the provider contract; no heuristic reads it today.
    pub fn suggest(
        &self,
        original: &str,
        kind: IdentifierKind,
        _item_context: &str,
        file: &FileContext,
    ) -> SuggestionSet {
        let mut out = SuggestionSet::new(original);

        if kind.is_function_like() {
            function_heuristics(original, &mut out);
        } else {
            variable_heuristics(original, &mut out);
        }

        if file.domain.is_react() {
            react_augmentation(original, kind, &mut out);
        }
        if file.domain == DomainTag::Testing {
            testing_augmentation(original, kind, &mut out);
        }

        short_name_padding(original, &mut out);
        out
    }
}

fn function_heuristics(name: &str, out: &mut SuggestionSet) {
    if patterns::is_event_verb(name) {
        out.extend(patterns::event_verb_rewrites(name));
        if !name.ends_with("Handler") {
            let _ = out.insert(format!("{name}Handler"));
        }
    }

    if patterns::is_accessor(name) {
        let _ = out.insert(patterns::replace_prefix(name, "get", "retrieve"));
        let _ = out.insert(patterns::replace_prefix(name, "get", "fetch"));
    }

    if patterns::is_mutator(name) {
        let _ = out.insert(patterns::replace_prefix(name, "set", "update"));
        let _ = out.insert(patterns::replace_prefix(name, "set", "modify"));
    }

    if patterns::is_resource_fetch(name) {
        let resource = patterns::strip_resource_tokens(name);
        if resource.is_empty() {
            out.extend(["fetchData", "loadContent", "retrieveResources"]);
        } else {
            let resource = capitalize(&resource);
            out.extend([
                format!("fetch{resource}"),
                format!("load{resource}"),
                format!("retrieve{resource}"),
            ]);
        }
    }

    if patterns::is_validation(name) {
        let _ = out.insert(patterns::check_to_validate(name));
        let _ = out.insert(format!("{}Valid", patterns::replace_validation_verb(name, "is")));
        let _ = out.insert(format!(
            "{}Valid",
            patterns::replace_validation_verb(name, "ensure")
        ));
    }

    if patterns::is_initialization(name) {
        out.extend(
            ["initialize", "setup", "create"].map(|verb| patterns::replace_init_verb(name, verb)),
        );
    }
}

fn variable_heuristics(name: &str, out: &mut SuggestionSet) {
    if patterns::is_data_holder(name) {
        out.extend(["payload", "response", "result", "content"]);
        if patterns::is_collection_like(name) {
            out.extend(["items", "collection", "elements"]);
        }
    }

    if patterns::is_counter(name) {
        out.extend(["counter", "index", "position"]);
    }

    if patterns::is_unprefixed_flag(name) {
        let cap = capitalize(name);
        out.extend([format!("is{cap}"), format!("has{cap}")]);
    }

    short_name_padding(name, out);
}

// One branch fires at most.
fn react_augmentation(name: &str, kind: IdentifierKind, out: &mut SuggestionSet) {
    let function_like = kind.is_function_like();

    if patterns::starts_uppercase(name) {
        let _ = out.insert(capitalize(name));
        if !name.ends_with("Component") && name.chars().count() > 4 {
            let _ = out.insert(format!("{name}Component"));
        }
    } else if function_like && !name.starts_with("use") {
        let _ = out.insert(format!("use{}", capitalize(name)));
    } else if function_like && patterns::is_ui_event(name) && !name.starts_with("handle") {
        let cap = capitalize(name);
        out.extend([format!("handle{cap}"), format!("on{cap}")]);
    } else if !function_like && patterns::is_state_like(name) {
        let base = patterns::strip_state_word(name);
        if base.is_empty() {
            out.extend(["value", "state", "data"]);
        } else {
            let lower = base.to_lowercase();
            out.extend([lower.clone(), format!("{lower}State")]);
        }
    }
}

fn testing_augmentation(name: &str, kind: IdentifierKind, out: &mut SuggestionSet) {
    if !kind.is_function_like() || !patterns::is_test_like(name) {
        return;
    }
    let base = patterns::strip_test_word(name);
    if !base.is_empty() {
        let cap = capitalize(&base);
        out.extend([format!("should{cap}"), format!("it{cap}")]);
    }
}

fn short_name_padding(name: &str, out: &mut SuggestionSet) {
    if patterns::is_short_name(name) {
        out.extend([format!("{name}Value"), format!("temp{}", capitalize(name))]);
    }
}
