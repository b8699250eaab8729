//! Named predicates and rewrites used by the rule engine.
//!
//! Matching is case-insensitive unless the predicate says otherwise. Rewrites
//! replace the first occurrence only, except [`strip_resource_tokens`].

use std::sync::LazyLock;

use regex::Regex;

use namer_core::char_len;

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid built-in pattern {pattern}: {e}"))
}

static EVENT_VERB: LazyLock<Regex> = LazyLock::new(|| re("(?i)handle|process|execute"));
static HANDLE: LazyLock<Regex> = LazyLock::new(|| re("(?i)handle"));
static PROCESS: LazyLock<Regex> = LazyLock::new(|| re("(?i)process"));
static EXECUTE: LazyLock<Regex> = LazyLock::new(|| re("(?i)execute"));
static RESOURCE_VERB: LazyLock<Regex> = LazyLock::new(|| re("(?i)api|fetch|load|request"));
static RESOURCE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| re("(?i)fetch|get|load|request|api"));
static VALIDATION_VERB: LazyLock<Regex> = LazyLock::new(|| re("(?i)check|validate|verify"));
static CHECK: LazyLock<Regex> = LazyLock::new(|| re("(?i)check"));
static INIT_VERB: LazyLock<Regex> = LazyLock::new(|| re("(?i)init|start|begin"));
static DATA_HOLDER: LazyLock<Regex> = LazyLock::new(|| re("(?i)data|info|payload"));
static COLLECTION_SUFFIX: LazyLock<Regex> = LazyLock::new(|| re("(?i)(s|list|array)$"));
static COUNTER: LazyLock<Regex> = LazyLock::new(|| re("(?i)count|index|num|i$|j$"));
static FLAG_WORD: LazyLock<Regex> = LazyLock::new(|| re("(?i)is|has|should|can|flag"));
static FLAG_PREFIX: LazyLock<Regex> = LazyLock::new(|| re("^(is|has|should|can)"));
static UI_EVENT: LazyLock<Regex> = LazyLock::new(|| re("(?i)click|change|submit|input"));
static STATE_WORD: LazyLock<Regex> = LazyLock::new(|| re("(?i)state|status|value|data"));
static TEST_WORD: LazyLock<Regex> = LazyLock::new(|| re("(?i)test|spec|should"));
static TEST_TOKEN: LazyLock<Regex> = LazyLock::new(|| re("(?i)test|spec|should|it"));
static LOOP_NAME: LazyLock<Regex> = LazyLock::new(|| re("^(id|i|j)$"));

fn replace_first(pattern: &Regex, haystack: &str, with: &str) -> String {
    pattern.replace(haystack, with).into_owned()
}

/// `handle`, `process` or `execute` anywhere in the name.
pub fn is_event_verb(name: &str) -> bool {
    EVENT_VERB.is_match(name)
}

/// `handle → on`, `process → transform`, `execute → run` (first occurrence each).
/// A rewrite whose verb is absent yields the name unchanged.
pub fn event_verb_rewrites(name: &str) -> [String; 3] {
    [
        replace_first(&HANDLE, name, "on"),
        replace_first(&PROCESS, name, "transform"),
        replace_first(&EXECUTE, name, "run"),
    ]
}

/// Starts with `get` (case-sensitive) and is longer than five characters.
pub fn is_accessor(name: &str) -> bool {
    name.starts_with("get") && char_len(name) > 5
}

/// Starts with `set` (case-sensitive) and is longer than five characters.
pub fn is_mutator(name: &str) -> bool {
    name.starts_with("set") && char_len(name) > 5
}

/// Swap a literal prefix, leaving the name alone when it does not start with it.
pub fn replace_prefix(name: &str, prefix: &str, with: &str) -> String {
    match name.strip_prefix(prefix) {
        Some(rest) => format!("{with}{rest}"),
        None => name.to_string(),
    }
}

/// `api`, `fetch`, `load` or `request` anywhere in the name.
pub fn is_resource_fetch(name: &str) -> bool {
    RESOURCE_VERB.is_match(name)
}

/// Remove every `fetch|get|load|request|api` token and lowercase what is left.
pub fn strip_resource_tokens(name: &str) -> String {
    RESOURCE_TOKEN.replace_all(name, "").to_lowercase()
}

/// `check`, `validate` or `verify` anywhere in the name.
pub fn is_validation(name: &str) -> bool {
    VALIDATION_VERB.is_match(name)
}

/// `check → validate` on the first occurrence.
pub fn check_to_validate(name: &str) -> String {
    replace_first(&CHECK, name, "validate")
}

/// Replace the first validation verb with `with`.
pub fn replace_validation_verb(name: &str, with: &str) -> String {
    replace_first(&VALIDATION_VERB, name, with)
}

/// `init`, `start` or `begin` anywhere in the name.
pub fn is_initialization(name: &str) -> bool {
    INIT_VERB.is_match(name)
}

/// Replace the first initialization verb with `with`.
pub fn replace_init_verb(name: &str, with: &str) -> String {
    replace_first(&INIT_VERB, name, with)
}

/// `data`, `info` or `payload` anywhere in the name.
pub fn is_data_holder(name: &str) -> bool {
    DATA_HOLDER.is_match(name)
}

/// Ends in `s`, `list` or `array`.
pub fn is_collection_like(name: &str) -> bool {
    COLLECTION_SUFFIX.is_match(name)
}

/// Counter-ish token and shorter than seven characters.
pub fn is_counter(name: &str) -> bool {
    COUNTER.is_match(name) && char_len(name) < 7
}

/// Contains a flag word but is not already prefixed `is|has|should|can`.
pub fn is_unprefixed_flag(name: &str) -> bool {
    FLAG_WORD.is_match(name) && !FLAG_PREFIX.is_match(name)
}

/// Fewer than four characters and not one of the conventional `id`, `i`, `j`.
pub fn is_short_name(name: &str) -> bool {
    char_len(name) < 4 && !LOOP_NAME.is_match(name)
}

/// First character is an ASCII or Unicode uppercase letter.
pub fn starts_uppercase(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// `click`, `change`, `submit` or `input` anywhere in the name.
pub fn is_ui_event(name: &str) -> bool {
    UI_EVENT.is_match(name)
}

/// `state`, `status`, `value` or `data` anywhere in the name.
pub fn is_state_like(name: &str) -> bool {
    STATE_WORD.is_match(name)
}

/// Drop the first state word.
pub fn strip_state_word(name: &str) -> String {
    replace_first(&STATE_WORD, name, "")
}

/// `test`, `spec` or `should` anywhere in the name.
pub fn is_test_like(name: &str) -> bool {
    TEST_WORD.is_match(name)
}

/// Drop the first `test|spec|should|it` token.
pub fn strip_test_word(name: &str) -> String {
    replace_first(&TEST_TOKEN, name, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_verbs() {
        assert!(is_event_verb("handleClick"));
        assert!(is_event_verb("ProcessQueue"));
        assert!(!is_event_verb("render"));
        let [on, transform, run] = event_verb_rewrites("handleClick");
        assert_eq!(on, "onClick");
        assert_eq!(transform, "handleClick");
        assert_eq!(run, "handleClick");
    }

    #[test]
    fn event_rewrite_is_case_insensitive() {
        let [on, _, _] = event_verb_rewrites("doHandleSave");
        assert_eq!(on, "doonSave");
    }

    #[test]
    fn accessor_and_mutator_need_length() {
        assert!(is_accessor("getUser"));
        assert!(!is_accessor("getId"));
        assert!(!is_accessor("GetUser"));
        assert!(is_mutator("setName"));
        assert!(!is_mutator("setup"));
    }

    #[test]
    fn replace_prefix_only_at_start() {
        assert_eq!(replace_prefix("getUser", "get", "fetch"), "fetchUser");
        assert_eq!(replace_prefix("forget", "get", "fetch"), "forget");
    }

    #[test]
    fn resource_tokens_all_removed() {
        assert!(is_resource_fetch("fetchUserApi"));
        assert_eq!(strip_resource_tokens("fetchUserApi"), "user");
        assert_eq!(strip_resource_tokens("loadRequest"), "");
        assert_eq!(strip_resource_tokens("getOrderLoad"), "order");
    }

    #[test]
    fn validation_rewrites() {
        assert!(is_validation("checkEmail"));
        assert_eq!(check_to_validate("checkEmail"), "validateEmail");
        assert_eq!(replace_validation_verb("verifyToken", "is"), "isToken");
    }

    #[test]
    fn init_rewrites() {
        assert!(is_initialization("startServer"));
        assert_eq!(replace_init_verb("initApp", "setup"), "setupApp");
        assert!(!is_initialization("render"));
    }

    #[test]
    fn data_and_collections() {
        assert!(is_data_holder("userData"));
        assert!(is_data_holder("INFO"));
        assert!(is_collection_like("dataList"));
        assert!(is_collection_like("items"));
        assert!(!is_collection_like("dataMap"));
    }

    #[test]
    fn counters() {
        assert!(is_counter("count"));
        assert!(is_counter("idx_i"));
        assert!(!is_counter("itemCount"));
        assert!(!is_counter("value"));
    }

    #[test]
    fn flags() {
        assert!(is_unprefixed_flag("visible"));
        assert!(is_unprefixed_flag("enabledFlag"));
        assert!(!is_unprefixed_flag("isOpen"));
        assert!(!is_unprefixed_flag("hasItems"));
        assert!(!is_unprefixed_flag("open"));
    }

    #[test]
    fn short_names_exclude_loop_vars() {
        assert!(is_short_name("x"));
        assert!(is_short_name("tmp"));
        assert!(!is_short_name("id"));
        assert!(!is_short_name("i"));
        assert!(!is_short_name("j"));
        assert!(!is_short_name("user"));
    }

    #[test]
    fn react_predicates() {
        assert!(starts_uppercase("UserCard"));
        assert!(!starts_uppercase("userCard"));
        assert!(!starts_uppercase(""));
        assert!(is_ui_event("onInputChange"));
        assert!(is_state_like("userStatus"));
        assert_eq!(strip_state_word("userStatus"), "user");
        assert_eq!(strip_state_word("value"), "");
    }

    #[test]
    fn test_words() {
        assert!(is_test_like("testLogin"));
        assert!(is_test_like("shouldRender"));
        assert_eq!(strip_test_word("testLogin"), "Login");
        assert_eq!(strip_test_word("specParser"), "Parser");
    }
}
