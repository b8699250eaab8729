//! Ordered, de-duplicated suggestion lists.

use std::collections::HashSet;

use serde::{Serialize, Serializer};

/// Insertion-ordered set of candidate names.
///
/// The original identifier is rejected on insert, so a set can never
/// suggest renaming something to itself. Comparison is case-sensitive.
#[derive(Clone, Debug, Default)]
pub struct SuggestionSet {
    original: String,
    names: Vec<String>,
    seen: HashSet<String>,
}

impl SuggestionSet {
    /// Empty set for suggestions replacing `original`.
    pub fn new(original: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            names: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Name the suggestions replace.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Append `name` unless it is the original or already present.
    /// Returns whether the set grew.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if name == self.original || self.seen.contains(&name) {
            return false;
        }
        let _ = self.seen.insert(name.clone());
        self.names.push(name);
        true
    }

    /// Whether `name` is in the set.
    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    /// Number of suggestions.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True when nothing was suggested.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Suggestions in insertion order.
    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    /// Consume into the ordered list.
    pub fn into_vec(self) -> Vec<String> {
        self.names
    }
}

impl<S: Into<String>> Extend<S> for SuggestionSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for name in iter {
            let _ = self.insert(name);
        }
    }
}

impl PartialEq for SuggestionSet {
    fn eq(&self, other: &Self) -> bool {
        self.original == other.original && self.names == other.names
    }
}

impl Eq for SuggestionSet {}

impl Serialize for SuggestionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.names.serialize(serializer)
    }
}

/// What a provider returned for one prompt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProviderResponse {
    /// Parsed, filtered suggestions.
    pub suggestions: SuggestionSet,
    /// Human-readable label of the backend that answered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

impl ProviderResponse {
    /// No suggestions, no label. Every provider failure ends up here.
    pub fn empty(original: &str) -> Self {
        Self {
            suggestions: SuggestionSet::new(original),
            provider: None,
        }
    }

    /// Suggestions attributed to `provider`.
    pub fn from_provider(suggestions: SuggestionSet, provider: impl Into<String>) -> Self {
        Self {
            suggestions,
            provider: Some(provider.into()),
        }
    }
}
