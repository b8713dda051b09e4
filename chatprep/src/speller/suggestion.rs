//! Suggestion for a spelling correction.
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// The candidate strategy that produced a suggestion.
///
/// Variant order is the fixed merge priority: transpositions first, then
/// substitutions/insertions, then word-splits, then deletions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// adjacent-character swap
    Transpose,
    /// letter substitution or edge insertion
    Away,
    /// split into two dictionary words
    Splits,
    /// single-character deletion
    Deletes,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// Suggestion for a spelling correction
pub struct Suggestion {
    /// the suggested word-form
    pub value: SmolStr,
    /// the strategy that generated the word-form
    pub strategy: Strategy,
}

impl Suggestion {
    /// creates a spelling correction suggestion
    pub fn new(value: SmolStr, strategy: Strategy) -> Suggestion {
        Suggestion { value, strategy }
    }

    /// gets the suggested word-form
    pub fn value(&self) -> &str {
        &self.value
    }

    /// gets the strategy that produced this suggestion
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }
}
