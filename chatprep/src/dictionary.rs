//! Shared word set backing spell checking and suggestion generation.

use hashbrown::HashSet;
use parking_lot::RwLock;
use smol_str::SmolStr;

use crate::tokenizer::case_handling::lower_case;

/// A mutable set of known lowercase words.
///
/// Read-mostly; mutations are visible to subsequent checks and suggestion
/// calls but are not linearized against in-flight strategy workers. Share
/// with `Arc<Dictionary>`.
#[derive(Debug, Default)]
pub struct Dictionary {
    words: RwLock<HashSet<SmolStr>>,
}

impl Dictionary {
    /// Creates an empty dictionary.
    pub fn new() -> Dictionary {
        Dictionary {
            words: RwLock::new(HashSet::new()),
        }
    }

    /// Creates a dictionary from a word list, case-folding every entry.
    pub fn from_words<I, S>(words: I) -> Dictionary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Dictionary {
            words: RwLock::new(words.into_iter().map(|w| lower_case(w.as_ref())).collect()),
        }
    }

    /// Membership test; the query is case-folded before lookup.
    pub fn contains(&self, word: &str) -> bool {
        self.words.read().contains(lower_case(word).as_str())
    }

    /// Adds a word. Idempotent; returns whether the set changed.
    pub fn add(&self, word: &str) -> bool {
        self.words.write().insert(lower_case(word))
    }

    /// Removes a word. Idempotent; returns whether the set changed.
    pub fn remove(&self, word: &str) -> bool {
        self.words.write().remove(lower_case(word).as_str())
    }

    /// Number of known words.
    pub fn len(&self) -> usize {
        self.words.read().len()
    }

    /// Whether the dictionary has no words at all.
    pub fn is_empty(&self) -> bool {
        self.words.read().is_empty()
    }
}
