//! Dictionary-backed spell checking and ranked suggestion generation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use unic_ucd_category::GeneralCategory;

use self::error::SuggestError;
use self::suggestion::Suggestion;
use self::worker::SuggestionWorker;
use crate::constants::{DEFAULT_PUNCTUATION, ORDINAL_SUFFIXES};
use crate::dictionary::Dictionary;
use crate::tokenizer::case_handling::{lower_case, starts_upper_case, upper_first};
use crate::tokenizer::{trim_punctuation, Tokenize, Word};

pub mod error;
pub mod suggestion;
mod worker;

/// Tunables for checking and suggestion generation, passed as values.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpellerConfig {
    /// characters trimmed from both ends of a token before checking
    pub punctuation: Vec<char>,
    /// skip words whose trailing trimmed character was a hyphen
    pub ignore_hyphen_terminated: bool,
    /// maximum number of merged suggestion candidates
    pub max_suggestions: usize,
    /// substitution/insertion search depth
    pub away_depth: usize,
    /// keep only dictionary words as candidates
    pub filter_candidates: bool,
}

impl Default for SpellerConfig {
    fn default() -> SpellerConfig {
        SpellerConfig {
            punctuation: DEFAULT_PUNCTUATION.to_vec(),
            ignore_hyphen_terminated: true,
            max_suggestions: 10,
            away_depth: 2,
            filter_candidates: true,
        }
    }
}

/// A misspelled token paired with its position among the space-split
/// tokens of the checked text, counted across all lines.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCorrection {
    /// the misspelled token, punctuation stripped, original casing
    pub original: SmolStr,
    /// ordinal of the token in a naive single-space split of the text
    pub index: usize,
}

/// Spell-checking operations over a shared dictionary.
pub trait Speller {
    /// Whether a single token is acceptable.
    fn is_correct(self: Arc<Self>, word: &str) -> bool;
    /// Whether a single token is acceptable, with explicit configuration.
    fn is_correct_with_config(self: Arc<Self>, word: &str, config: &SpellerConfig) -> bool;
    /// Ranked replacement candidates for a misspelled word.
    fn suggest(self: Arc<Self>, word: &str) -> Result<Vec<Suggestion>, SuggestError>;
    /// Ranked replacement candidates, with explicit configuration.
    fn suggest_with_config(
        self: Arc<Self>,
        word: &str,
        config: &SpellerConfig,
    ) -> Result<Vec<Suggestion>, SuggestError>;
    /// All misspellings in a multi-line text, in scan order.
    fn check_text(self: Arc<Self>, text: &str) -> Vec<WordCorrection>;
    /// All misspellings in a multi-line text, with explicit configuration.
    fn check_text_with_config(
        self: Arc<Self>,
        text: &str,
        config: &SpellerConfig,
    ) -> Vec<WordCorrection>;
}

/// [`Speller`] backed by a plain word-set [`Dictionary`].
#[derive(Debug)]
pub struct DictionarySpeller {
    dictionary: Arc<Dictionary>,
}

impl Speller for DictionarySpeller {
    fn is_correct_with_config(self: Arc<Self>, word: &str, config: &SpellerConfig) -> bool {
        if word.is_empty() {
            return true;
        }

        // Check if there are zero letters in the word according to
        // Unicode letter category
        if word.chars().all(|c| !GeneralCategory::of(c).is_letter()) {
            return true;
        }

        self.misspelled_token(word.trim(), config).is_none()
    }

    #[inline]
    fn is_correct(self: Arc<Self>, word: &str) -> bool {
        self.is_correct_with_config(word, &SpellerConfig::default())
    }

    #[inline]
    fn suggest(self: Arc<Self>, word: &str) -> Result<Vec<Suggestion>, SuggestError> {
        self.suggest_with_config(word, &SpellerConfig::default())
    }

    fn suggest_with_config(
        self: Arc<Self>,
        word: &str,
        config: &SpellerConfig,
    ) -> Result<Vec<Suggestion>, SuggestError> {
        if word.is_empty() {
            return Err(SuggestError::EmptyWord);
        }

        let restore_caps = starts_upper_case(word);
        let worker = SuggestionWorker::new(self.dictionary.clone(), lower_case(word), config.clone());
        let mut suggestions = worker.suggest();

        if restore_caps {
            suggestions.iter_mut().for_each(|x| {
                x.value = upper_first(x.value());
            });
        }

        Ok(suggestions)
    }

    #[inline]
    fn check_text(self: Arc<Self>, text: &str) -> Vec<WordCorrection> {
        self.check_text_with_config(text, &SpellerConfig::default())
    }

    fn check_text_with_config(
        self: Arc<Self>,
        text: &str,
        config: &SpellerConfig,
    ) -> Vec<WordCorrection> {
        let mut corrections = Vec::new();
        let mut token_index = 0usize;

        // The single-space split is deliberately looser than the
        // tokenizer: replacement-by-index downstream re-splits the same
        // way, so empty items from runs of spaces still take an index.
        for line in text.lines() {
            for token in line.split(' ') {
                if let Some(original) = self.misspelled_token(token, config) {
                    corrections.push(WordCorrection {
                        original,
                        index: token_index,
                    });
                }
                token_index += 1;
            }
        }

        corrections
    }
}

impl DictionarySpeller {
    /// Creates a speller over a shared dictionary.
    pub fn new(dictionary: Arc<Dictionary>) -> Arc<DictionarySpeller> {
        Arc::new(DictionarySpeller { dictionary })
    }

    /// The dictionary this speller consults.
    pub fn dictionary(&self) -> &Arc<Dictionary> {
        &self.dictionary
    }

    /// Tokenizes `text` and classifies each word core against the
    /// dictionary, for callers that highlight spans rather than replace
    /// tokens by index.
    pub fn classify_words(&self, text: &str, config: &SpellerConfig) -> Vec<Word> {
        text.words(&config.punctuation)
            .map(|mut word| {
                if word.has_word() {
                    word.in_dictionary = Some(self.dictionary.contains(word.word(text)));
                }
                word
            })
            .collect()
    }

    /// Returns the stripped token when it should be reported as misspelled.
    fn misspelled_token(&self, token: &str, config: &SpellerConfig) -> Option<SmolStr> {
        if token.is_empty() || is_plain_number(token) {
            return None;
        }

        let (start, end, trailing_hyphen) = trim_punctuation(token, &config.punctuation);
        let word = &token[start..end];
        if word.is_empty() {
            return None;
        }

        if config.ignore_hyphen_terminated && (trailing_hyphen || word.ends_with('-')) {
            return None;
        }

        let lowered = lower_case(word);
        if self.dictionary.contains(&lowered) {
            return None;
        }

        if is_number_with_ordinal(&lowered) {
            return None;
        }

        // Hyphenated compounds pass when every part stands on its own.
        if word.contains('-') && lowered.split('-').all(|part| self.dictionary.contains(part)) {
            return None;
        }

        Some(SmolStr::new(word))
    }
}

/// Digits with optional comma group separators and decimal points.
fn is_plain_number(token: &str) -> bool {
    let mut has_digit = false;
    for ch in token.chars() {
        if ch.is_ascii_digit() {
            has_digit = true;
        } else if ch != ',' && ch != '.' {
            return false;
        }
    }
    has_digit
}

/// A plain number once any ordinal suffix ("st", "nd", "rd", "th") is
/// stripped, e.g. "21st" or a "3,500" freed of its punctuation.
fn is_number_with_ordinal(word: &str) -> bool {
    for suffix in ORDINAL_SUFFIXES {
        if word.ends_with(suffix) {
            return is_plain_number(&word[..word.len() - suffix.len()]);
        }
    }
    is_plain_number(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn speller(words: &[&str]) -> Arc<DictionarySpeller> {
        DictionarySpeller::new(Arc::new(Dictionary::from_words(words)))
    }

    #[test]
    fn reports_misspelling_with_token_index() {
        let corrections = speller(&["hello", "world"]).check_text("hello wrold");

        assert_eq!(
            corrections,
            vec![WordCorrection {
                original: SmolStr::new("wrold"),
                index: 1,
            }]
        );
    }

    #[test]
    fn clean_text_yields_no_corrections() {
        let speller = speller(&["hello", "world"]);
        assert!(speller.clone().check_text("hello world").is_empty());
        assert!(speller.check_text("hello world").is_empty());
    }

    #[test]
    fn numbers_are_never_misspelled() {
        let speller = speller(&[]);
        assert!(speller.clone().check_text("3,500").is_empty());
        assert!(speller.clone().check_text("21st").is_empty());
        assert!(speller.clone().check_text("3.14").is_empty());
        assert!(speller.check_text("\"3,500!\"").is_empty());
    }

    #[test]
    fn indices_count_across_lines_and_blanks() {
        let corrections = speller(&["one", "two"]).check_text("one xqz\n\ntwo zqx");

        // line 1 tokens: "one"(0) "xqz"(1); blank line: ""(2);
        // line 3 tokens: "two"(3) "zqx"(4)
        assert_eq!(corrections.len(), 2);
        assert_eq!(corrections[0].index, 1);
        assert_eq!(corrections[1].index, 4);
    }

    #[test]
    fn runs_of_spaces_still_advance_the_index() {
        let corrections = speller(&["one"]).check_text("one  xqz");

        assert_eq!(corrections.len(), 1);
        assert_eq!(corrections[0].index, 2);
    }

    #[test]
    fn punctuation_is_stripped_before_lookup() {
        let speller = speller(&["hello"]);
        assert!(speller.clone().check_text("\"hello!\"").is_empty());

        let corrections = speller.check_text("\"wrold!\"");
        assert_eq!(corrections[0].original, SmolStr::new("wrold"));
    }

    #[test]
    fn hyphen_terminated_words_are_skipped_when_configured() {
        let speller = speller(&[]);
        assert!(speller.clone().check_text("interrup-").is_empty());

        let config = SpellerConfig {
            ignore_hyphen_terminated: false,
            ..SpellerConfig::default()
        };
        let corrections = speller.check_text_with_config("interrup-", &config);
        assert_eq!(corrections.len(), 1);
    }

    #[test]
    fn hyphenated_compounds_need_every_part() {
        let speller = speller(&["well", "known"]);
        assert!(speller.clone().check_text("well-known").is_empty());

        let config = SpellerConfig {
            ignore_hyphen_terminated: false,
            ..SpellerConfig::default()
        };
        let corrections = speller.check_text_with_config("well-knwon", &config);
        assert_eq!(corrections.len(), 1);
        assert_eq!(corrections[0].original, SmolStr::new("well-knwon"));
    }

    #[test]
    fn adding_a_word_resolves_its_correction() {
        let speller = speller(&["hello"]);
        assert_eq!(speller.clone().check_text("hello wrold").len(), 1);

        speller.dictionary().add("wrold");
        assert!(speller.check_text("hello wrold").is_empty());
    }

    #[test]
    fn single_word_checks() {
        let speller = speller(&["hello"]);
        assert!(speller.clone().is_correct("hello"));
        assert!(speller.clone().is_correct("Hello!"));
        assert!(!speller.clone().is_correct("wrold"));
        assert!(speller.clone().is_correct(""));
        assert!(speller.is_correct("?!"));
    }

    #[test]
    fn suggestions_preserve_capitalization() {
        let speller = speller(&["world", "word"]);
        let suggestions = speller.suggest("Wrold").unwrap();

        assert!(!suggestions.is_empty());
        for suggestion in &suggestions {
            assert!(starts_upper_case(suggestion.value()));
        }
    }

    #[test]
    fn empty_word_fails_fast() {
        let speller = speller(&["hello"]);
        assert!(matches!(
            speller.suggest(""),
            Err(SuggestError::EmptyWord)
        ));
    }

    #[test]
    fn classify_words_fills_the_tri_state() {
        let speller = speller(&["hello"]);
        let config = SpellerConfig::default();
        let text = "hello wrold ?!";
        let words = speller.classify_words(text, &config);

        assert_eq!(words[0].in_dictionary, Some(true));
        assert_eq!(words[1].in_dictionary, Some(false));
        assert_eq!(words[2].in_dictionary, None);
    }
}
