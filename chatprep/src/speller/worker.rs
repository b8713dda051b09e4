use std::sync::Arc;

use itertools::Itertools;
use smol_str::SmolStr;

use super::SpellerConfig;
use crate::constants::{ALPHABET, CONSONANTS, VOWELS};
use crate::dictionary::Dictionary;
use crate::speller::suggestion::{Strategy, Suggestion};

/// Runs the four candidate strategies for one lowercased input word and
/// merges their output in fixed priority order.
pub(crate) struct SuggestionWorker {
    dictionary: Arc<Dictionary>,
    input: SmolStr,
    config: SpellerConfig,
}

#[inline(always)]
fn letter_classes(ch: char) -> Option<(&'static [char], &'static [char])> {
    if VOWELS.contains(&ch) {
        Some((VOWELS, CONSONANTS))
    } else if CONSONANTS.contains(&ch) {
        Some((CONSONANTS, VOWELS))
    } else {
        None
    }
}

#[inline(always)]
fn collect_word(chars: &[char]) -> SmolStr {
    SmolStr::from(chars.iter().collect::<String>())
}

/// One application of the substitution/insertion transform.
///
/// Same-class substitutions are generated before cross-class ones so that
/// vowel-for-vowel (and consonant-for-consonant) candidates rank ahead,
/// then a single letter is grown at the front and at the end.
fn away_step(word: &str) -> Vec<SmolStr> {
    let chars: Vec<char> = word.chars().collect();
    let mut out = Vec::new();

    for pass in 0..2 {
        for (position, &ch) in chars.iter().enumerate() {
            let (same, cross) = match letter_classes(ch) {
                Some(classes) => classes,
                None => continue,
            };
            let letters = if pass == 0 { same } else { cross };

            for &letter in letters {
                let mut replaced = chars.clone();
                replaced[position] = letter;
                out.push(collect_word(&replaced));
            }
        }
    }

    for &letter in ALPHABET {
        out.push(SmolStr::from(format!("{}{}", letter, word)));
    }
    for &letter in ALPHABET {
        out.push(SmolStr::from(format!("{}{}", word, letter)));
    }

    out
}

impl SuggestionWorker {
    #[inline(always)]
    pub(crate) fn new(
        dictionary: Arc<Dictionary>,
        input: SmolStr,
        config: SpellerConfig,
    ) -> SuggestionWorker {
        SuggestionWorker {
            dictionary,
            input,
            config,
        }
    }

    #[inline(always)]
    fn keep(&self, candidate: &str) -> bool {
        !self.config.filter_candidates || self.dictionary.contains(candidate)
    }

    fn transpose(&self) -> Vec<Suggestion> {
        let chars: Vec<char> = self.input.chars().collect();
        let mut out = Vec::new();

        for position in 0..chars.len().saturating_sub(1) {
            let mut swapped = chars.clone();
            swapped.swap(position, position + 1);
            let candidate = collect_word(&swapped);

            if self.keep(&candidate) {
                out.push(Suggestion::new(candidate, Strategy::Transpose));
            }
        }

        out
    }

    fn away(&self) -> Vec<Suggestion> {
        let depth = self.config.away_depth;
        let mut out = Vec::new();

        let first_step = away_step(&self.input);
        for candidate in &first_step {
            if self.keep(candidate) {
                out.push(Suggestion::new(candidate.clone(), Strategy::Away));
            }
        }

        if depth > 1 {
            // The transform recurses exactly one level, over every depth-1
            // candidate. The recursion filter flag is `depth > 2`: depths
            // beyond 2 keep the same 2-edit neighborhood and only relax
            // dictionary filtering.
            let relaxed = depth > 2;
            for candidate in &first_step {
                for second in away_step(candidate) {
                    if relaxed || self.keep(&second) {
                        out.push(Suggestion::new(second, Strategy::Away));
                    }
                }
            }
        }

        out
    }

    fn splits(&self) -> Vec<Suggestion> {
        let chars: Vec<char> = self.input.chars().collect();
        let mut out = Vec::new();

        for split in 1..chars.len() {
            let left = collect_word(&chars[..split]);
            let right = collect_word(&chars[split..]);

            if self.dictionary.contains(&left) && self.dictionary.contains(&right) {
                let candidate = SmolStr::from(format!("{} {}", left, right));
                out.push(Suggestion::new(candidate, Strategy::Splits));
            }
        }

        out
    }

    fn deletes(&self) -> Vec<Suggestion> {
        let chars: Vec<char> = self.input.chars().collect();
        let mut out = Vec::new();

        if chars.len() < 2 {
            return out;
        }

        for position in 0..chars.len() {
            let mut deleted = chars.clone();
            deleted.remove(position);
            let candidate = collect_word(&deleted);

            if self.keep(&candidate) {
                out.push(Suggestion::new(candidate, Strategy::Deletes));
            }
        }

        out
    }

    /// Runs all strategies on worker threads, joins them all, and merges in
    /// strategy priority order regardless of completion order.
    pub(crate) fn suggest(&self) -> Vec<Suggestion> {
        log::trace!("Beginning suggest for {}", self.input);

        let (transpose, away, splits, deletes) = std::thread::scope(|scope| {
            let transpose = scope.spawn(|| self.transpose());
            let away = scope.spawn(|| self.away());
            let splits = scope.spawn(|| self.splits());
            let deletes = scope.spawn(|| self.deletes());

            (
                transpose.join().unwrap(),
                away.join().unwrap(),
                splits.join().unwrap(),
                deletes.join().unwrap(),
            )
        });

        log::trace!(
            "Strategy candidates: transpose {}, away {}, splits {}, deletes {}",
            transpose.len(),
            away.len(),
            splits.len(),
            deletes.len()
        );

        transpose
            .into_iter()
            .chain(away)
            .chain(splits)
            .chain(deletes)
            .unique_by(|suggestion| suggestion.value.clone())
            .take(self.config.max_suggestions)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn worker(words: &[&str], input: &str) -> SuggestionWorker {
        SuggestionWorker::new(
            Arc::new(Dictionary::from_words(words)),
            SmolStr::new(input),
            SpellerConfig::default(),
        )
    }

    #[test]
    fn transpose_finds_adjacent_swaps() {
        let suggestions = worker(&["cat"], "cta").transpose();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].value(), "cat");
    }

    #[test]
    fn away_substitutes_within_class_first() {
        let step = away_step("bat");
        // same-class pass: a -> e; cross-class pass: a -> b
        let same_class = step.iter().position(|c| c == "bet").unwrap();
        let cross_class = step.iter().position(|c| c == "bbt").unwrap();
        assert!(same_class < cross_class);
    }

    #[test]
    fn away_grows_letters_at_either_edge() {
        let step = away_step("art");
        assert!(step.iter().any(|c| c == "cart"));
        assert!(step.iter().any(|c| c == "arts"));
    }

    #[test]
    fn away_reaches_two_edit_neighbors_at_default_depth() {
        let suggestions = worker(&["crate"], "brite").away();
        // brite -> brate (substitution) -> crate (substitution)
        assert!(suggestions.iter().any(|s| s.value() == "crate"));
    }

    #[test]
    fn away_depth_one_stays_within_one_edit() {
        let dictionary = Arc::new(Dictionary::from_words(["crate"]));
        let config = SpellerConfig {
            away_depth: 1,
            ..SpellerConfig::default()
        };
        let worker = SuggestionWorker::new(dictionary, SmolStr::new("brite"), config);
        assert!(worker.away().is_empty());
    }

    #[test]
    fn splits_require_both_halves() {
        let suggestions = worker(&["book", "case"], "bookcase").splits();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].value(), "book case");

        assert!(worker(&["book"], "bookcase").splits().is_empty());
    }

    #[test]
    fn deletes_drop_single_characters() {
        let suggestions = worker(&["cat"], "caat").deletes();
        assert_eq!(suggestions.len(), 2);
        assert!(suggestions.iter().all(|s| s.value() == "cat"));
    }

    #[test]
    fn merge_order_is_strategy_priority() {
        // "cat" is reachable by transposing "cta"; "ca" only by deletion.
        let merged = worker(&["cat", "ca"], "cta").suggest();
        let cat = merged.iter().position(|s| s.value() == "cat").unwrap();
        let ca = merged.iter().position(|s| s.value() == "ca").unwrap();
        assert!(cat < ca);
        assert_eq!(merged[cat].strategy(), Strategy::Transpose);
        assert_eq!(merged[ca].strategy(), Strategy::Deletes);
    }

    #[test]
    fn merge_dedups_on_highest_priority_occurrence() {
        // "cat" is reachable by transpose and by away; only the transpose
        // entry survives the merge.
        let merged = worker(&["cat"], "cta").suggest();
        let occurrences = merged.iter().filter(|s| s.value() == "cat").count();
        assert_eq!(occurrences, 1);
        assert_eq!(merged[0].strategy(), Strategy::Transpose);
    }

    #[test]
    fn merge_respects_max_results() {
        let dictionary = Arc::new(Dictionary::from_words(["cat", "cot", "cut", "coat"]));
        let config = SpellerConfig {
            max_suggestions: 2,
            ..SpellerConfig::default()
        };
        let worker = SuggestionWorker::new(dictionary, SmolStr::new("czt"), config);
        assert!(worker.suggest().len() <= 2);
    }
}
