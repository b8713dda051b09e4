//! Word-boundary scanning over raw text buffers.

use std::borrow::Cow;

pub mod case_handling;

/// A word span over a text buffer.
///
/// `start_index..end_index` bounds the whole token including surrounding
/// punctuation; `word_index..word_index + word_length` bounds the
/// letters-only core after trimming punctuation from both ends. All
/// indices are byte offsets into the buffer the span was produced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word {
    /// start of the full token
    pub start_index: usize,
    /// end of the full token (exclusive)
    pub end_index: usize,
    /// start of the trimmed core
    pub word_index: usize,
    /// byte length of the trimmed core; `0` means no checkable word
    pub word_length: usize,
    /// whether the last trimmed trailing character was a hyphen
    pub hyphen_terminated: bool,
    /// dictionary classification; `None` until a speller has seen the span
    pub in_dictionary: Option<bool>,
}

impl Word {
    /// The full token slice, punctuation included.
    pub fn token<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start_index..self.end_index]
    }

    /// The trimmed core slice. Empty for all-punctuation tokens.
    pub fn word<'a>(&self, text: &'a str) -> &'a str {
        &text[self.word_index..self.word_index + self.word_length]
    }

    /// Whether the token has a non-empty core worth checking.
    pub fn has_word(&self) -> bool {
        self.word_length > 0
    }
}

/// Iterator over the [`Word`] spans of a buffer, left to right.
pub struct Words<'a> {
    text: &'a str,
    cursor: usize,
    punctuation: &'a [char],
}

impl<'a> Words<'a> {
    fn new(text: &'a str, punctuation: &'a [char]) -> Words<'a> {
        Words {
            text,
            cursor: 0,
            punctuation,
        }
    }
}

impl<'a> Iterator for Words<'a> {
    type Item = Word;

    fn next(&mut self) -> Option<Word> {
        let rest = &self.text[self.cursor..];
        let start = self.cursor + rest.find(|c: char| !c.is_whitespace())?;

        let end = match self.text[start..].find(char::is_whitespace) {
            Some(offset) => start + offset,
            None => self.text.len(),
        };
        self.cursor = end;

        let (word_start, word_end, hyphen_terminated) =
            trim_punctuation(&self.text[start..end], self.punctuation);

        Some(Word {
            start_index: start,
            end_index: end,
            word_index: start + word_start,
            word_length: word_end - word_start,
            hyphen_terminated,
            in_dictionary: None,
        })
    }
}

/// Iterator over `(byte_offset, core)` pairs for tokens with a non-empty
/// core, in buffer order.
pub struct WordIndices<'a> {
    words: Words<'a>,
}

impl<'a> Iterator for WordIndices<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<(usize, &'a str)> {
        let text = self.words.text;
        loop {
            let word = self.words.next()?;
            if word.has_word() {
                return Some((word.word_index, word.word(text)));
            }
        }
    }
}

/// Tokenization entry points, implemented for `str`.
pub trait Tokenize {
    /// All token spans of the buffer, punctuation trimmed against
    /// `punctuation`.
    fn words<'a>(&'a self, punctuation: &'a [char]) -> Words<'a>;

    /// Offsets and core slices of checkable words only.
    fn word_indices<'a>(&'a self, punctuation: &'a [char]) -> WordIndices<'a>;
}

impl Tokenize for str {
    fn words<'a>(&'a self, punctuation: &'a [char]) -> Words<'a> {
        Words::new(self, punctuation)
    }

    fn word_indices<'a>(&'a self, punctuation: &'a [char]) -> WordIndices<'a> {
        WordIndices {
            words: Words::new(self, punctuation),
        }
    }
}

/// Trims members of `punctuation` from both ends of `token`.
///
/// Returns the core bounds relative to the token, and whether the last
/// character trimmed from the trailing end was a hyphen. The flag reflects
/// only the final trimmed character, not any earlier one.
pub(crate) fn trim_punctuation(token: &str, punctuation: &[char]) -> (usize, usize, bool) {
    let mut start = 0;
    for ch in token.chars() {
        if !punctuation.contains(&ch) {
            break;
        }
        start += ch.len_utf8();
    }

    let mut end = token.len();
    let mut last_trimmed = None;
    for ch in token[start..].chars().rev() {
        if !punctuation.contains(&ch) {
            break;
        }
        end -= ch.len_utf8();
        last_trimmed = Some(ch);
    }

    (start, end, last_trimmed == Some('-'))
}

/// Joins soft-wrapped lines back together ahead of tokenizing or chunking.
///
/// `spaced_marker` followed by a newline collapses to a single space;
/// `no_space_marker` followed by a newline collapses to nothing. An empty
/// marker string disables that rule.
pub fn normalize_soft_wraps<'a>(
    text: &'a str,
    spaced_marker: &str,
    no_space_marker: &str,
) -> Cow<'a, str> {
    let spaced = (!spaced_marker.is_empty()).then(|| format!("{}\n", spaced_marker));
    let no_space = (!no_space_marker.is_empty()).then(|| format!("{}\n", no_space_marker));

    let needs_work = spaced.as_deref().map_or(false, |p| text.contains(p))
        || no_space.as_deref().map_or(false, |p| text.contains(p));
    if !needs_work {
        return Cow::Borrowed(text);
    }

    let mut out = text.to_string();
    if let Some(pattern) = no_space {
        out = out.replace(&pattern, "");
    }
    if let Some(pattern) = spaced {
        out = out.replace(&pattern, " ");
    }
    Cow::Owned(out)
}
