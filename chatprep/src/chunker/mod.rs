//! Byte-budgeted splitting of long text into transmittable chunks.

use serde::{Deserialize, Serialize};

use self::error::ChunkError;
use crate::constants::{BRACKET_RESERVE, MARKER_ORDINAL, MARKER_TOTAL, OOC_END_TAG, OOC_START_TAG};

pub mod error;

/// Formatting inputs for one chunking request, passed as values.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChunkConfig {
    /// chat-route prefix prepended to every chunk, e.g. "/say"
    pub header: String,
    /// wrap every chunk's text in out-of-character bracket tags
    pub wrap_in_brackets: bool,
    /// continuation-marker template; `%n` is the chunk ordinal, `%t` the
    /// total chunk count
    pub continuation_template: String,
    /// render the marker on the last chunk too
    pub mark_last: bool,
    /// transmission limit in bytes for a complete chunk
    pub byte_budget_base: usize,
    /// prefer cutting after a sentence end over the nearest space
    pub break_on_sentence: bool,
    /// characters that mark the end of a sentence
    pub sentence_terminators: Vec<char>,
    /// quoting characters that may sit between a terminator and the space
    pub encapsulation_chars: Vec<char>,
}

impl Default for ChunkConfig {
    fn default() -> ChunkConfig {
        ChunkConfig {
            header: String::new(),
            wrap_in_brackets: false,
            continuation_template: "(%n/%t)".to_string(),
            mark_last: false,
            byte_budget_base: 255,
            break_on_sentence: true,
            sentence_terminators: vec!['.', '!', '?'],
            encapsulation_chars: vec!['"', '\'', ')', ']'],
        }
    }
}

/// One outgoing message unit. Immutable once produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChunk {
    /// chat-route prefix
    pub header: String,
    /// the slice of user content assigned to this chunk
    pub text: String,
    /// opening bracket literal, empty when wrapping is off
    pub ooc_start_tag: String,
    /// closing bracket literal, empty when wrapping is off
    pub ooc_end_tag: String,
    /// rendered trailer such as "(1/3)", empty on an unmarked chunk
    pub continuation_marker: String,
}

impl TextChunk {
    /// The transmit-ready concatenation of all elements, each omitted when
    /// empty.
    pub fn complete_text(&self) -> String {
        let mut out = String::with_capacity(
            self.header.len()
                + self.text.len()
                + self.ooc_start_tag.len()
                + self.ooc_end_tag.len()
                + self.continuation_marker.len()
                + 2,
        );

        if !self.header.is_empty() {
            out.push_str(&self.header);
            out.push(' ');
        }
        out.push_str(&self.ooc_start_tag);
        out.push_str(&self.text);
        out.push_str(&self.ooc_end_tag);
        if !self.continuation_marker.is_empty() {
            out.push(' ');
            out.push_str(&self.continuation_marker);
        }

        out
    }
}

struct Cut {
    /// byte length of the emitted piece
    end: usize,
    /// bytes to advance past, including any consumed cut space
    advance: usize,
}

/// The per-chunk text budget, computed once per call.
///
/// The marker template is measured un-rendered, so chunks whose rendered
/// ordinals are wider than the placeholders all share the same budget.
fn effective_budget(config: &ChunkConfig) -> usize {
    let mut overhead = config.header.len() + 1;
    overhead += config.continuation_template.len();
    if config.wrap_in_brackets {
        overhead += BRACKET_RESERVE;
    }
    config.byte_budget_base.saturating_sub(overhead)
}

fn render_marker(template: &str, ordinal: usize, total: usize) -> String {
    template
        .replace(MARKER_ORDINAL, &ordinal.to_string())
        .replace(MARKER_TOTAL, &total.to_string())
}

/// Finds the cut point for a window that is known to exceed `budget`.
fn scan_cut(rest: &str, budget: usize, config: &ChunkConfig) -> Cut {
    let mut last_space = None;
    let mut last_sentence_break = None;
    let mut prev = None;
    let mut prev_prev = None;
    let mut last_fitting = 0;

    for (position, ch) in rest.char_indices() {
        let grown = position + ch.len_utf8();
        if grown > budget {
            // Back off one character. A space exactly at the cut boundary
            // needs no backtracking.
            if ch == ' ' {
                return Cut {
                    end: position,
                    advance: position + 1,
                };
            }

            let break_at = if config.break_on_sentence {
                last_sentence_break.or(last_space)
            } else {
                last_space
            };

            return match break_at {
                Some(space) => Cut {
                    end: space,
                    advance: space + 1,
                },
                None => {
                    // Mid-word hard cut, last resort. Take at least one
                    // character so the scan always advances.
                    let end = if last_fitting == 0 { grown } else { last_fitting };
                    Cut { end, advance: end }
                }
            };
        }
        last_fitting = grown;

        if ch == ' ' {
            last_space = Some(position);
            let after_sentence = match (prev, prev_prev) {
                (Some(p), _) if config.sentence_terminators.contains(&p) => true,
                (Some(p), Some(pp)) => {
                    config.encapsulation_chars.contains(&p)
                        && config.sentence_terminators.contains(&pp)
                }
                _ => false,
            };
            if after_sentence {
                last_sentence_break = Some(position);
            }
        }

        prev_prev = prev;
        prev = Some(ch);
    }

    // unreachable for windows longer than the budget; emit everything
    Cut {
        end: rest.len(),
        advance: rest.len(),
    }
}

/// Splits `text` into transmittable chunks under `config`'s byte budget.
///
/// Cuts prefer a space whose preceding character ends a sentence, then any
/// space, and fall back to a mid-word cut only when the window contains no
/// space at all. Chunking an empty text is a contract violation.
pub fn chunk(config: &ChunkConfig, text: &str) -> Result<Vec<TextChunk>, ChunkError> {
    if text.is_empty() {
        return Err(ChunkError::StartOutOfBounds { start: 0, len: 0 });
    }

    let budget = effective_budget(config);
    log::trace!(
        "chunking {} bytes with an effective budget of {}",
        text.len(),
        budget
    );

    let mut pieces = Vec::new();
    let mut offset = 0;
    while offset < text.len() {
        let rest = &text[offset..];
        if rest.len() <= budget {
            pieces.push(rest);
            break;
        }

        let cut = scan_cut(rest, budget, config);
        pieces.push(&rest[..cut.end]);
        offset += cut.advance;
    }

    let total = pieces.len();
    Ok(pieces
        .into_iter()
        .enumerate()
        .map(|(index, piece)| {
            let marked = index + 1 < total || config.mark_last;
            TextChunk {
                header: config.header.clone(),
                text: piece.to_string(),
                ooc_start_tag: if config.wrap_in_brackets {
                    OOC_START_TAG.to_string()
                } else {
                    String::new()
                },
                ooc_end_tag: if config.wrap_in_brackets {
                    OOC_END_TAG.to_string()
                } else {
                    String::new()
                },
                continuation_marker: if marked {
                    render_marker(&config.continuation_template, index + 1, total)
                } else {
                    String::new()
                },
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_config(byte_budget_base: usize) -> ChunkConfig {
        ChunkConfig {
            continuation_template: String::new(),
            byte_budget_base,
            ..ChunkConfig::default()
        }
    }

    #[test]
    fn long_text_splits_within_budget() {
        let config = ChunkConfig {
            header: "/say".to_string(),
            byte_budget_base: 500,
            ..ChunkConfig::default()
        };
        let text = "word ".repeat(240);
        assert_eq!(text.len(), 1200);

        let chunks = chunk(&config, &text).unwrap();
        assert!(chunks.len() >= 3);

        for chunk in &chunks {
            assert!(chunk.complete_text().len() <= config.byte_budget_base);
        }

        let last = chunks.last().unwrap();
        assert!(last.continuation_marker.is_empty());
        for chunk in &chunks[..chunks.len() - 1] {
            assert!(!chunk.continuation_marker.is_empty());
        }
    }

    #[test]
    fn concatenated_chunks_reconstruct_the_text() {
        let config = ChunkConfig {
            header: "/say".to_string(),
            byte_budget_base: 500,
            ..ChunkConfig::default()
        };
        let text = "word ".repeat(240);

        let chunks = chunk(&config, &text).unwrap();
        let rebuilt = chunks
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn prefers_sentence_breaks_when_enabled() {
        let text = "One two. Three four five";

        let mut config = bare_config(19);
        let chunks = chunk(&config, text).unwrap();
        assert_eq!(chunks[0].text, "One two.");
        assert_eq!(chunks[1].text, "Three four five");

        config.break_on_sentence = false;
        let chunks = chunk(&config, text).unwrap();
        assert_eq!(chunks[0].text, "One two. Three");
    }

    #[test]
    fn boundary_space_needs_no_backtracking() {
        // the character exactly at the cut boundary is a space, so the cut
        // lands there even though a sentence break was seen earlier
        let text = "One two. Three four five";
        let config = bare_config(20);

        let chunks = chunk(&config, text).unwrap();
        assert_eq!(chunks[0].text, "One two. Three four");
    }

    #[test]
    fn sentence_break_looks_through_encapsulation() {
        let text = "He said \"Go home.\" Then he left again";
        let config = bare_config(22);

        let chunks = chunk(&config, text).unwrap();
        assert_eq!(chunks[0].text, "He said \"Go home.\"");
    }

    #[test]
    fn hard_cut_without_spaces() {
        let config = bare_config(5);
        let chunks = chunk(&config, "abcdefghij").unwrap();

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["abcd", "efgh", "ij"]);
        assert_eq!(texts.concat(), "abcdefghij");
    }

    #[test]
    fn hard_cut_respects_char_boundaries() {
        let config = bare_config(6);
        let chunks = chunk(&config, "ééééé").unwrap();

        for chunk in &chunks {
            assert!(chunk.text.len() <= 5);
            assert!(!chunk.text.is_empty());
        }
        let rebuilt: String = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(rebuilt, "ééééé");
    }

    #[test]
    fn markers_render_ordinal_and_total() {
        let config = ChunkConfig {
            byte_budget_base: 17,
            ..ChunkConfig::default()
        };
        let chunks = chunk(&config, "aaaa bbbb cccc dddd eeee").unwrap();

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].continuation_marker, "(1/3)");
        assert_eq!(chunks[1].continuation_marker, "(2/3)");
        assert_eq!(chunks[2].continuation_marker, "");
    }

    #[test]
    fn mark_last_extends_to_the_final_chunk() {
        let config = ChunkConfig {
            mark_last: true,
            ..ChunkConfig::default()
        };
        let chunks = chunk(&config, "short message").unwrap();

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].continuation_marker, "(1/1)");
    }

    #[test]
    fn bracket_wrapping_tags_and_budget() {
        let config = ChunkConfig {
            header: "/ooc".to_string(),
            wrap_in_brackets: true,
            mark_last: true,
            ..ChunkConfig::default()
        };
        let chunks = chunk(&config, "aside to the game master").unwrap();

        assert_eq!(chunks.len(), 1);
        assert_eq!(
            chunks[0].complete_text(),
            "/ooc ((aside to the game master)) (1/1)"
        );
        assert!(chunks[0].complete_text().len() <= config.byte_budget_base);
    }

    #[test]
    fn complete_text_omits_empty_elements() {
        let chunk = TextChunk {
            header: String::new(),
            text: "bare".to_string(),
            ooc_start_tag: String::new(),
            ooc_end_tag: String::new(),
            continuation_marker: String::new(),
        };
        assert_eq!(chunk.complete_text(), "bare");
    }

    #[test]
    fn short_text_is_a_single_unmarked_chunk() {
        let chunks = chunk(&ChunkConfig::default(), "hello world").unwrap();

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "hello world");
        assert_eq!(chunks[0].continuation_marker, "");
    }

    #[test]
    fn empty_text_is_a_contract_violation() {
        assert!(matches!(
            chunk(&ChunkConfig::default(), ""),
            Err(ChunkError::StartOutOfBounds { start: 0, len: 0 })
        ));
    }
}
