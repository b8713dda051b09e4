pub const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u'];

pub const CONSONANTS: &[char] = &[
    'b', 'c', 'd', 'f', 'g', 'h', 'j', 'k', 'l', 'm', 'n', 'p', 'q', 'r', 's', 't', 'v', 'w', 'x',
    'y', 'z',
];

pub const ALPHABET: &[char] = &[
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's',
    't', 'u', 'v', 'w', 'x', 'y', 'z',
];

pub const DEFAULT_PUNCTUATION: &[char] = &[
    '.', ',', '!', '?', ';', ':', '"', '\'', '(', ')', '[', ']', '-', '*', '_', '~',
];

pub const ORDINAL_SUFFIXES: &[&str] = &["st", "nd", "rd", "th"];

pub const OOC_START_TAG: &str = "((";
pub const OOC_END_TAG: &str = "))";

// Fixed byte allowance subtracted from the chunk budget when bracket
// wrapping is enabled. Covers both tag literals with two bytes of slack.
pub const BRACKET_RESERVE: usize = 6;

pub const MARKER_ORDINAL: &str = "%n";
pub const MARKER_TOTAL: &str = "%t";
