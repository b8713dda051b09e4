/*! Preparing chat text for byte-limited transmission.

Splits long messages into byte-bounded chunks cut at linguistically
sensible boundaries, and checks spelling against a plain word-set
dictionary with ranked replacement suggestions.

# Usage examples

```
use std::sync::Arc;

use chatprep::dictionary::Dictionary;
use chatprep::speller::{DictionarySpeller, Speller};

let dictionary = Arc::new(Dictionary::from_words(["hello", "world"]));
let speller = DictionarySpeller::new(dictionary);

let corrections = speller.clone().check_text("hello wrold");
assert_eq!(corrections[0].original, "wrold");

let suggestions = speller.suggest("wrold").unwrap();
assert_eq!(suggestions[0].value(), "world");
```

Chunking is a free function over a value config:

```
use chatprep::chunker::{chunk, ChunkConfig};

let config = ChunkConfig {
    header: "/say".to_string(),
    byte_budget_base: 500,
    ..ChunkConfig::default()
};
let chunks = chunk(&config, "a message well under budget").unwrap();
assert_eq!(chunks.len(), 1);
```
*/

#![warn(missing_docs)]

pub mod chunker;
pub mod dictionary;
pub mod speller;
pub mod tokenizer;

pub(crate) mod constants;
