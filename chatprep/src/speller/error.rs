//! Error types for suggestion generation.

/// Errors that can occur while generating spelling suggestions.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SuggestError {
    /// An empty word was passed to the suggestion generator
    #[error("cannot generate suggestions for an empty word")]
    EmptyWord,
}
