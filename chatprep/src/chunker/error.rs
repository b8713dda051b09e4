//! Error types for chunking operations.

/// Errors that can occur while splitting text into chunks.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ChunkError {
    /// A chunk was requested at or past the end of the input text
    #[error("chunk start {start} is out of bounds for input of {len} bytes")]
    StartOutOfBounds {
        /// requested start offset
        start: usize,
        /// byte length of the input
        len: usize,
    },
}
