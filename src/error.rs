//! Error types shared by the persistence gateway and the slide deck.
//!
//! The style composer never fails; everything here is scoped to a single
//! save, load or deck edit and is recoverable by the caller.

use thiserror::Error;

/// Failures raised by a [`KeyValueStore`](crate::KeyValueStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The write would push the store past its byte quota.
    #[error("storage quota exceeded writing `{key}`: needed {needed} bytes, {available} available")]
    QuotaExceeded {
        key: String,
        needed: usize,
        available: usize,
    },
}

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Serialization of an in-memory value failed.
    #[error("failed to serialize: {0}")]
    Json(#[from] serde_json::Error),

    /// The backing store rejected a write.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Stored data exists but could not be parsed. The caller should keep
    /// going with default state.
    #[error("stored data under `{key}` may be corrupted: {source}")]
    Corrupted {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A slide index was outside the deck.
    #[error("slide index {index} out of range for {len} slides")]
    SlideIndex { index: usize, len: usize },

    /// The deck already holds the maximum number of slides.
    #[error("a presentation can hold at most {max} slides")]
    SlideLimit { max: usize },
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
