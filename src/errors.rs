use thiserror::Error;

use crate::items::StreamId;

/// Errors reported to the caller before any clustering work starts.
///
/// Broken internal invariants are not represented here: they abort the run
/// with a panic instead of producing a partial result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimilarityError {
    /// Clusters must contain at least one meaningful item
    #[error("Invalid configuration: minimum cluster size must be at least 1, got {0}")]
    InvalidMinimumClusterSize(usize),

    /// An item source produced a sentinel, which only the item store may
    /// insert between streams
    #[error(
        "Invalid input: stream {stream} yielded a sentinel item at position {position}, but \
         sentinels are reserved for stream boundaries"
    )]
    UnexpectedSentinel {
        /// The stream being populated
        stream: StreamId,
        /// The 0-based position of the offending item within the stream
        position: usize,
    },

    /// A line tokenizer pattern failed to compile
    #[error("Invalid ignore pattern `{pattern}`: {source}")]
    InvalidIgnorePattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
