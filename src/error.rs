//! Error types for corefer.

use thiserror::Error;

/// Result type for corefer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for corefer operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A mention span is inconsistent with its sentence: empty span, head
    /// index outside the span, or span outside the sentence.
    #[error("Invalid mention span: {0}")]
    InvalidSpan(String),

    /// A mention id was registered twice in one document.
    #[error("Duplicate mention id: {0}")]
    DuplicateMention(u64),

    /// A cluster id is not present in the document registry.
    #[error("Unknown cluster id: {0}")]
    UnknownCluster(u64),

    /// A sentence index is out of range for the document.
    #[error("Sentence index {index} out of range: document has {len} sentences")]
    SentenceOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of sentences in the document.
        len: usize,
    },

    /// Malformed bracketed constituency tree input.
    #[error("Malformed parse tree: {0}")]
    MalformedTree(String),

    /// An alias resolver failed. Predicate callers degrade this to a
    /// non-match rather than propagating it.
    #[error("Semantics lookup failed: {0}")]
    Semantics(String),
}

impl Error {
    /// Create an invalid span error.
    pub fn invalid_span(msg: impl Into<String>) -> Self {
        Error::InvalidSpan(msg.into())
    }

    /// Create a malformed tree error.
    pub fn malformed_tree(msg: impl Into<String>) -> Self {
        Error::MalformedTree(msg.into())
    }

    /// Create a semantics lookup error.
    pub fn semantics(msg: impl Into<String>) -> Self {
        Error::Semantics(msg.into())
    }
}
