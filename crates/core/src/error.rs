//! Error types shared across Canopy crates
//!
//! | Error | Raised by | Meaning |
//! |-------|-----------|---------|
//! | [`CommitError`] | write transactions | the store did not apply staged writes |
//! | [`ReadError`] | read transactions | the store could not answer a read |
//! | [`RecordError`] | record codec | a record could not be encoded/decoded |
//! | [`PathError`] | path construction | malformed path text or segment |
//!
//! Errors carry rendered strings rather than source errors so they stay
//! `Clone + PartialEq`; fault injection replays the same error more than once.

use thiserror::Error;

use crate::types::TransactionStatus;

/// Errors from staging or committing a write transaction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommitError {
    /// The store refused the transaction
    #[error("commit rejected: {reason}")]
    Rejected {
        /// Reason given by the store
        reason: String,
    },

    /// A write targeted a path whose parent does not exist and parent
    /// creation was not requested
    #[error("parent of {path} does not exist")]
    MissingParent {
        /// The path that was written
        path: String,
    },

    /// A path segment traverses through a leaf value
    #[error("{path} is not a container")]
    NotContainer {
        /// The first non-container node on the way
        path: String,
    },

    /// The transaction was already submitted or cancelled
    #[error("transaction not active ({state})")]
    NotActive {
        /// State the transaction was in
        state: TransactionStatus,
    },

    /// The store could not be reached
    #[error("store unavailable: {reason}")]
    Unavailable {
        /// Reason given by the store
        reason: String,
    },

    /// Anything the store did not classify
    #[error("unexpected commit error: {message}")]
    Unexpected {
        /// Error message
        message: String,
    },
}

impl CommitError {
    /// Shorthand for [`CommitError::Rejected`]
    pub fn rejected(reason: impl Into<String>) -> Self {
        CommitError::Rejected {
            reason: reason.into(),
        }
    }

    /// Shorthand for [`CommitError::Unexpected`]
    pub fn unexpected(message: impl Into<String>) -> Self {
        CommitError::Unexpected {
            message: message.into(),
        }
    }

    /// Check if a retry against fresh state could succeed.
    ///
    /// Nothing in Canopy retries automatically; this is for callers.
    pub fn is_transient(&self) -> bool {
        matches!(self, CommitError::Unavailable { .. })
    }
}

/// Errors from a read transaction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    /// The store could not be reached
    #[error("store unavailable: {reason}")]
    Unavailable {
        /// Reason given by the store
        reason: String,
    },

    /// The read transaction was already closed
    #[error("read transaction closed")]
    Closed,

    /// The stored payload does not decode as the requested record type
    #[error("cannot decode record at {path}: {message}")]
    Decode {
        /// Path that was read
        path: String,
        /// Decoder message
        message: String,
    },
}

impl ReadError {
    /// Shorthand for [`ReadError::Unavailable`]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        ReadError::Unavailable {
            reason: reason.into(),
        }
    }
}

/// Record codec errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Record could not be turned into a payload
    #[error("record encode failed: {0}")]
    Encode(String),

    /// Payload could not be turned into a record
    #[error("record decode failed: {0}")]
    Decode(String),
}

/// Malformed path text or segment
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// Path text did not start with `/`
    #[error("path must be absolute: {0:?}")]
    NotAbsolute(String),

    /// Empty segment (e.g. `/a//b`)
    #[error("empty segment in path {0:?}")]
    EmptySegment(String),

    /// Segment contains a reserved character
    #[error("invalid segment {segment:?}: {reason}")]
    InvalidSegment {
        /// The rejected segment
        segment: String,
        /// Why it was rejected
        reason: &'static str,
    },
}

/// Unknown scope name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown scope: {0:?}")]
pub struct ScopeParseError(pub String);
