//! Unified error type for Canopy.
//!
//! The façade itself never returns errors; this type covers setup (paths,
//! options, broker wiring) and callers that drive brokers directly.

use thiserror::Error;

use canopy_api::OptionsError;
use canopy_core::{CommitError, PathError, ReadError, RecordError};

/// All Canopy errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed path text
    #[error("invalid path: {0}")]
    Path(#[from] PathError),

    /// Options could not be loaded
    #[error(transparent)]
    Options(#[from] OptionsError),

    /// A write transaction failed
    #[error("commit failed: {0}")]
    Commit(#[from] CommitError),

    /// A read transaction failed
    #[error("read failed: {0}")]
    Read(#[from] ReadError),

    /// A record could not be encoded or decoded
    #[error(transparent)]
    Record(#[from] RecordError),

    /// Builder finished without a broker
    #[error("no broker configured")]
    NoBroker,
}

/// Result type for Canopy operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is retryable.
    ///
    /// Only an unreachable store is worth retrying; everything else fails the
    /// same way again.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Commit(e) => e.is_transient(),
            Error::Read(e) => matches!(e, ReadError::Unavailable { .. }),
            _ => false,
        }
    }

    /// Check if this is a setup error (path, options or wiring).
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Path(_) | Error::Options(_) | Error::NoBroker)
    }

    /// Check if the store reported this error.
    pub fn is_store(&self) -> bool {
        matches!(self, Error::Commit(_) | Error::Read(_))
    }
}

// Convert from serde_json errors
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Record(RecordError::Decode(e.to_string()))
    }
}
