//! Core types and errors for Canopy
//!
//! This crate defines the vocabulary shared by brokers and the façade:
//! - [`Scope`]: logical partition (configuration / operational)
//! - [`DataPath`] and [`Path<R>`]: hierarchical addresses
//! - [`Record`] and [`Payload`]: typed values and their tree form
//! - [`CommitError`] and [`ReadError`]: what a store can report

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod path;
pub mod record;
pub mod types;

pub use error::{CommitError, PathError, ReadError, RecordError, ScopeParseError};
pub use path::{DataPath, Path, PathSegment};
pub use record::{decode_record, encode_record, Payload, Record};
pub use types::{Scope, TransactionStatus, TxnId};
