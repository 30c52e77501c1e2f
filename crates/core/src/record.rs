//! Typed records and their tree payload form
//!
//! Brokers store [`Payload`] trees; callers deal in their own types. Any
//! serde type is a [`Record`].

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::RecordError;

/// Untyped tree stored at a path
pub type Payload = serde_json::Value;

/// A value that can be stored at a path
///
/// Implemented for every `Serialize + DeserializeOwned` type that can cross
/// threads.
pub trait Record: Serialize + DeserializeOwned + Send + Sync + 'static {}

impl<T> Record for T where T: Serialize + DeserializeOwned + Send + Sync + 'static {}

/// Encode a record into its payload tree
pub fn encode_record<R: Record>(record: &R) -> Result<Payload, RecordError> {
    serde_json::to_value(record).map_err(|e| RecordError::Encode(e.to_string()))
}

/// Decode a payload tree into a record
pub fn decode_record<R: Record>(payload: Payload) -> Result<R, RecordError> {
    serde_json::from_value(payload).map_err(|e| RecordError::Decode(e.to_string()))
}
