//! # Canopy
//!
//! Blocking, fail-soft access to transactional, scope-partitioned tree
//! stores.
//!
//! Each façade call opens one short-lived transaction against a
//! [`DataBroker`], stages one read or write, drives it to completion and
//! returns a plain outcome: `Option<R>` for reads, `bool` for writes.
//! Failures are logged with `tracing` and never propagate.
//!
//! ## Quick Start
//!
//! ```
//! use canopy::prelude::*;
//!
//! let facade = CanopyBuilder::new().in_memory().build().unwrap();
//! let path: Path<serde_json::Value> = Path::parse("/interfaces/eth0").unwrap();
//!
//! assert!(facade.put(Scope::Configuration, &path, &json!({"mtu": 1500})));
//! assert!(facade.merge(Scope::Configuration, &path, &json!({"up": true})));
//! assert_eq!(
//!     facade.read(Scope::Configuration, &path),
//!     Some(json!({"mtu": 1500, "up": true}))
//! );
//! assert!(facade.put_or_delete(Scope::Configuration, &path, None, false));
//! assert_eq!(facade.read(Scope::Configuration, &path), None);
//! ```
//!
//! ## Crates
//!
//! - `canopy-core`: scopes, paths, records, errors
//! - `canopy-broker`: the broker contract and [`InMemoryBroker`]
//! - `canopy-api`: [`StoreFacade`] and its options

#![warn(missing_docs)]

mod builder;
mod error;

pub mod prelude;

pub use builder::{in_memory, CanopyBuilder};
pub use error::{Error, Result};

pub use canopy_api::{ConditionalDeleteScope, FacadeOptions, OptionsError, StoreFacade};
pub use canopy_broker::{
    CommitInfo, DataBroker, FaultInjector, InMemoryBroker, InMemoryBrokerBuilder, JournalEntry,
    MetricsSnapshot, ModificationKind, ReadTransaction, WriteTransaction,
};
pub use canopy_core::{
    CommitError, DataPath, Path, PathError, Payload, ReadError, Record, RecordError, Scope,
    TransactionStatus, TxnId,
};
