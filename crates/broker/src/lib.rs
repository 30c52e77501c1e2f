//! Data broker layer for Canopy
//!
//! This crate defines the contract a transactional tree store must satisfy
//! and ships an in-memory implementation:
//! - [`DataBroker`], [`ReadTransaction`], [`WriteTransaction`]: the contract
//! - [`Modification`]: staged writes
//! - [`InMemoryBroker`]: reference store with fault injection and metrics

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod memory;
pub mod metrics;
pub mod modification;
pub mod traits;

pub use memory::{FaultInjector, InMemoryBroker, InMemoryBrokerBuilder};
pub use metrics::{BrokerMetrics, MetricsSnapshot};
pub use modification::{JournalEntry, Modification, ModificationKind};
pub use traits::{
    CommitFuture, CommitInfo, DataBroker, ReadFuture, ReadTransaction, WriteTransaction,
};
