//! In-memory data broker
//!
//! Reference implementation of [`DataBroker`] used by tests, benches and
//! embedded callers that do not need durability.
//!
//! # Design
//!
//! - One JSON tree per [`Scope`], held in a `DashMap` so reads of different
//!   partitions never contend
//! - Commits are serialized by a commit lock; a transaction's modifications
//!   are applied to working copies of the touched partitions and only
//!   published if every modification succeeds (all-or-nothing)
//! - A global version is bumped once per successful commit
//! - Reads copy the requested subtree at the moment `read` is called
//!
//! # Commit Sequence
//!
//! ```text
//! 1. Acquire commit lock
//! 2. Consume an injected fault, if any → Failed
//! 3. Clone each touched partition
//! 4. Apply modifications in staging order → Failed on first error
//! 5. Allocate commit version
//! 6. Publish working copies, append journal entries
//! 7. Release commit lock → Committed
//! ```
//!
//! Publishing touches partitions one at a time, so a reader that reads two
//! scopes back to back can observe a multi-scope commit half applied.
//! Single-scope reads always see either the old or the new tree.

mod faults;
mod tree;

pub use faults::FaultInjector;

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use canopy_core::{
    CommitError, DataPath, Payload, ReadError, Scope, TransactionStatus, TxnId,
};
use dashmap::DashMap;
use futures::future::{self, FutureExt};
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::metrics::{BrokerMetrics, MetricsSnapshot};
use crate::modification::{JournalEntry, Modification, ModificationKind};
use crate::traits::{
    CommitFuture, CommitInfo, DataBroker, ReadFuture, ReadTransaction, WriteTransaction,
};

/// In-memory broker
///
/// Clones share the same store, so a test can keep one handle for
/// inspection while a façade holds another.
///
/// # Example
///
/// ```
/// use canopy_broker::{DataBroker, InMemoryBroker};
/// use canopy_core::{DataPath, Scope};
/// use futures::executor::block_on;
///
/// let broker = InMemoryBroker::new();
/// let path = DataPath::parse("/a/b").unwrap();
///
/// let mut txn = broker.new_write_only_transaction();
/// txn.put(Scope::Configuration, &path, serde_json::json!({"x": 1}), true).unwrap();
/// block_on(txn.submit()).unwrap();
///
/// let read = broker.new_read_only_transaction();
/// let value = block_on(read.read(Scope::Configuration, &path)).unwrap();
/// assert_eq!(value, Some(serde_json::json!({"x": 1})));
/// ```
#[derive(Clone)]
pub struct InMemoryBroker {
    shared: Arc<Shared>,
}

struct Shared {
    /// One tree per scope, absent until first written and again after the
    /// root is deleted
    partitions: DashMap<Scope, Payload>,

    /// Serializes validation, apply and publish of commits
    commit_lock: Mutex<()>,

    /// Global version, bumped once per successful commit
    version: AtomicU64,

    /// Next transaction ID
    next_txn_id: AtomicU64,

    faults: FaultInjector,
    metrics: BrokerMetrics,

    /// Committed modifications, when journaling is enabled
    journal: Option<Mutex<Vec<JournalEntry>>>,
}

impl Default for InMemoryBroker {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBroker {
    /// Create an empty broker with journaling off
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a builder for broker configuration
    pub fn builder() -> InMemoryBrokerBuilder {
        InMemoryBrokerBuilder::new()
    }

    /// Fault injection controls
    pub fn faults(&self) -> &FaultInjector {
        &self.shared.faults
    }

    /// Current activity counters
    pub fn metrics(&self) -> MetricsSnapshot {
        self.shared.metrics.snapshot()
    }

    /// Version produced by the latest successful commit
    pub fn current_version(&self) -> u64 {
        self.shared.version.load(Ordering::SeqCst)
    }

    /// Copy of a whole partition (an empty object if it holds nothing)
    pub fn snapshot(&self, scope: Scope) -> Payload {
        self.partition(scope).unwrap_or_else(tree::empty)
    }

    /// Whether anything is stored in `scope`, including an empty root
    pub fn has_partition(&self, scope: Scope) -> bool {
        self.shared.partitions.contains_key(&scope)
    }

    fn partition(&self, scope: Scope) -> Option<Payload> {
        self.shared
            .partitions
            .get(&scope)
            .map(|entry| entry.value().clone())
    }

    /// Committed modifications in commit order
    ///
    /// Always empty when the broker was built without journaling.
    pub fn journal(&self) -> Vec<JournalEntry> {
        self.shared
            .journal
            .as_ref()
            .map(|journal| journal.lock().clone())
            .unwrap_or_default()
    }

    /// Whether committed modifications are being journaled
    pub fn is_journaling(&self) -> bool {
        self.shared.journal.is_some()
    }

    fn allocate_txn_id(&self) -> TxnId {
        TxnId(self.shared.next_txn_id.fetch_add(1, Ordering::SeqCst))
    }

    fn read_at(&self, scope: Scope, path: &DataPath) -> Result<Option<Payload>, ReadError> {
        if let Some(fault) = self.shared.faults.take_read_fault() {
            self.shared.metrics.read(false);
            return Err(fault);
        }
        let value = self
            .shared
            .partitions
            .get(&scope)
            .and_then(|partition| tree::get(Some(partition.value()), path));
        self.shared.metrics.read(true);
        Ok(value)
    }

    fn commit(
        &self,
        txn_id: TxnId,
        staged: Vec<Modification>,
    ) -> Result<CommitInfo, CommitError> {
        let _commit_guard = self.shared.commit_lock.lock();

        let result = self.apply_locked(txn_id, staged);
        self.shared.metrics.commit(result.is_ok());
        match &result {
            Ok(info) => debug!(txn = %txn_id, version = info.version, "commit applied"),
            Err(e) => debug!(txn = %txn_id, error = %e, "commit failed"),
        }
        result
    }

    /// Apply and publish. Caller holds the commit lock.
    fn apply_locked(
        &self,
        txn_id: TxnId,
        staged: Vec<Modification>,
    ) -> Result<CommitInfo, CommitError> {
        if let Some(fault) = self.shared.faults.take_commit_fault() {
            return Err(fault);
        }

        let touched: Vec<(Scope, DataPath, ModificationKind)> = if self.is_journaling() {
            staged
                .iter()
                .map(|m| (m.scope(), m.path().clone(), m.kind()))
                .collect()
        } else {
            Vec::new()
        };

        let mut working: BTreeMap<Scope, Option<Payload>> = BTreeMap::new();
        for modification in staged {
            let scope = modification.scope();
            let partition = working.entry(scope).or_insert_with(|| self.partition(scope));
            match modification {
                Modification::Put {
                    path,
                    data,
                    create_parents,
                    ..
                } => tree::put(partition, &path, data, create_parents)?,
                Modification::Merge {
                    path,
                    data,
                    create_parents,
                    ..
                } => tree::merge(partition, &path, data, create_parents)?,
                Modification::Delete { path, .. } => {
                    let removed = tree::delete(partition, &path);
                    trace!(txn = %txn_id, %scope, %path, removed, "delete applied");
                }
            }
        }

        let version = self.shared.version.fetch_add(1, Ordering::SeqCst) + 1;
        for (scope, partition) in working {
            match partition {
                Some(tree) => {
                    self.shared.partitions.insert(scope, tree);
                }
                None => {
                    self.shared.partitions.remove(&scope);
                }
            }
        }

        if let Some(journal) = &self.shared.journal {
            let mut journal = journal.lock();
            journal.extend(touched.into_iter().map(|(scope, path, kind)| JournalEntry {
                txn_id,
                version,
                scope,
                path,
                kind,
            }));
        }

        Ok(CommitInfo { txn_id, version })
    }
}

impl DataBroker for InMemoryBroker {
    fn new_read_only_transaction(&self) -> Box<dyn ReadTransaction> {
        self.shared.metrics.read_opened();
        let id = self.allocate_txn_id();
        trace!(txn = %id, "read transaction opened");
        Box::new(MemoryReadTransaction {
            broker: self.clone(),
            id,
            status: TransactionStatus::Open,
        })
    }

    fn new_write_only_transaction(&self) -> Box<dyn WriteTransaction> {
        self.shared.metrics.write_opened();
        let id = self.allocate_txn_id();
        trace!(txn = %id, "write transaction opened");
        Box::new(MemoryWriteTransaction {
            broker: self.clone(),
            id,
            status: TransactionStatus::Open,
            staged: Vec::new(),
        })
    }
}

/// Builder for [`InMemoryBroker`]
///
/// ```
/// use canopy_broker::InMemoryBroker;
/// use canopy_core::Scope;
///
/// let broker = InMemoryBroker::builder()
///     .journal(true)
///     .seed(Scope::Operational, serde_json::json!({"nodes": {}}))
///     .build();
/// assert!(broker.is_journaling());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryBrokerBuilder {
    journal: bool,
    initial_version: u64,
    seeds: Vec<(Scope, Payload)>,
}

impl InMemoryBrokerBuilder {
    /// Create a builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every committed modification (see [`InMemoryBroker::journal`])
    pub fn journal(mut self, enabled: bool) -> Self {
        self.journal = enabled;
        self
    }

    /// Starting store version
    pub fn initial_version(mut self, version: u64) -> Self {
        self.initial_version = version;
        self
    }

    /// Preload a partition's tree
    pub fn seed(mut self, scope: Scope, tree: Payload) -> Self {
        self.seeds.push((scope, tree));
        self
    }

    /// Build the broker
    pub fn build(self) -> InMemoryBroker {
        let partitions = DashMap::new();
        for (scope, tree) in self.seeds {
            partitions.insert(scope, tree);
        }
        InMemoryBroker {
            shared: Arc::new(Shared {
                partitions,
                commit_lock: Mutex::new(()),
                version: AtomicU64::new(self.initial_version),
                next_txn_id: AtomicU64::new(1),
                faults: FaultInjector::new(),
                metrics: BrokerMetrics::new(),
                journal: self.journal.then(|| Mutex::new(Vec::new())),
            }),
        }
    }
}

struct MemoryReadTransaction {
    broker: InMemoryBroker,
    id: TxnId,
    status: TransactionStatus,
}

impl ReadTransaction for MemoryReadTransaction {
    fn id(&self) -> TxnId {
        self.id
    }

    fn status(&self) -> TransactionStatus {
        self.status
    }

    fn read(&self, scope: Scope, path: &DataPath) -> ReadFuture {
        let result = if self.status.is_open() {
            self.broker.read_at(scope, path)
        } else {
            Err(ReadError::Closed)
        };
        future::ready(result).boxed()
    }

    fn close(&mut self) {
        if self.status.is_open() {
            self.status = TransactionStatus::Cancelled;
            self.broker.shared.metrics.read_released();
            trace!(txn = %self.id, "read transaction closed");
        }
    }
}

impl Drop for MemoryReadTransaction {
    fn drop(&mut self) {
        self.close();
    }
}

struct MemoryWriteTransaction {
    broker: InMemoryBroker,
    id: TxnId,
    status: TransactionStatus,
    staged: Vec<Modification>,
}

impl MemoryWriteTransaction {
    fn stage(&mut self, modification: Modification) -> Result<(), CommitError> {
        if !self.status.is_open() {
            return Err(CommitError::NotActive { state: self.status });
        }
        self.broker.shared.metrics.staged(modification.kind());
        self.staged.push(modification);
        Ok(())
    }
}

impl WriteTransaction for MemoryWriteTransaction {
    fn id(&self) -> TxnId {
        self.id
    }

    fn status(&self) -> TransactionStatus {
        self.status
    }

    fn put(
        &mut self,
        scope: Scope,
        path: &DataPath,
        data: Payload,
        create_parents: bool,
    ) -> Result<(), CommitError> {
        self.stage(Modification::Put {
            scope,
            path: path.clone(),
            data,
            create_parents,
        })
    }

    fn merge(
        &mut self,
        scope: Scope,
        path: &DataPath,
        data: Payload,
        create_parents: bool,
    ) -> Result<(), CommitError> {
        self.stage(Modification::Merge {
            scope,
            path: path.clone(),
            data,
            create_parents,
        })
    }

    fn delete(&mut self, scope: Scope, path: &DataPath) -> Result<(), CommitError> {
        self.stage(Modification::Delete {
            scope,
            path: path.clone(),
        })
    }

    fn submit(&mut self) -> CommitFuture {
        if !self.status.is_open() {
            let state = self.status;
            return future::ready(Err(CommitError::NotActive { state })).boxed();
        }

        self.status = TransactionStatus::Submitted;
        let staged = std::mem::take(&mut self.staged);
        let result = self.broker.commit(self.id, staged);
        self.status = if result.is_ok() {
            TransactionStatus::Committed
        } else {
            TransactionStatus::Failed
        };
        future::ready(result).boxed()
    }

    fn cancel(&mut self) -> bool {
        if !self.status.is_open() {
            return false;
        }
        self.status = TransactionStatus::Cancelled;
        self.staged.clear();
        self.broker.shared.metrics.cancelled();
        trace!(txn = %self.id, "write transaction cancelled");
        true
    }
}

impl Drop for MemoryWriteTransaction {
    fn drop(&mut self) {
        if self.status.is_open() && !self.staged.is_empty() {
            trace!(
                txn = %self.id,
                staged = self.staged.len(),
                "write transaction dropped without submit"
            );
        }
        self.broker.shared.metrics.write_released();
    }
}
