//! Broker Integration Tests
//!
//! Tests for canopy-broker through its public contract: transaction
//! lifecycle, commit atomicity, tree semantics and instrumentation.

use canopy::{
    CommitError, DataBroker, DataPath, InMemoryBroker, Payload, Scope, TransactionStatus,
};
use futures::executor::block_on;

mod lifecycle;
mod tree_semantics;

// =============================================================================
// SHARED TEST UTILITIES
// =============================================================================

pub fn p(text: &str) -> DataPath {
    DataPath::parse(text).expect("valid test path")
}

/// Commit a single put, returning the new version
pub fn commit_put(broker: &dyn DataBroker, scope: Scope, path: &str, data: Payload) -> u64 {
    let mut txn = broker.new_write_only_transaction();
    txn.put(scope, &p(path), data, true).unwrap();
    block_on(txn.submit()).unwrap().version
}

/// Read through a fresh read-only transaction
pub fn read(broker: &dyn DataBroker, scope: Scope, path: &str) -> Option<Payload> {
    let txn = broker.new_read_only_transaction();
    block_on(txn.read(scope, &p(path))).unwrap()
}

pub fn journaling_broker() -> InMemoryBroker {
    InMemoryBroker::builder().journal(true).build()
}

#[test]
fn test_broker_is_object_safe_and_shareable() {
    fn assert_send_sync<T: Send + Sync + ?Sized>() {}
    assert_send_sync::<dyn DataBroker>();

    let broker: std::sync::Arc<dyn DataBroker> = std::sync::Arc::new(InMemoryBroker::new());
    commit_put(broker.as_ref(), Scope::Configuration, "/a", serde_json::json!(1));
    assert_eq!(
        read(broker.as_ref(), Scope::Configuration, "/a"),
        Some(serde_json::json!(1))
    );
}

#[test]
fn test_failed_commit_reports_failed_status() {
    let broker = InMemoryBroker::new();
    broker.faults().fail_next_commit(CommitError::rejected("x"));
    let mut txn = broker.new_write_only_transaction();
    txn.delete(Scope::Configuration, &p("/a")).unwrap();
    assert!(block_on(txn.submit()).is_err());
    assert_eq!(txn.status(), TransactionStatus::Failed);
}
