//! Transaction Lifecycle Tests

use crate::*;
use canopy::ReadTransaction;
use serde_json::json;

#[test]
fn test_write_lifecycle_open_to_committed() {
    let broker = InMemoryBroker::new();
    let mut txn = broker.new_write_only_transaction();
    assert_eq!(txn.status(), TransactionStatus::Open);

    txn.put(Scope::Configuration, &p("/a"), json!(1), true).unwrap();
    assert_eq!(txn.status(), TransactionStatus::Open);

    let info = block_on(txn.submit()).unwrap();
    assert_eq!(info.txn_id, txn.id());
    assert_eq!(txn.status(), TransactionStatus::Committed);
    assert!(txn.status().is_terminal());
}

#[test]
fn test_cancelled_transaction_rejects_everything() {
    let broker = InMemoryBroker::new();
    let mut txn = broker.new_write_only_transaction();
    assert!(txn.cancel());
    assert!(!txn.cancel());

    assert_eq!(
        txn.put(Scope::Configuration, &p("/a"), json!(1), true),
        Err(CommitError::NotActive {
            state: TransactionStatus::Cancelled
        })
    );
    assert!(block_on(txn.submit()).is_err());
}

#[test]
fn test_empty_transaction_commits() {
    let broker = InMemoryBroker::new();
    let mut txn = broker.new_write_only_transaction();
    let info = block_on(txn.submit()).unwrap();
    assert_eq!(info.version, 1);
}

#[test]
fn test_read_transaction_close_is_idempotent() {
    let broker = InMemoryBroker::new();
    let mut txn: Box<dyn ReadTransaction> = broker.new_read_only_transaction();
    txn.close();
    txn.close();
    assert_eq!(txn.status(), TransactionStatus::Cancelled);
    drop(txn);
    assert_eq!(broker.metrics().read_transactions_released, 1);
}

#[test]
fn test_dropped_transactions_are_released() {
    let broker = InMemoryBroker::new();
    {
        let _r = broker.new_read_only_transaction();
        let mut w = broker.new_write_only_transaction();
        w.put(Scope::Operational, &p("/a"), json!(1), true).unwrap();
        assert_eq!(broker.metrics().transactions_outstanding(), 2);
    }
    let metrics = broker.metrics();
    assert_eq!(metrics.transactions_outstanding(), 0);
    assert_eq!(metrics.staged_puts, 1);
    assert_eq!(metrics.commits_succeeded, 0);
    assert_eq!(read(&broker, Scope::Operational, "/a"), None);
}

#[test]
fn test_versions_increase_per_commit() {
    let broker = InMemoryBroker::new();
    let v1 = commit_put(&broker, Scope::Configuration, "/a", json!(1));
    let v2 = commit_put(&broker, Scope::Operational, "/a", json!(2));
    assert_eq!((v1, v2), (1, 2));
    assert_eq!(broker.current_version(), 2);
}
