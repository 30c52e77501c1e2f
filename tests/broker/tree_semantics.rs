//! Tree Semantics Tests
//!
//! Put replaces, merge unions objects, delete removes subtrees.

use crate::*;
use serde_json::json;

fn stage(broker: &InMemoryBroker, f: impl FnOnce(&mut dyn canopy::WriteTransaction)) {
    let mut txn = broker.new_write_only_transaction();
    f(txn.as_mut());
    block_on(txn.submit()).unwrap();
}

#[test]
fn test_put_at_root_replaces_partition() {
    let broker = InMemoryBroker::new();
    commit_put(&broker, Scope::Configuration, "/old", json!(1));
    stage(&broker, |txn| {
        txn.put(Scope::Configuration, &DataPath::root(), json!({"new": 2}), false)
            .unwrap()
    });
    assert_eq!(broker.snapshot(Scope::Configuration), json!({"new": 2}));
}

#[test]
fn test_merge_nested_objects() {
    let broker = InMemoryBroker::new();
    commit_put(
        &broker,
        Scope::Operational,
        "/topo",
        json!({"nodes": {"n1": {"up": true}}, "links": []}),
    );
    stage(&broker, |txn| {
        txn.merge(
            Scope::Operational,
            &p("/topo"),
            json!({"nodes": {"n2": {"up": false}}, "links": ["l1"]}),
            true,
        )
        .unwrap()
    });
    assert_eq!(
        read(&broker, Scope::Operational, "/topo"),
        Some(json!({
            "nodes": {"n1": {"up": true}, "n2": {"up": false}},
            "links": ["l1"]
        }))
    );
}

#[test]
fn test_merge_replaces_leaf_with_object() {
    let broker = InMemoryBroker::new();
    commit_put(&broker, Scope::Configuration, "/n", json!(3));
    stage(&broker, |txn| {
        txn.merge(Scope::Configuration, &p("/n"), json!({"x": 1}), true)
            .unwrap()
    });
    assert_eq!(read(&broker, Scope::Configuration, "/n"), Some(json!({"x": 1})));
}

#[test]
fn test_missing_parent_without_creation() {
    let broker = InMemoryBroker::new();
    let mut txn = broker.new_write_only_transaction();
    txn.put(Scope::Configuration, &p("/a/b/c"), json!(1), false)
        .unwrap();
    assert_eq!(
        block_on(txn.submit()),
        Err(CommitError::MissingParent {
            path: "/a/b/c".into()
        })
    );
}

#[test]
fn test_delete_root_then_read_root() {
    let broker = InMemoryBroker::builder()
        .seed(Scope::Configuration, json!({"a": 1}))
        .build();
    stage(&broker, |txn| {
        txn.delete(Scope::Configuration, &DataPath::root()).unwrap()
    });
    assert_eq!(read(&broker, Scope::Configuration, "/"), None);
}

#[test]
fn test_read_copies_value() {
    let broker = InMemoryBroker::new();
    commit_put(&broker, Scope::Configuration, "/a", json!({"x": 1}));
    let mut copy = read(&broker, Scope::Configuration, "/a").unwrap();
    copy["x"] = json!(99);
    assert_eq!(read(&broker, Scope::Configuration, "/a"), Some(json!({"x": 1})));
}
