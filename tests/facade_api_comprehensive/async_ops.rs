//! Async Variant Tests
//!
//! The `*_async` methods return the same outcomes as the blocking ones.

use crate::*;
use canopy::{CommitError, ReadError, Scope};
use serde_json::{json, Value};

#[tokio::test]
async fn test_async_scenario() {
    let (_, facade) = create_facade();
    let p: Path<Value> = path("/a/b");

    assert!(facade.put_async(Scope::Configuration, &p, &json!({"x": 1})).await);
    assert_eq!(
        facade.read_async(Scope::Configuration, &p).await,
        Some(json!({"x": 1}))
    );
    assert!(facade.delete_async(Scope::Configuration, &p).await);
    assert_eq!(facade.read_async(Scope::Configuration, &p).await, None);
}

#[tokio::test]
async fn test_async_merge() {
    let (_, facade) = create_facade();
    let p: Path<Value> = path("/n");

    assert!(facade.merge_async(Scope::Operational, &p, &json!({"a": 1})).await);
    assert!(facade.merge_async(Scope::Operational, &p, &json!({"b": 2})).await);
    assert_eq!(
        facade.read_async(Scope::Operational, &p).await,
        Some(json!({"a": 1, "b": 2}))
    );
}

#[tokio::test]
async fn test_async_put_or_delete() {
    let (_, facade) = create_facade();
    let p: Path<Value> = path("/a");

    assert!(!facade.put_or_delete_async(Scope::Configuration, &p, None, true).await);
    assert!(
        facade
            .put_or_delete_async(Scope::Configuration, &p, Some(&json!(1)), true)
            .await
    );
    assert!(facade.put_or_delete_async(Scope::Configuration, &p, None, false).await);
    assert_eq!(facade.read_async(Scope::Configuration, &p).await, None);
}

#[tokio::test]
async fn test_async_failures_match_blocking() {
    let (broker, facade) = create_facade();
    let p: Path<Value> = path("/a");

    broker.faults().fail_next_commit(CommitError::rejected("no"));
    assert!(!facade.put_async(Scope::Configuration, &p, &json!(1)).await);

    broker.faults().fail_next_read(ReadError::unavailable("down"));
    assert_eq!(facade.read_async(Scope::Configuration, &p).await, None);

    broker.faults().fail_next_read(ReadError::unavailable("down"));
    assert_eq!(
        facade.try_read_async(Scope::Configuration, &p).await,
        Err(ReadError::unavailable("down"))
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_async_tasks_share_facade() {
    let (broker, facade) = create_facade();

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let facade = facade.clone();
            tokio::spawn(async move {
                let p: Path<Value> = path(&format!("/tasks/t{}", i));
                facade.put_async(Scope::Operational, &p, &json!(i)).await
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap());
    }

    assert_eq!(broker.current_version(), 16);
    let tasks = facade
        .read_async(Scope::Operational, &path::<Value>("/tasks"))
        .await
        .unwrap();
    assert_eq!(tasks.as_object().unwrap().len(), 16);
}
