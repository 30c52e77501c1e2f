//! Read Tests
//!
//! Tests for read and try_read.

use crate::*;
use canopy::{ReadError, Scope};
use serde_json::{json, Value};

// =============================================================================
// READ
// =============================================================================

#[test]
fn test_read_missing_returns_none() {
    let (_, facade) = create_facade();
    assert_eq!(facade.read::<Value>(Scope::Configuration, &path("/nothing")), None);
}

#[test]
fn test_read_typed_record() {
    let (_, facade) = create_facade();
    let eth0 = Interface::new("eth0", 1500);

    assert!(facade.put(Scope::Configuration, &path("/interfaces/eth0"), &eth0));
    assert_eq!(
        facade.read(Scope::Configuration, &path::<Interface>("/interfaces/eth0")),
        Some(eth0)
    );
}

#[test]
fn test_read_parent_sees_child() {
    let (_, facade) = create_facade();
    assert!(facade.put(Scope::Operational, &path("/a/b/c"), &json!(7)));

    assert_eq!(
        facade.read(Scope::Operational, &path::<Value>("/a")),
        Some(json!({"b": {"c": 7}}))
    );
}

#[test]
fn test_read_root_of_empty_scope() {
    let (_, facade) = create_facade();
    assert_eq!(facade.read::<Value>(Scope::Configuration, &path("/")), None);
}

#[test]
fn test_read_honors_scope() {
    let (_, facade) = create_facade();
    assert!(facade.put(Scope::Configuration, &path("/n"), &json!("config")));
    assert!(facade.put(Scope::Operational, &path("/n"), &json!("oper")));

    assert_eq!(
        facade.read(Scope::Configuration, &path::<Value>("/n")),
        Some(json!("config"))
    );
    assert_eq!(
        facade.read(Scope::Operational, &path::<Value>("/n")),
        Some(json!("oper"))
    );
}

#[test]
fn test_read_releases_transaction() {
    let (broker, facade) = create_facade();
    facade.read::<Value>(Scope::Configuration, &path("/a"));
    facade.read::<Value>(Scope::Configuration, &path("/b"));

    let metrics = broker.metrics();
    assert_eq!(metrics.read_transactions_opened, 2);
    assert_eq!(metrics.read_transactions_released, 2);
    assert_eq!(metrics.write_transactions_opened, 0);
}

#[test]
fn test_read_wrong_type_is_none() {
    let (_, facade) = create_facade();
    assert!(facade.put(Scope::Configuration, &path("/n"), &json!({"unexpected": true})));
    assert_eq!(facade.read(Scope::Configuration, &path::<Interface>("/n")), None);
}

// =============================================================================
// TRY_READ
// =============================================================================

#[test]
fn test_try_read_distinguishes_absent_from_failed() {
    let (broker, facade) = create_facade();
    let p: Path<Value> = path("/a");

    assert_eq!(facade.try_read(Scope::Configuration, &p), Ok(None));

    broker.faults().fail_next_read(ReadError::unavailable("link down"));
    assert_eq!(
        facade.try_read(Scope::Configuration, &p),
        Err(ReadError::unavailable("link down"))
    );
}

#[test]
fn test_try_read_decode_failure_names_path() {
    let (_, facade) = create_facade();
    assert!(facade.put(Scope::Configuration, &path("/x/y"), &json!([1, 2])));

    match facade.try_read(Scope::Configuration, &path::<Interface>("/x/y")) {
        Err(ReadError::Decode { path, .. }) => assert_eq!(path, "/x/y"),
        other => panic!("expected decode error, got {:?}", other),
    }
}

#[test]
fn test_try_read_releases_on_failure() {
    let (broker, facade) = create_facade();
    broker.faults().fail_next_read(ReadError::unavailable("down"));
    let _ = facade.try_read::<Value>(Scope::Configuration, &path("/a"));
    assert_eq!(broker.metrics().transactions_outstanding(), 0);
}
