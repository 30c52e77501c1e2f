//! Concurrency Tests
//!
//! The façade holds no per-call state; callers bring their own threads.

use crate::*;
use canopy::Scope;
use serde_json::{json, Value};
use std::thread;

#[test]
fn test_threads_writing_distinct_paths() {
    let (broker, facade) = create_facade();
    let facade = Arc::new(facade);

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let facade = Arc::clone(&facade);
            thread::spawn(move || {
                for i in 0..25 {
                    let p: Path<Value> = path(&format!("/workers/w{}/item{}", t, i));
                    assert!(facade.put(Scope::Operational, &p, &json!(i)));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(broker.current_version(), 200);
    let workers = facade
        .read(Scope::Operational, &path::<Value>("/workers"))
        .unwrap();
    for t in 0..8 {
        assert_eq!(
            workers[format!("w{}", t)].as_object().unwrap().len(),
            25
        );
    }
    assert_eq!(broker.metrics().transactions_outstanding(), 0);
}

#[test]
fn test_concurrent_merges_to_one_node_union() {
    let (_, facade) = create_facade();
    let p: Path<Value> = path("/counters");

    thread::scope(|s| {
        for t in 0..8 {
            let facade = &facade;
            let p = &p;
            s.spawn(move || {
                let mut field = serde_json::Map::new();
                field.insert(format!("c{}", t), json!(t));
                assert!(facade.merge(Scope::Configuration, p, &Value::Object(field)));
            });
        }
    });

    let merged = facade.read(Scope::Configuration, &p).unwrap();
    assert_eq!(merged.as_object().unwrap().len(), 8);
}

#[test]
fn test_readers_see_whole_values() {
    let (_, facade) = create_facade();
    let p: Path<Interface> = path("/interfaces/eth0");
    assert!(facade.put(Scope::Configuration, &p, &Interface::new("eth0", 1000)));

    thread::scope(|s| {
        s.spawn(|| {
            for mtu in 1001..1100 {
                assert!(facade.put(Scope::Configuration, &p, &Interface::new("eth0", mtu)));
            }
        });
        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..100 {
                    let current = facade.read(Scope::Configuration, &p).unwrap();
                    assert_eq!(current.name, "eth0");
                    assert!((1000..1100).contains(&current.mtu));
                }
            });
        }
    });
}
