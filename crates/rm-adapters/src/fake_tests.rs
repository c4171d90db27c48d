// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use rm_core::AdapterIdentity;
use std::path::PathBuf;

fn identity(name: &str) -> AdapterIdentity {
    AdapterIdentity { name: CompoundName::from(name), data_path: PathBuf::from("/tmp/unused") }
}

#[tokio::test]
async fn start_succeeds_and_publishes_started_state() {
    let adapter = FakeAdapter::new("p", "node", CompoundName::from("alice"));
    let list = adapter.start(serde_json::Value::Null);
    list.join().await.unwrap();

    let snapshot = adapter.resource_stream().borrow().clone().unwrap();
    assert!(snapshot.is_started());
}

#[tokio::test]
async fn start_can_be_configured_to_fail() {
    let adapter = FakeAdapter::new("p", "node", CompoundName::from("alice"));
    adapter.set_fail_start(true);
    let list = adapter.start(serde_json::Value::Null);
    let err = list.join().await.unwrap_err();
    assert_eq!(err.code, "fake_start_failed");
}

#[tokio::test]
async fn destroy_is_observable_and_idempotent() {
    let adapter = FakeAdapter::new("p", "node", CompoundName::from("alice"));
    adapter.destroy().await;
    adapter.destroy().await;
    assert!(adapter.is_destroyed());
}

#[tokio::test]
async fn master_adapter_create_seeds_context() {
    let master = FakeMasterAdapter::new("p", "node");
    master.set_dependents_on_create(vec![ResourceDependency::new("p", "wallet", "alice/w1")]);

    let list = master.create_resource_adapter(identity("alice"), serde_json::Value::Null);
    list.join().await.unwrap();

    assert!(list.ctx().resource_adapter().is_some());
    assert_eq!(list.ctx().dependents().len(), 1);
}

#[tokio::test]
async fn master_adapter_create_can_be_configured_to_fail() {
    let master = FakeMasterAdapter::new("p", "node");
    master.set_fail_create(true);
    let list = master.create_resource_adapter(identity("alice"), serde_json::Value::Null);
    let err = list.join().await.unwrap_err();
    assert_eq!(err.code, "fake_create_failed");
}

#[tokio::test]
async fn init_resource_adapter_rehydrates_without_creating_context() {
    let master = FakeMasterAdapter::new("p", "node");
    let adapter = master.init_resource_adapter(identity("alice")).await.unwrap();
    assert!(adapter.resource_stream().borrow().is_some());
}
