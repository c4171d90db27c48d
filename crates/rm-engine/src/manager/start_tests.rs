// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_helpers::{build_manager, register, resource_type};
use rm_adapters::FakeMasterAdapter;
use rm_core::test_support::{NullPortAllocator, StaticPluginManager};
use rm_core::{CompoundName, ResourceDependency};
use tempfile::tempdir;

#[tokio::test]
async fn start_fails_outright_when_the_resource_type_has_no_start() {
    let dir = tempdir().unwrap();
    let (manager, _adapter, _registry) = build_manager(dir.path(), "p", "wallet", false, false);

    let err = manager.start(&CompoundName::new("alice"), OperationOptions::default()).join().await.unwrap_err();

    assert_eq!(err.code, "no_start");
}

#[tokio::test]
async fn start_fails_when_the_resource_does_not_exist() {
    let dir = tempdir().unwrap();
    let (manager, _adapter, _registry) = build_manager(dir.path(), "p", "node", true, false);

    manager.start(&CompoundName::new("ghost"), OperationOptions::default()).join().await.unwrap_err();
}

#[tokio::test]
async fn start_marks_the_resource_started_on_success() {
    let dir = tempdir().unwrap();
    let (manager, _adapter, _registry) = build_manager(dir.path(), "p", "node", true, false);
    let name = CompoundName::new("alice");
    manager.create(&name, OperationOptions::default()).join().await.unwrap();

    manager.start(&name, OperationOptions::default()).join().await.unwrap();

    assert!(manager.is_started(&name));
}

#[tokio::test]
async fn starting_an_already_started_resource_skips_cleanly() {
    let dir = tempdir().unwrap();
    let (manager, _adapter, _registry) = build_manager(dir.path(), "p", "node", true, true);
    let name = CompoundName::new("alice");
    manager.create(&name, OperationOptions::default()).join().await.unwrap();
    assert!(manager.is_started(&name));

    manager.start(&name, OperationOptions::default()).join().await.unwrap();

    assert!(manager.is_started(&name));
}

#[tokio::test]
async fn re_entering_an_in_flight_start_returns_the_same_task_list() {
    let dir = tempdir().unwrap();
    let (manager, _adapter, _registry) = build_manager(dir.path(), "p", "node", true, false);
    let name = CompoundName::new("alice");
    manager.create(&name, OperationOptions::default()).join().await.unwrap();

    let first = manager.start(&name, OperationOptions::default());
    let second = manager.start(&name, OperationOptions::default());

    assert!(Arc::ptr_eq(&first, &second));
    first.join().await.unwrap();
}

#[tokio::test]
async fn start_failure_triggers_a_compensating_stop() {
    let dir = tempdir().unwrap();
    let (manager, adapter, _registry) = build_manager(dir.path(), "p", "node", true, false);
    let name = CompoundName::new("alice");
    manager.create(&name, OperationOptions::default()).join().await.unwrap();
    adapter.created_adapters()[0].set_fail_start(true);

    manager.start(&name, OperationOptions::default()).join().await.unwrap_err();

    // on_complete never fired, so started was never flipped to true.
    assert!(!manager.is_started(&name));
}

#[tokio::test]
async fn start_brings_up_dependent_children_before_the_resource_itself() {
    let dir = tempdir().unwrap();
    let registry = Arc::new(StaticPluginManager::new());

    let wallet_manager = ResourcesManager::new(
        resource_type("p", "wallet", true, false),
        dir.path().join("wallet"),
        FakeMasterAdapter::new("p", "wallet"),
        Arc::new(NullPortAllocator),
        registry.clone(),
    );
    register(&registry, "p", "wallet", &wallet_manager);

    let node_manager = ResourcesManager::new(
        resource_type("p", "node", true, false),
        dir.path().join("node"),
        FakeMasterAdapter::new("p", "node"),
        Arc::new(NullPortAllocator),
        registry.clone(),
    );

    let wallet_name = CompoundName::new("parent/w1");
    wallet_manager.create(&wallet_name, OperationOptions::default()).join().await.unwrap();
    let parent_name = CompoundName::new("parent");
    node_manager.create(&parent_name, OperationOptions::default()).join().await.unwrap();
    let dep = ResourceDependency::new("p", "wallet", wallet_name.clone());
    node_manager.direct_dependents.lock().insert(parent_name.clone(), vec![dep]);

    node_manager.start(&parent_name, OperationOptions::default()).join().await.unwrap();

    assert!(wallet_manager.is_started(&wallet_name));
    assert!(node_manager.is_started(&parent_name));
}
