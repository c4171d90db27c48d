// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end scenarios over `ResourcesManager`, exercising the same
//! sequences the unit suites cover in isolation but end to end against a
//! real `tempdir`-backed data path.

use rm_adapters::FakeMasterAdapter;
use rm_core::contracts::ResourceManagerHandle;
use rm_core::test_support::{NullPortAllocator, StaticPluginManager};
use rm_core::{CompoundName, ResourceDependency, TaskEvent};
use rm_engine::ResourcesManager;
use rm_types::{CreateOp, CrudOp, Names, ResourceType};
use serde_json::json;
use std::sync::Arc;
use tempfile::tempdir;

fn resource_type(plugin: &str, resource_type: &str, start_stop: bool, start_on_create: bool) -> ResourceType {
    ResourceType {
        plugin: plugin.to_string(),
        resource_type: resource_type.to_string(),
        create: CreateOp { names: Names::derive("create"), start_on_create },
        delete: CrudOp { names: Names::derive("delete") },
        start: start_stop.then(|| CrudOp { names: Names::derive("start") }),
        stop: start_stop.then(|| CrudOp { names: Names::derive("stop") }),
        describe: None,
        filter: None,
    }
}

fn register(registry: &StaticPluginManager, plugin: &str, resource_type: &str, manager: &Arc<ResourcesManager>) {
    let handle: Arc<dyn ResourceManagerHandle> = Arc::new(Arc::clone(manager));
    registry.register(plugin, resource_type, handle);
}

#[tokio::test]
async fn s1_create_start_stop_delete_happy_path() {
    let dir = tempdir().unwrap();
    let registry = Arc::new(StaticPluginManager::new());
    let manager = ResourcesManager::new(
        resource_type("p", "node", true, true),
        dir.path().to_path_buf(),
        FakeMasterAdapter::new("p", "node"),
        Arc::new(NullPortAllocator),
        registry,
    );
    let name = CompoundName::new("alice");

    manager.create(&name, json!({})).join().await.unwrap();

    assert!(manager.exists(&name));
    assert!(dir.path().join("ready").join("alice").exists());
    let deps_json = tokio::fs::read_to_string(dir.path().join("dependencies").join("alice.json")).await.unwrap();
    assert_eq!(deps_json.trim(), "[]");
    let dependents_json = tokio::fs::read_to_string(dir.path().join("dependents").join("alice.json")).await.unwrap();
    assert_eq!(dependents_json.trim(), "[]");
    assert!(manager.is_started(&name));

    manager.stop(&name, json!({})).join().await.unwrap();
    assert!(!manager.is_started(&name));

    manager.delete(&name, json!({})).join().await.unwrap();
    assert!(!manager.exists(&name));
    assert!(!dir.path().join("ready").join("alice").exists());
}

#[tokio::test]
async fn s2_dependent_cascade_on_delete() {
    let dir = tempdir().unwrap();
    let registry = Arc::new(StaticPluginManager::new());

    let wallet_manager = ResourcesManager::new(
        resource_type("p", "wallet", false, false),
        dir.path().join("wallet"),
        FakeMasterAdapter::new("p", "wallet"),
        Arc::new(NullPortAllocator),
        registry.clone(),
    );
    register(&registry, "p", "wallet", &wallet_manager);

    let node_adapter = FakeMasterAdapter::new("p", "node");
    let wallet_dep = ResourceDependency::new("p", "wallet", CompoundName::new("parent/w1"));
    node_adapter.set_dependents_on_create(vec![wallet_dep.clone()]);
    let node_manager = ResourcesManager::new(
        resource_type("p", "node", false, false),
        dir.path().join("node"),
        node_adapter,
        Arc::new(NullPortAllocator),
        registry.clone(),
    );

    wallet_manager.create(&CompoundName::new("parent/w1"), json!({})).join().await.unwrap();
    node_manager.create(&CompoundName::new("parent"), json!({})).join().await.unwrap();

    let direct = node_manager.get_resource(&CompoundName::new("parent"), &json!({}));
    assert!(direct.is_some());

    node_manager.delete(&CompoundName::new("parent"), json!({})).join().await.unwrap();

    assert!(!node_manager.exists(&CompoundName::new("parent")));
    assert!(!wallet_manager.exists(&CompoundName::new("parent/w1")));
}

#[tokio::test]
async fn s3_start_dependency_ordering_observed_via_progress_messages() {
    let dir = tempdir().unwrap();
    let registry = Arc::new(StaticPluginManager::new());

    let disk_manager = ResourcesManager::new(
        resource_type("p", "disk", true, false),
        dir.path().join("disk"),
        FakeMasterAdapter::new("p", "disk"),
        Arc::new(NullPortAllocator),
        registry.clone(),
    );
    register(&registry, "p", "disk", &disk_manager);

    let db_adapter = FakeMasterAdapter::new("p", "db");
    let dep = ResourceDependency::new("p", "disk", CompoundName::new("disk0"));
    db_adapter.set_dependents_on_create(vec![dep]);
    let db_manager = ResourcesManager::new(
        resource_type("p", "db", true, false),
        dir.path().join("db"),
        db_adapter,
        Arc::new(NullPortAllocator),
        registry.clone(),
    );

    disk_manager.create(&CompoundName::new("disk0"), json!({})).join().await.unwrap();
    db_manager.create(&CompoundName::new("db"), json!({})).join().await.unwrap();

    let list = db_manager.start(&CompoundName::new("db"), json!({}));
    let mut events = list.subscribe();

    let mut titles = Vec::new();
    loop {
        match events.recv().await {
            Ok(TaskEvent::Progress { message, .. }) => titles.push(message),
            Ok(TaskEvent::Done) | Ok(TaskEvent::Error { .. }) | Ok(TaskEvent::Aborted) => break,
            Err(_) => break,
        }
    }
    list.join().await.unwrap();

    let start_children_at = titles.iter().position(|t| t == "Start created children");
    let start_resource_at = titles.iter().position(|t| t == "Start resource");
    assert!(start_children_at.is_some() && start_resource_at.is_some());
    assert!(start_children_at < start_resource_at);
}

#[tokio::test]
async fn s4_abort_during_create_rolls_back() {
    let dir = tempdir().unwrap();
    let registry = Arc::new(StaticPluginManager::new());
    let manager = ResourcesManager::new(
        resource_type("p", "node", false, false),
        dir.path().to_path_buf(),
        FakeMasterAdapter::new("p", "node"),
        Arc::new(NullPortAllocator),
        registry,
    );
    let name = CompoundName::new("x");

    let create = manager.create(&name, json!({}));
    create.abort();
    let outcome = create.join().await;
    assert!(outcome.is_err());

    manager.delete(&name, json!({})).join().await.unwrap();
    assert!(!manager.exists(&name));
    assert!(!dir.path().join("ready").join("x").exists());
}

#[tokio::test]
async fn s5_concurrent_create_re_entrancy_shares_progress() {
    let dir = tempdir().unwrap();
    let registry = Arc::new(StaticPluginManager::new());
    let manager = ResourcesManager::new(
        resource_type("p", "node", false, false),
        dir.path().to_path_buf(),
        FakeMasterAdapter::new("p", "node"),
        Arc::new(NullPortAllocator),
        registry,
    );
    let name = CompoundName::new("y");

    let first = manager.create(&name, json!({}));
    let second = manager.create(&name, json!({}));
    assert!(Arc::ptr_eq(&first, &second));

    let mut rx1 = first.subscribe();
    let mut rx2 = second.subscribe();
    first.join().await.unwrap();

    let mut ev1 = Vec::new();
    while let Ok(e) = rx1.try_recv() {
        ev1.push(format!("{e:?}"));
    }
    let mut ev2 = Vec::new();
    while let Ok(e) = rx2.try_recv() {
        ev2.push(format!("{e:?}"));
    }
    assert_eq!(ev1, ev2);
}

#[tokio::test]
async fn s6_init_rejects_duplicate_ready_markers() {
    let dir = tempdir().unwrap();
    let registry = Arc::new(StaticPluginManager::new());
    let manager = ResourcesManager::new(
        resource_type("p", "node", false, false),
        dir.path().to_path_buf(),
        FakeMasterAdapter::new("p", "node"),
        Arc::new(NullPortAllocator),
        registry,
    );

    tokio::fs::create_dir_all(dir.path().join("ready").join("testnet")).await.unwrap();
    tokio::fs::write(dir.path().join("ready").join("testnet").join("alice"), b"").await.unwrap();
    tokio::fs::write(dir.path().join("ready").join("testnet__alice"), b"").await.unwrap();

    let err = manager.init().await.unwrap_err();
    assert!(matches!(err, rm_core::ResourcesManagerError::DuplicateReadyMarker(_)));
    assert!(manager.resources().is_empty());
}
