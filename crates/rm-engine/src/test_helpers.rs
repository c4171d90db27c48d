// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for `manager`'s sibling `*_tests.rs` files: a minimal
//! `ResourceType` plus a `ResourcesManager` wired to `FakeMasterAdapter`,
//! `StaticPluginManager`, and `NullPortAllocator`.

use crate::ResourcesManager;
use rm_adapters::FakeMasterAdapter;
use rm_core::test_support::{NullPortAllocator, StaticPluginManager};
use rm_core::contracts::ResourceManagerHandle;
use rm_types::{CreateOp, CrudOp, Names, ResourceType};
use std::path::Path;
use std::sync::Arc;

/// A `ResourceType` named `(plugin, resource_type)`. `start_stop` controls
/// whether `start`/`stop` are declared; `start_on_create` only matters when
/// `start_stop` is true.
pub fn resource_type(plugin: &str, resource_type: &str, start_stop: bool, start_on_create: bool) -> ResourceType {
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

/// A manager over `(plugin, resource_type)`, backed by a fresh
/// `FakeMasterAdapter` and an empty, unregistered `StaticPluginManager`.
/// Returns the manager and the `FakeMasterAdapter` so tests can reach into
/// `created_adapters()`/`set_fail_create()` etc.
pub fn build_manager(
    data_path: &Path,
    plugin: &str,
    resource_type_name: &str,
    start_stop: bool,
    start_on_create: bool,
) -> (Arc<ResourcesManager>, Arc<FakeMasterAdapter>, Arc<StaticPluginManager>) {
    let plugin_manager = Arc::new(StaticPluginManager::new());
    let master_adapter = FakeMasterAdapter::new(plugin, resource_type_name);
    let manager = ResourcesManager::new(
        resource_type(plugin, resource_type_name, start_stop, start_on_create),
        data_path.to_path_buf(),
        master_adapter.clone(),
        Arc::new(NullPortAllocator),
        plugin_manager.clone(),
    );
    (manager, master_adapter, plugin_manager)
}

/// Registers `manager` into `registry` under `(plugin, resource_type)` via
/// the double-`Arc` coercion `impl ResourceManagerHandle for Arc<ResourcesManager>`
/// requires (see `handle.rs`).
pub fn register(
    registry: &StaticPluginManager,
    plugin: &str,
    resource_type_name: &str,
    manager: &Arc<ResourcesManager>,
) {
    let handle: Arc<dyn ResourceManagerHandle> = Arc::new(Arc::clone(manager));
    registry.register(plugin, resource_type_name, handle);
}
