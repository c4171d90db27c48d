// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `PluginManager` registry this binary constructs at startup (§9:
//! "a registry indexed by `(plugin, resourceType)` held by the
//! PluginManager; managers hold only a borrow/handle to the registry").

use async_trait::async_trait;
use parking_lot::Mutex;
use rm_core::contracts::{PluginManager, PortAllocator, ResourceManagerHandle};
use rm_core::{CompoundName, PluginLookupError};
use std::collections::HashMap;
use std::sync::Arc;

/// In-process `(plugin, resourceType) -> ResourcesManager` lookup table.
/// Populated once at startup, read thereafter by every manager's
/// cross-manager cascade.
#[derive(Default)]
pub struct PluginRegistry {
    managers: Mutex<HashMap<(String, String), Arc<dyn ResourceManagerHandle>>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, plugin: impl Into<String>, resource_type: impl Into<String>, handle: Arc<dyn ResourceManagerHandle>) {
        self.managers.lock().insert((plugin.into(), resource_type.into()), handle);
    }
}

impl PluginManager for PluginRegistry {
    fn get_resources_manager(
        &self,
        plugin: &str,
        resource_type: &str,
    ) -> Result<Arc<dyn ResourceManagerHandle>, PluginLookupError> {
        self.managers
            .lock()
            .get(&(plugin.to_string(), resource_type.to_string()))
            .cloned()
            .ok_or_else(|| PluginLookupError { plugin: plugin.to_string(), resource_type: resource_type.to_string() })
    }
}

/// The port allocator implementation is out of scope (§1); this process
/// runs without reserving any ports.
#[derive(Default)]
pub struct NoopPortAllocator;

#[async_trait]
impl PortAllocator for NoopPortAllocator {
    async fn reserve_port(&self, _plugin: &str, _resource_type: &str, _resource: &CompoundName) -> Option<u16> {
        None
    }

    async fn release_port(&self, _plugin: &str, _resource_type: &str, _resource: &CompoundName) {}
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
