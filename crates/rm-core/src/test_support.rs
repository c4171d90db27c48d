// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test doubles for the cross-manager contracts, shared across crates
//! behind the `test-support` feature.

use crate::compound_name::CompoundName;
use crate::contracts::{PluginManager, PortAllocator, ResourceManagerHandle};
use crate::error::PluginLookupError;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// A [`PluginManager`] backed by an in-memory map, populated by the test
/// that wires up a set of `ResourcesManager`s.
#[derive(Default)]
pub struct StaticPluginManager {
    managers: Mutex<HashMap<(String, String), Arc<dyn ResourceManagerHandle>>>,
}

impl StaticPluginManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &self,
        plugin: impl Into<String>,
        resource_type: impl Into<String>,
        handle: Arc<dyn ResourceManagerHandle>,
    ) {
        self.managers.lock().insert((plugin.into(), resource_type.into()), handle);
    }
}

impl PluginManager for StaticPluginManager {
    fn get_resources_manager(
        &self,
        plugin: &str,
        resource_type: &str,
    ) -> Result<Arc<dyn ResourceManagerHandle>, PluginLookupError> {
        self.managers
            .lock()
            .get(&(plugin.to_string(), resource_type.to_string()))
            .cloned()
            .ok_or_else(|| PluginLookupError {
                plugin: plugin.to_string(),
                resource_type: resource_type.to_string(),
            })
    }
}

/// A [`PortAllocator`] that never actually reserves anything.
#[derive(Default)]
pub struct NullPortAllocator;

#[async_trait]
impl PortAllocator for NullPortAllocator {
    async fn reserve_port(&self, _plugin: &str, _resource_type: &str, _resource: &CompoundName) -> Option<u16> {
        None
    }

    async fn release_port(&self, _plugin: &str, _resource_type: &str, _resource: &CompoundName) {}
}

#[cfg(test)]
#[path = "test_support_tests.rs"]
mod tests;
