// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ResourceManagerHandle` (C7): the narrow cross-manager surface other
//! managers call through, resolved via `PluginManager`.

use super::ResourcesManager;
use rm_core::contracts::ResourceManagerHandle;
use rm_core::{CompoundName, OperationOptions, ResourceDependency, TaskList};
use std::sync::Arc;

impl ResourcesManager {
    /// Appends `dep` to this resource's inverse dependency edges (§4.5.7).
    /// No dedup at append time — `unique_deps` is applied whenever this is
    /// consumed (by `delete`'s cascade and `stop`'s dependents step).
    pub(crate) fn add_dependent_entry(&self, name: &CompoundName, dep: ResourceDependency) {
        self.resource_dependents.lock().entry(name.clone()).or_default().push(dep);
    }
}

impl ResourceManagerHandle for Arc<ResourcesManager> {
    fn start(&self, name: &CompoundName, options: OperationOptions) -> Arc<TaskList> {
        ResourcesManager::start(self, name, options)
    }

    fn stop(&self, name: &CompoundName, options: OperationOptions) -> Arc<TaskList> {
        ResourcesManager::stop(self, name, options)
    }

    fn delete(&self, name: &CompoundName, options: OperationOptions) -> Arc<TaskList> {
        ResourcesManager::delete(self, name, options)
    }

    fn add_dependent(&self, name: &CompoundName, dep: ResourceDependency) {
        self.add_dependent_entry(name, dep);
    }

    fn supports_start_stop(&self) -> bool {
        self.resource_type().supports_start_stop()
    }
}

#[cfg(test)]
#[path = "handle_tests.rs"]
mod tests;
