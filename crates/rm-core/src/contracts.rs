// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cross-manager collaborator contracts (C7, C8): a `ResourcesManager`
//! never depends on its siblings directly, only on these trait objects
//! handed to it by the hosting process.

use crate::adapter::OperationOptions;
use crate::compound_name::CompoundName;
use crate::dependency::ResourceDependency;
use crate::error::PluginLookupError;
use crate::task_list::TaskList;
use async_trait::async_trait;
use std::sync::Arc;

/// A borrowable handle onto some other `(plugin, resourceType)`'s
/// `ResourcesManager`, narrowed to the operations needed for cross-manager
/// dependency propagation (§4.5.7) and cascade (§4.5.3–§4.5.5).
///
/// `rm-engine`'s `ResourcesManager` implements this; `rm-core` only needs
/// the trait so the engine and the plugin registry don't have to depend on
/// each other.
pub trait ResourceManagerHandle: Send + Sync {
    fn start(&self, name: &CompoundName, options: OperationOptions) -> Arc<TaskList>;
    fn stop(&self, name: &CompoundName, options: OperationOptions) -> Arc<TaskList>;
    fn delete(&self, name: &CompoundName, options: OperationOptions) -> Arc<TaskList>;

    /// Appends `dep` to this resource's inverse dependency edges.
    /// No dedup at append time — consumers apply `unique_deps` (§4.5.7).
    fn add_dependent(&self, name: &CompoundName, dep: ResourceDependency);

    /// Whether this manager's resource type declares both `start` and
    /// `stop`. Lets a peer manager filter its dependents before delegating
    /// start/stop to them (§4.5.4 step 2, §4.5.5 step 2) without having to
    /// invoke the operation just to discover it is unsupported.
    fn supports_start_stop(&self) -> bool;
}

/// Resolves `(plugin, resourceType)` to its owning manager. Must be total:
/// an unknown pair is a loud, typed failure, never a silent no-op.
pub trait PluginManager: Send + Sync {
    fn get_resources_manager(
        &self,
        plugin: &str,
        resource_type: &str,
    ) -> Result<Arc<dyn ResourceManagerHandle>, PluginLookupError>;
}

/// Reserves and releases ports scoped by `(plugin, resourceType, resource)`.
/// The allocation strategy itself is out of scope here (§1); only the
/// interface `ResourcesManager` calls against is specified.
#[async_trait]
pub trait PortAllocator: Send + Sync {
    async fn reserve_port(&self, plugin: &str, resource_type: &str, resource: &CompoundName) -> Option<u16>;

    /// Idempotent: releasing a resource with no reservation is a no-op.
    async fn release_port(&self, plugin: &str, resource_type: &str, resource: &CompoundName);
}
