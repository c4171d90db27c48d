// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `ResourcesManager` struct (C6): the per-`(plugin, resourceType)`
//! owner of a resource kind's lifecycle.
//!
//! CRUD operations live in sibling modules (`init`, `create`, `delete`,
//! `start`, `stop`); the reactive aggregate (C9) lives in `aggregate`; the
//! `ResourceManagerHandle` impl used for cross-manager calls lives in
//! `handle`.

mod aggregate;
mod create;
mod delete;
mod handle;
mod hooks;
mod init;
mod start;
mod stop;

pub use hooks::CreateHook;


use parking_lot::Mutex;
use rm_core::contracts::{PluginManager, PortAllocator};
use rm_core::{
    AdapterIdentity, CompoundName, DescribeTable, MasterResourceAdapter, Resource, ResourceAdapter,
    ResourceDependency, ResourcesManagerError, TaskList,
};
use rm_storage::{DependencyStore, ReadyRegistry, StorageError};
use rm_types::ResourceType;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;

/// One resource type's lifecycle owner. Construction binds it to a
/// `dataPath`, a `MasterResourceAdapter`, a `PortAllocator`, a
/// `PluginManager`, and the `ResourceType` CRUD descriptor.
pub struct ResourcesManager {
    resource_type: ResourceType,
    data_path: PathBuf,
    master_adapter: Arc<dyn MasterResourceAdapter>,
    port_allocator: Arc<dyn PortAllocator>,
    plugin_manager: Arc<dyn PluginManager>,

    ready: ReadyRegistry,
    deps_store: DependencyStore,

    adapters: Mutex<HashMap<CompoundName, Arc<dyn ResourceAdapter>>>,
    started: Mutex<HashMap<CompoundName, bool>>,
    direct_dependents: Mutex<HashMap<CompoundName, Vec<ResourceDependency>>>,
    resource_dependents: Mutex<HashMap<CompoundName, Vec<ResourceDependency>>>,

    create_tasks: Mutex<HashMap<CompoundName, Arc<TaskList>>>,
    delete_tasks: Mutex<HashMap<CompoundName, Arc<TaskList>>>,
    start_tasks: Mutex<HashMap<CompoundName, Arc<TaskList>>>,
    stop_tasks: Mutex<HashMap<CompoundName, Arc<TaskList>>>,

    create_hooks: Mutex<Vec<CreateHook>>,

    /// Dependencies read during `init_adapters` but not yet propagated as
    /// inverse edges; drained by `publish_pending_dependents`. See the
    /// design notes on cross-manager init ordering.
    pending_dependencies: Mutex<HashMap<CompoundName, Vec<ResourceDependency>>>,

    resources_tx: watch::Sender<Vec<Resource>>,
}

impl ResourcesManager {
    pub fn new(
        resource_type: ResourceType,
        data_path: PathBuf,
        master_adapter: Arc<dyn MasterResourceAdapter>,
        port_allocator: Arc<dyn PortAllocator>,
        plugin_manager: Arc<dyn PluginManager>,
    ) -> Arc<Self> {
        let ready = ReadyRegistry::new(data_path.join("ready"));
        let deps_store = DependencyStore::new(data_path.join("dependencies"), data_path.join("dependents"));
        let (resources_tx, _) = watch::channel(Vec::new());

        Arc::new(Self {
            resource_type,
            data_path,
            master_adapter,
            port_allocator,
            plugin_manager,
            ready,
            deps_store,
            adapters: Mutex::new(HashMap::new()),
            started: Mutex::new(HashMap::new()),
            direct_dependents: Mutex::new(HashMap::new()),
            resource_dependents: Mutex::new(HashMap::new()),
            create_tasks: Mutex::new(HashMap::new()),
            delete_tasks: Mutex::new(HashMap::new()),
            start_tasks: Mutex::new(HashMap::new()),
            stop_tasks: Mutex::new(HashMap::new()),
            create_hooks: Mutex::new(Vec::new()),
            pending_dependencies: Mutex::new(HashMap::new()),
            resources_tx,
        })
    }

    pub fn plugin(&self) -> &str {
        &self.resource_type.plugin
    }

    pub fn resource_type_name(&self) -> &str {
        &self.resource_type.resource_type
    }

    pub fn resource_type(&self) -> &ResourceType {
        &self.resource_type
    }

    fn resources_dir(&self, name: &CompoundName) -> PathBuf {
        self.data_path.join("resources").join(name.as_str())
    }

    fn identity(&self, name: &CompoundName) -> AdapterIdentity {
        AdapterIdentity { name: name.clone(), data_path: self.resources_dir(name) }
    }

    pub fn get_resource_adapter(&self, name: &CompoundName) -> Result<Arc<dyn ResourceAdapter>, ResourcesManagerError> {
        self.adapters.lock().get(name).cloned().ok_or_else(|| ResourcesManagerError::NotFound(name.clone()))
    }

    pub fn get_debug(&self) -> DescribeTable {
        self.adapters.lock().values().flat_map(|a| a.get_debug()).collect()
    }

    pub fn is_started(&self, name: &CompoundName) -> bool {
        self.started.lock().get(name).copied().unwrap_or(false)
    }

    pub fn exists(&self, name: &CompoundName) -> bool {
        self.adapters.lock().contains_key(name)
    }

    /// Extracts the human-visible segment from a compound name (§4.5.8).
    pub fn simple_name(name: &CompoundName) -> &str {
        name.leaf()
    }

    /// Propagates inverse dependency edges (`_addDependents`, §4.5.7): for
    /// each `dependency`, looks up its owning manager and records `name` as
    /// one of its dependents.
    pub(crate) fn add_dependents(
        &self,
        name: &CompoundName,
        dependencies: &[ResourceDependency],
    ) -> Result<(), ResourcesManagerError> {
        for dep in dependencies {
            let manager = self.plugin_manager.get_resources_manager(&dep.plugin, &dep.resource_type)?;
            manager.add_dependent(
                &dep.name,
                ResourceDependency::new(self.plugin(), self.resource_type_name(), name.clone()),
            );
        }
        Ok(())
    }
}

pub(crate) fn storage_err(err: StorageError) -> rm_core::TaskError {
    rm_core::TaskError::new("storage", err.to_string())
}

/// An already-settled, immediately-failing `TaskList`, used by the
/// unsupported-operation shortcuts (`NoStart`/`NoStop`).
pub(crate) fn failed_task_list(title: impl Into<String>, err: rm_core::TaskError) -> Arc<TaskList> {
    use rm_core::Task;
    TaskList::spawn(
        vec![Task::new(title).run(move |_ctx| {
            let err = err.clone();
            async move { Err(err) }
        })],
        rm_core::TaskListOptions::new(),
        None,
    )
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
