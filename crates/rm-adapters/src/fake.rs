// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use async_trait::async_trait;
use parking_lot::Mutex;
use rm_core::{
    AdapterError, AdapterIdentity, CompoundName, DescribeTable, MasterResourceAdapter, OperationOptions, Resource,
    ResourceAdapter, ResourceDependency, ResourceState, Task, TaskError, TaskList, TaskListOptions,
};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// A `ResourceAdapter` that lives entirely in memory, configurable to fail
/// any one of its operations on demand.
pub struct FakeAdapter {
    name: CompoundName,
    plugin: String,
    resource_type: String,
    /// `None` once `destroy` has run, closing every outstanding
    /// `resource_stream` receiver (per the trait's "sender side is dropped
    /// on destroy" contract).
    state_tx: Mutex<Option<watch::Sender<Option<Resource>>>>,
    state_rx: watch::Receiver<Option<Resource>>,
    fail_start: AtomicBool,
    fail_stop: AtomicBool,
    fail_delete: AtomicBool,
    destroyed: AtomicBool,
}

impl FakeAdapter {
    pub fn new(plugin: impl Into<String>, resource_type: impl Into<String>, name: CompoundName) -> Arc<Self> {
        let (state_tx, state_rx) = watch::channel(None);
        let plugin = plugin.into();
        let resource_type = resource_type.into();
        let initial = Resource::new(plugin.clone(), resource_type.clone(), name.clone(), ResourceState::Stopped);
        let _ = state_tx.send(Some(initial));
        Arc::new(Self {
            name,
            plugin,
            resource_type,
            state_tx: Mutex::new(Some(state_tx)),
            state_rx,
            fail_start: AtomicBool::new(false),
            fail_stop: AtomicBool::new(false),
            fail_delete: AtomicBool::new(false),
            destroyed: AtomicBool::new(false),
        })
    }

    pub fn set_fail_start(&self, fail: bool) {
        self.fail_start.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_stop(&self, fail: bool) {
        self.fail_stop.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_delete(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }

    /// Pushes a spontaneous state change through `resource_stream`, as a
    /// real adapter's own background polling/health loop would, independent
    /// of any manager-driven operation.
    pub fn set_state(&self, state: ResourceState) {
        let resource = Resource::new(self.plugin.clone(), self.resource_type.clone(), self.name.clone(), state);
        if let Some(tx) = self.state_tx.lock().as_ref() {
            let _ = tx.send(Some(resource));
        }
    }
}

#[async_trait]
impl ResourceAdapter for FakeAdapter {
    fn start(&self, _options: OperationOptions) -> Arc<TaskList> {
        let title = format!("start {}", self.name);
        if self.fail_start.load(Ordering::SeqCst) {
            TaskList::spawn(
                vec![Task::new(title).run(|_ctx| async { Err(TaskError::new("fake_start_failed", "configured to fail")) })],
                TaskListOptions::new(),
                None,
            )
        } else {
            let this = self.state_tx.lock().clone();
            let plugin = self.plugin.clone();
            let resource_type = self.resource_type.clone();
            let name = self.name.clone();
            TaskList::spawn(
                vec![Task::new(title).run(move |_ctx| {
                    let tx = this.clone();
                    let resource = Resource::new(plugin.clone(), resource_type.clone(), name.clone(), ResourceState::Started);
                    async move {
                        if let Some(tx) = tx {
                            let _ = tx.send(Some(resource));
                        }
                        Ok(())
                    }
                })],
                TaskListOptions::new(),
                None,
            )
        }
    }

    fn stop(&self, _options: OperationOptions) -> Arc<TaskList> {
        let title = format!("stop {}", self.name);
        if self.fail_stop.load(Ordering::SeqCst) {
            TaskList::spawn(
                vec![Task::new(title).run(|_ctx| async { Err(TaskError::new("fake_stop_failed", "configured to fail")) })],
                TaskListOptions::new(),
                None,
            )
        } else {
            let tx = self.state_tx.lock().clone();
            let plugin = self.plugin.clone();
            let resource_type = self.resource_type.clone();
            let name = self.name.clone();
            TaskList::spawn(
                vec![Task::new(title).run(move |_ctx| {
                    let tx = tx.clone();
                    let resource = Resource::new(plugin.clone(), resource_type.clone(), name.clone(), ResourceState::Stopped);
                    async move {
                        if let Some(tx) = tx {
                            let _ = tx.send(Some(resource));
                        }
                        Ok(())
                    }
                })],
                TaskListOptions::new(),
                None,
            )
        }
    }

    fn delete(&self, _options: OperationOptions) -> Arc<TaskList> {
        let title = format!("delete {}", self.name);
        if self.fail_delete.load(Ordering::SeqCst) {
            TaskList::spawn(
                vec![Task::new(title).run(|_ctx| async { Err(TaskError::new("fake_delete_failed", "configured to fail")) })],
                TaskListOptions::new(),
                None,
            )
        } else {
            TaskList::spawn(vec![Task::new(title).run(|_ctx| async { Ok(()) })], TaskListOptions::new(), None)
        }
    }

    async fn destroy(&self) {
        self.destroyed.store(true, Ordering::SeqCst);
        self.state_tx.lock().take();
    }

    fn resource_stream(&self) -> watch::Receiver<Option<Resource>> {
        self.state_rx.clone()
    }

    fn get_debug(&self) -> DescribeTable {
        vec![
            ("name".to_string(), self.name.to_string()),
            ("plugin".to_string(), self.plugin.clone()),
            ("resourceType".to_string(), self.resource_type.clone()),
            ("destroyed".to_string(), self.is_destroyed().to_string()),
        ]
    }
}

/// A `MasterResourceAdapter` that hands out [`FakeAdapter`]s, configurable
/// to fail creation and to seed `ctx.dependencies`/`ctx.dependents` the way
/// a real adapter would after creating child resources of its own.
pub struct FakeMasterAdapter {
    plugin: String,
    resource_type: String,
    fail_create: AtomicBool,
    fail_init: Mutex<HashSet<CompoundName>>,
    dependencies_on_create: Mutex<Vec<ResourceDependency>>,
    dependents_on_create: Mutex<Vec<ResourceDependency>>,
    created: Mutex<Vec<Arc<FakeAdapter>>>,
}

impl FakeMasterAdapter {
    pub fn new(plugin: impl Into<String>, resource_type: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            plugin: plugin.into(),
            resource_type: resource_type.into(),
            fail_create: AtomicBool::new(false),
            fail_init: Mutex::new(HashSet::new()),
            dependencies_on_create: Mutex::new(Vec::new()),
            dependents_on_create: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
        })
    }

    pub fn set_fail_create(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    /// `init_resource_adapter` fails for this one name, e.g. to exercise
    /// `init`'s per-resource `InitError` collection.
    pub fn set_fail_init(&self, name: &CompoundName) {
        self.fail_init.lock().insert(name.clone());
    }

    pub fn set_dependencies_on_create(&self, deps: Vec<ResourceDependency>) {
        *self.dependencies_on_create.lock() = deps;
    }

    pub fn set_dependents_on_create(&self, deps: Vec<ResourceDependency>) {
        *self.dependents_on_create.lock() = deps;
    }

    pub fn created_adapters(&self) -> Vec<Arc<FakeAdapter>> {
        self.created.lock().clone()
    }
}

#[async_trait]
impl MasterResourceAdapter for FakeMasterAdapter {
    fn create_resource_adapter(&self, identity: AdapterIdentity, _options: OperationOptions) -> Arc<TaskList> {
        let title = format!("create {}", identity.name);
        if self.fail_create.load(Ordering::SeqCst) {
            return TaskList::spawn(
                vec![Task::new(title).run(|_ctx| async { Err(TaskError::new("fake_create_failed", "configured to fail")) })],
                TaskListOptions::new(),
                None,
            );
        }

        let plugin = self.plugin.clone();
        let resource_type = self.resource_type.clone();
        let dependencies = self.dependencies_on_create.lock().clone();
        let dependents = self.dependents_on_create.lock().clone();
        let created = &self.created;
        let adapter = FakeAdapter::new(plugin, resource_type, identity.name.clone());
        created.lock().push(adapter.clone());

        TaskList::spawn(
            vec![Task::new(title).run(move |ctx| {
                let adapter = adapter.clone() as Arc<dyn ResourceAdapter>;
                let dependencies = dependencies.clone();
                let dependents = dependents.clone();
                async move {
                    ctx.set_resource_adapter(adapter);
                    ctx.set_dependencies(dependencies);
                    ctx.set_dependents(dependents);
                    Ok(())
                }
            })],
            TaskListOptions::new(),
            None,
        )
    }

    async fn init_resource_adapter(
        &self,
        identity: AdapterIdentity,
    ) -> Result<Arc<dyn ResourceAdapter>, rm_core::AdapterError> {
        if self.fail_init.lock().contains(&identity.name) {
            return Err(AdapterError::msg(format!("configured to fail init for {}", identity.name)));
        }
        let adapter = FakeAdapter::new(self.plugin.clone(), self.resource_type.clone(), identity.name);
        self.created.lock().push(adapter.clone());
        Ok(adapter)
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
