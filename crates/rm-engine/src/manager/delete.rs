// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ResourcesManager::delete` (§4.5.3). Every step is `always_run`: delete
//! is unconditional best-effort cleanup, and per §7 its own failures don't
//! trigger compensation, only reporting — so later steps still run even if
//! an earlier one (e.g. the nested stop) fails.

use super::ResourcesManager;
use rm_core::{unique_deps, CompoundName, OperationOptions, Task, TaskList, TaskListOptions};
use std::sync::Arc;

impl ResourcesManager {
    /// Re-entering with an in-flight delete for `name` returns the same
    /// `TaskList` (P4).
    pub fn delete(self: &Arc<Self>, name: &CompoundName, options: OperationOptions) -> Arc<TaskList> {
        let mut delete_tasks = self.delete_tasks.lock();
        if let Some(existing) = delete_tasks.get(name) {
            return Arc::clone(existing);
        }

        let name = name.clone();

        let abort_create = {
            let this = Arc::clone(self);
            let name = name.clone();
            Task::new("Abort create").always_run().run(move |_ctx| {
                let this = Arc::clone(&this);
                let name = name.clone();
                async move {
                    if let Some(create) = this.create_tasks.lock().get(&name).cloned() {
                        create.abort();
                    }
                    Ok(())
                }
            })
        };

        let abort_start_stop_if_started = {
            let this = Arc::clone(self);
            let name = name.clone();
            let options = options.clone();
            Task::new("Abort start, stop if started").always_run().run_nested(move |ctx| {
                let this = Arc::clone(&this);
                let name = name.clone();
                let options = options.clone();
                async move {
                    if let Some(start) = this.start_tasks.lock().get(&name).cloned() {
                        start.abort();
                    }
                    if this.resource_type.supports_start_stop() && this.is_started(&name) {
                        Ok(this.stop(&name, options))
                    } else {
                        Ok(TaskList::spawn(Vec::new(), TaskListOptions::new(), Some(&ctx)))
                    }
                }
            })
        };

        let delete_dependents = {
            let this = Arc::clone(self);
            let name = name.clone();
            let options = options.clone();
            Task::new("Delete dependents").always_run().run_nested(move |ctx| {
                let this = Arc::clone(&this);
                let name = name.clone();
                let options = options.clone();
                async move {
                    let resource_deps = this.resource_dependents.lock().get(&name).cloned().unwrap_or_default();
                    let direct_deps = this.direct_dependents.lock().get(&name).cloned().unwrap_or_default();
                    let deps = unique_deps(resource_deps.into_iter().chain(direct_deps));

                    let tasks = deps
                        .into_iter()
                        .map(|dep| {
                            let options = options.clone();
                            Task::new(format!("Delete {}", dep.name)).run_nested(move |_ctx| {
                                let dep = dep.clone();
                                let options = options.clone();
                                let this = Arc::clone(&this);
                                async move {
                                    let manager = this
                                        .plugin_manager
                                        .get_resources_manager(&dep.plugin, &dep.resource_type)
                                        .map_err(|e| rm_core::TaskError::new("lookup", e.to_string()))?;
                                    Ok(manager.delete(&dep.name, options))
                                }
                            })
                        })
                        .collect();

                    Ok(TaskList::spawn(tasks, TaskListOptions::new().concurrent(true), Some(&ctx)))
                }
            })
        };

        let delete_resource = {
            let this = Arc::clone(self);
            let name = name.clone();
            let options = options.clone();
            Task::new("Delete resource")
                .always_run()
                .skip_if({
                    let this = Arc::clone(&this);
                    let name = name.clone();
                    move || (!this.exists(&name)).then(|| "does not exist".to_string())
                })
                .run_nested(move |_ctx| {
                    let this = Arc::clone(&this);
                    let name = name.clone();
                    let options = options.clone();
                    async move {
                        let adapter = this
                            .get_resource_adapter(&name)
                            .map_err(|e| rm_core::TaskError::new("not_found", e.to_string()))?;
                        Ok(adapter.delete(options))
                    }
                })
        };

        let final_cleanup = {
            let this = Arc::clone(self);
            let name = name.clone();
            Task::new("Final cleanup")
                .always_run()
                .skip_if({
                    let this = Arc::clone(&this);
                    let name = name.clone();
                    move || (!this.exists(&name)).then(|| "does not exist".to_string())
                })
                .run(move |_ctx| {
                    let this = Arc::clone(&this);
                    let name = name.clone();
                    async move {
                        if let Some(adapter) = this.adapters.lock().remove(&name) {
                            adapter.destroy().await;
                        }
                        this.port_allocator.release_port(this.plugin(), this.resource_type_name(), &name).await;
                        this.ready.delete(&name).await.map_err(super::storage_err)?;
                        this.deps_store.delete_dependencies(&name).await.map_err(super::storage_err)?;
                        this.deps_store.delete_dependents(&name).await.map_err(super::storage_err)?;
                        this.direct_dependents.lock().remove(&name);
                        this.resource_dependents.lock().remove(&name);
                        this.started.lock().remove(&name);
                        Ok(())
                    }
                })
        };

        let list = TaskList::spawn(
            vec![abort_create, abort_start_stop_if_started, delete_dependents, delete_resource, final_cleanup],
            TaskListOptions::new().on_done({
                let this = Arc::clone(self);
                let name = name.clone();
                move |_failed| {
                    this.delete_tasks.lock().remove(&name);
                    this.emit_update();
                }
            }),
            None,
        );

        delete_tasks.insert(name, Arc::clone(&list));
        list
    }
}

#[cfg(test)]
#[path = "delete_tests.rs"]
mod tests;
