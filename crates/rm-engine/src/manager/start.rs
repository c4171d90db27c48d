// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ResourcesManager::start` (§4.5.4).

use super::{failed_task_list, ResourcesManager};
use rm_core::{CompoundName, OperationOptions, ResourceNoStartError, Task, TaskError, TaskList, TaskListOptions};
use std::sync::Arc;

fn start_precondition(this: &Arc<ResourcesManager>, name: &CompoundName) -> Option<String> {
    if !this.exists(name) {
        return Some("does not exist, create it first".to_string());
    }
    if this.is_started(name) {
        return Some("already started".to_string());
    }
    None
}

impl ResourcesManager {
    /// Re-entering with an in-flight start for `name` returns the same
    /// `TaskList` (P4).
    pub fn start(self: &Arc<Self>, name: &CompoundName, options: OperationOptions) -> Arc<TaskList> {
        if !self.resource_type.supports_start_stop() {
            return failed_task_list("Start", TaskError::from(ResourceNoStartError));
        }

        let mut start_tasks = self.start_tasks.lock();
        if let Some(existing) = start_tasks.get(name) {
            return Arc::clone(existing);
        }

        let name = name.clone();

        let abort_stop = {
            let this = Arc::clone(self);
            let name = name.clone();
            Task::new("Abort stop if in-flight")
                .skip_if({
                    let this = Arc::clone(&this);
                    let name = name.clone();
                    move || start_precondition(&this, &name)
                })
                .run(move |_ctx| {
                    let this = Arc::clone(&this);
                    let name = name.clone();
                    async move {
                        if let Some(stop) = this.stop_tasks.lock().get(&name).cloned() {
                            stop.abort();
                        }
                        Ok(())
                    }
                })
        };

        let start_children = {
            let this = Arc::clone(self);
            let name = name.clone();
            let options = options.clone();
            Task::new("Start created children")
                .skip_if({
                    let this = Arc::clone(&this);
                    let name = name.clone();
                    move || start_precondition(&this, &name)
                })
                .run_nested(move |ctx| {
                let this = Arc::clone(&this);
                let name = name.clone();
                let options = options.clone();
                async move {
                    let children = this.direct_dependents.lock().get(&name).cloned().unwrap_or_default();
                    let mut tasks = Vec::new();
                    for dep in children {
                        let manager = this
                            .plugin_manager
                            .get_resources_manager(&dep.plugin, &dep.resource_type)
                            .map_err(|e| TaskError::new("lookup", e.to_string()))?;
                        if !manager.supports_start_stop() {
                            continue;
                        }
                        let options = options.clone();
                        tasks.push(Task::new(format!("Start {}", dep.name)).run_nested(move |_ctx| {
                            let manager = Arc::clone(&manager);
                            let dep = dep.clone();
                            let options = options.clone();
                            async move { Ok(manager.start(&dep.name, options)) }
                        }));
                    }
                    // Sequential: dependencies come up before their parent (P6).
                    Ok(TaskList::spawn(tasks, TaskListOptions::new(), Some(&ctx)))
                }
            })
        };

        let start_resource = {
            let this = Arc::clone(self);
            let name = name.clone();
            let options = options.clone();
            Task::new("Start resource")
                .skip_if({
                    let this = Arc::clone(&this);
                    let name = name.clone();
                    move || start_precondition(&this, &name)
                })
                .run_nested(move |_ctx| {
                let this = Arc::clone(&this);
                let name = name.clone();
                let options = options.clone();
                async move {
                    let adapter =
                        this.get_resource_adapter(&name).map_err(|e| TaskError::new("not_found", e.to_string()))?;
                    Ok(adapter.start(options))
                }
            })
        };

        let list = TaskList::spawn(
            vec![abort_stop, start_children, start_resource],
            TaskListOptions::new()
                .on_complete({
                    let this = Arc::clone(self);
                    let name = name.clone();
                    move || {
                        this.started.lock().insert(name.clone(), true);
                    }
                })
                .on_error({
                    let this = Arc::clone(self);
                    let name = name.clone();
                    let options = options.clone();
                    move |err, _ctx| {
                        if !err.is_aborted() {
                            let this = Arc::clone(&this);
                            let name = name.clone();
                            let options = options.clone();
                            tokio::spawn(async move {
                                let _ = this.stop(&name, options).join().await;
                            });
                        }
                    }
                })
                .on_done({
                    let this = Arc::clone(self);
                    let name = name.clone();
                    move |_failed| {
                        this.start_tasks.lock().remove(&name);
                        this.emit_update();
                    }
                }),
            None,
        );

        start_tasks.insert(name, Arc::clone(&list));
        list
    }
}

#[cfg(test)]
#[path = "start_tests.rs"]
mod tests;
