// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ResourcesManager::stop` (§4.5.5).

use super::{failed_task_list, ResourcesManager};
use rm_core::{CompoundName, OperationOptions, ResourceDependency, ResourceNoStopError, Task, TaskError, TaskList, TaskListOptions};
use std::sync::Arc;

impl ResourcesManager {
    /// Re-entering with an in-flight stop for `name` returns the same
    /// `TaskList` (P4).
    pub fn stop(self: &Arc<Self>, name: &CompoundName, options: OperationOptions) -> Arc<TaskList> {
        if !self.resource_type.supports_start_stop() {
            return failed_task_list("Stop", TaskError::from(ResourceNoStopError));
        }

        let mut stop_tasks = self.stop_tasks.lock();
        if let Some(existing) = stop_tasks.get(name) {
            return Arc::clone(existing);
        }

        let name = name.clone();

        let abort_start = {
            let this = Arc::clone(self);
            let name = name.clone();
            Task::new("Abort start if in-flight").run(move |_ctx| {
                let this = Arc::clone(&this);
                let name = name.clone();
                async move {
                    if let Some(start) = this.start_tasks.lock().get(&name).cloned() {
                        start.abort();
                    }
                    Ok(())
                }
            })
        };

        let stop_dependents = {
            let this = Arc::clone(self);
            let name = name.clone();
            let options = options.clone();
            Task::new("Stop dependents").run_nested(move |ctx| {
                let this = Arc::clone(&this);
                let name = name.clone();
                let options = options.clone();
                async move {
                    let deps = this.resource_dependents.lock().get(&name).cloned().unwrap_or_default();
                    let tasks = stoppable_tasks(&this, deps, &options)?;
                    Ok(TaskList::spawn(tasks, TaskListOptions::new().concurrent(true), Some(&ctx)))
                }
            })
        };

        let stop_resource = {
            let this = Arc::clone(self);
            let name = name.clone();
            let options = options.clone();
            Task::new("Stop resource").run_nested(move |_ctx| {
                let this = Arc::clone(&this);
                let name = name.clone();
                let options = options.clone();
                async move {
                    let adapter =
                        this.get_resource_adapter(&name).map_err(|e| TaskError::new("not_found", e.to_string()))?;
                    Ok(adapter.stop(options))
                }
            })
        };

        let stop_children = {
            let this = Arc::clone(self);
            let name = name.clone();
            let options = options.clone();
            Task::new("Stop created children").run_nested(move |ctx| {
                let this = Arc::clone(&this);
                let name = name.clone();
                let options = options.clone();
                async move {
                    let deps = this.direct_dependents.lock().get(&name).cloned().unwrap_or_default();
                    let tasks = stoppable_tasks(&this, deps, &options)?;
                    Ok(TaskList::spawn(tasks, TaskListOptions::new().concurrent(true), Some(&ctx)))
                }
            })
        };

        let list = TaskList::spawn(
            vec![abort_start, stop_dependents, stop_resource, stop_children],
            TaskListOptions::new()
                .on_complete({
                    let this = Arc::clone(self);
                    let name = name.clone();
                    move || {
                        this.started.lock().insert(name.clone(), false);
                    }
                })
                .on_done({
                    let this = Arc::clone(self);
                    let name = name.clone();
                    move |_failed| {
                        this.stop_tasks.lock().remove(&name);
                        this.emit_update();
                    }
                }),
            None,
        );

        stop_tasks.insert(name, Arc::clone(&list));
        list
    }
}

/// Builds one nested-delegation `Task` per dependency whose owning manager
/// supports stop, used by both step 2 (resourceDependents) and step 4
/// (directDependents) — both filter the same way, only the source map
/// differs (P7).
fn stoppable_tasks(
    this: &Arc<ResourcesManager>,
    deps: Vec<ResourceDependency>,
    options: &OperationOptions,
) -> Result<Vec<Task>, TaskError> {
    let mut tasks = Vec::new();
    for dep in deps {
        let manager = this
            .plugin_manager
            .get_resources_manager(&dep.plugin, &dep.resource_type)
            .map_err(|e| TaskError::new("lookup", e.to_string()))?;
        if !manager.supports_start_stop() {
            continue;
        }
        let options = options.clone();
        tasks.push(Task::new(format!("Stop {}", dep.name)).run_nested(move |_ctx| {
            let manager = Arc::clone(&manager);
            let dep = dep.clone();
            let options = options.clone();
            async move { Ok(manager.stop(&dep.name, options)) }
        }));
    }
    Ok(tasks)
}

#[cfg(test)]
#[path = "stop_tests.rs"]
mod tests;
