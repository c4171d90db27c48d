// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ResourcesManager::create` (§4.5.2).

use super::ResourcesManager;
use parking_lot::Mutex;
use rm_core::{CompoundName, OperationContext, OperationOptions, Task, TaskError, TaskList, TaskListOptions};
use std::sync::Arc;

impl ResourcesManager {
    /// Re-entering with an in-flight create for `name` returns the same
    /// `TaskList` (P4); its progress stream and outcome are shared by every
    /// caller (S5).
    pub fn create(self: &Arc<Self>, name: &CompoundName, options: OperationOptions) -> Arc<TaskList> {
        let mut create_tasks = self.create_tasks.lock();
        if let Some(existing) = create_tasks.get(name) {
            return Arc::clone(existing);
        }

        let name = name.clone();
        let nested_ctx: Arc<Mutex<Option<Arc<OperationContext>>>> = Arc::new(Mutex::new(None));

        let create_adapter = {
            let this = Arc::clone(self);
            let name = name.clone();
            let options = options.clone();
            let nested_ctx = Arc::clone(&nested_ctx);
            Task::new("Create adapter")
                .skip_if({
                    let this = Arc::clone(&this);
                    let name = name.clone();
                    move || this.exists(&name).then(|| "already exists".to_string())
                })
                .run_nested(move |_ctx| {
                    let this = Arc::clone(&this);
                    let name = name.clone();
                    let options = options.clone();
                    let nested_ctx = Arc::clone(&nested_ctx);
                    async move {
                        let identity = this.identity(&name);
                        let nested = this.master_adapter.create_resource_adapter(identity, options);
                        *nested_ctx.lock() = Some(Arc::clone(nested.ctx()));
                        Ok(nested)
                    }
                })
        };

        let finalize = {
            let this = Arc::clone(self);
            let name = name.clone();
            let nested_ctx = Arc::clone(&nested_ctx);
            Task::new("Finalize").always_run().run(move |_ctx| {
                let this = Arc::clone(&this);
                let name = name.clone();
                let nested_ctx = nested_ctx.lock().clone();
                async move { this.finalize_create(&name, nested_ctx).await }
            })
        };

        let start_if_required = {
            let this = Arc::clone(self);
            let name = name.clone();
            let options = options.clone();
            let start_on_create = self.resource_type.create.start_on_create && self.resource_type.supports_start_stop();
            Task::new("Start if required").enabled(move || start_on_create).run(move |_ctx| {
                let this = Arc::clone(&this);
                let name = name.clone();
                let options = options.clone();
                // §7: start failures here trigger `start`'s own rollback, not
                // create's — swallow the outcome rather than failing create.
                async move {
                    let _ = this.start(&name, options).join().await;
                    Ok(())
                }
            })
        };

        let create_hooks = {
            let this = Arc::clone(self);
            let name = name.clone();
            Task::new("Create hooks").run_nested(move |ctx| {
                let this = Arc::clone(&this);
                let name = name.clone();
                async move {
                    let hook_tasks = this
                        .create_hooks_snapshot()
                        .into_iter()
                        .enumerate()
                        .map(|(i, hook)| {
                            let name = name.clone();
                            Task::new(format!("hook {i}")).run(move |ctx| {
                                let hook = Arc::clone(&hook);
                                let name = name.clone();
                                async move { hook(name, ctx).await }
                            })
                        })
                        .collect();
                    Ok(TaskList::spawn(hook_tasks, TaskListOptions::new().concurrent(true), Some(&ctx)))
                }
            })
        };

        let list = TaskList::spawn(
            vec![create_adapter, finalize, start_if_required, create_hooks],
            TaskListOptions::new()
                .fresh_context(true)
                .on_error({
                    let this = Arc::clone(self);
                    let name = name.clone();
                    let options = options.clone();
                    move |err, _ctx| {
                        // §7: partial state is left installed by `finalize_create`
                        // so this cleans it up; aborted creates are left for the
                        // caller to clean up explicitly (S4).
                        if !err.is_aborted() {
                            let this = Arc::clone(&this);
                            let name = name.clone();
                            let options = options.clone();
                            tokio::spawn(async move {
                                let _ = this.delete(&name, options).join().await;
                            });
                        }
                    }
                })
                .on_done({
                    let this = Arc::clone(self);
                    let name = name.clone();
                    move |_failed| {
                        this.create_tasks.lock().remove(&name);
                    }
                }),
            None,
        );

        create_tasks.insert(name, Arc::clone(&list));
        list
    }

    /// §4.5.2 step 2. Runs even if the adapter-creation task above failed or
    /// was skipped, so whatever fragment reached `nested_ctx` (if any) is
    /// still installed and becomes deletable. A `None` means the create task
    /// never ran its body at all (e.g. "already exists"), so there is
    /// nothing new to finalize.
    async fn finalize_create(
        self: Arc<Self>,
        name: &CompoundName,
        nested_ctx: Option<Arc<OperationContext>>,
    ) -> Result<(), TaskError> {
        let Some(nested_ctx) = nested_ctx else { return Ok(()) };
        let Some(adapter) = nested_ctx.resource_adapter() else { return Ok(()) };
        let dependents = nested_ctx.dependents();
        let dependencies = nested_ctx.dependencies();

        self.adapters.lock().insert(name.clone(), Arc::clone(&adapter));
        self.spawn_stream_forwarder(Arc::clone(&adapter));
        self.direct_dependents.lock().insert(name.clone(), dependents.clone());
        self.add_dependents(name, &dependencies).map_err(|e| TaskError::new("dependents", e.to_string()))?;
        self.emit_update();

        Self::await_first_snapshot(&adapter).await?;

        self.ready.write(name).await.map_err(super::storage_err)?;
        self.deps_store.write_dependencies(name, &dependencies).await.map_err(super::storage_err)?;
        self.deps_store.write_dependents(name, &dependents).await.map_err(super::storage_err)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "create_tests.rs"]
mod tests;
