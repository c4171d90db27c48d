// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! [`TaskList`]: the abortable, nestable, concurrent-or-sequential pipeline
//! runtime (C1).

use crate::context::OperationContext;
use crate::error::{AbortedError, TaskError};
use crate::task::{Task, TaskOutcome};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};

/// Terminal/progress events emitted on a list's broadcast stream, matching
/// the wire envelope in shape (see `rm-wire` for the serialized form).
#[derive(Debug, Clone)]
pub enum TaskEvent {
    Progress { persist: bool, message: String },
    Done,
    Error { code: String, message: String },
    Aborted,
}

impl TaskEvent {
    fn is_terminal(&self) -> bool {
        matches!(self, TaskEvent::Done | TaskEvent::Error { .. } | TaskEvent::Aborted)
    }
}

pub type OnError = Box<dyn Fn(&TaskError, &Arc<OperationContext>) + Send + Sync>;
pub type OnComplete = Box<dyn Fn() + Send + Sync>;
pub type OnDone = Box<dyn Fn(bool) + Send + Sync>;

#[derive(Default)]
pub struct TaskListOptions {
    pub concurrent: bool,
    pub collapse: bool,
    pub fresh_context: bool,
    pub on_error: Option<OnError>,
    pub on_complete: Option<OnComplete>,
    pub on_done: Option<OnDone>,
}

impl TaskListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn concurrent(mut self, v: bool) -> Self {
        self.concurrent = v;
        self
    }

    pub fn collapse(mut self, v: bool) -> Self {
        self.collapse = v;
        self
    }

    pub fn fresh_context(mut self, v: bool) -> Self {
        self.fresh_context = v;
        self
    }

    pub fn on_error(mut self, f: impl Fn(&TaskError, &Arc<OperationContext>) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }

    pub fn on_complete(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    pub fn on_done(mut self, f: impl Fn(bool) + Send + Sync + 'static) -> Self {
        self.on_done = Some(Box::new(f));
        self
    }
}

/// A running (or already-settled) pipeline. Execution starts the moment
/// [`TaskList::spawn`] returns — callers observe it via [`TaskList::subscribe`]
/// or await it via [`TaskList::join`].
pub struct TaskList {
    concurrent: bool,
    #[allow(dead_code)] // display hint only, consumed by a CLI layer out of scope here
    collapse: bool,
    ctx: Arc<OperationContext>,
    events_tx: broadcast::Sender<TaskEvent>,
    done_tx: watch::Sender<Option<Result<(), TaskError>>>,
    done_rx: watch::Receiver<Option<Result<(), TaskError>>>,
}

impl TaskList {
    /// Builds and immediately starts executing `tasks`. `parent` is the
    /// enclosing list's context, if any — `options.fresh_context` governs
    /// whether the data fields are inherited, but cancellation always
    /// cascades down from the root.
    pub fn spawn(tasks: Vec<Task>, options: TaskListOptions, parent: Option<&Arc<OperationContext>>) -> Arc<Self> {
        let ctx = match parent {
            None => OperationContext::fresh(),
            Some(parent) if options.fresh_context => OperationContext::fresh_child_of(parent),
            // Non-fresh nesting shares the parent's actual context object, not a copy,
            // so a nested task's writes (e.g. ctx.resourceAdapter) are visible once it settles.
            Some(parent) => Arc::clone(parent),
        };
        let (events_tx, _) = broadcast::channel(64);
        let (done_tx, done_rx) = watch::channel(None);

        let list = Arc::new(Self {
            concurrent: options.concurrent,
            collapse: options.collapse,
            ctx,
            events_tx,
            done_tx,
            done_rx,
        });

        let on_error = options.on_error;
        let on_complete = options.on_complete;
        let on_done = options.on_done;
        let driver = list.clone();
        tokio::spawn(async move {
            driver.execute(tasks, on_error, on_complete, on_done).await;
        });

        list
    }

    pub fn ctx(&self) -> &Arc<OperationContext> {
        &self.ctx
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TaskEvent> {
        self.events_tx.subscribe()
    }

    /// Requests cancellation. Cooperative: the currently running task must
    /// observe `ctx.is_aborted()` to actually stop. Cascades to any nested
    /// list automatically since nested contexts derive their cancellation
    /// from this one.
    pub fn abort(&self) {
        self.ctx.cancellation().cancel();
    }

    pub fn is_settled(&self) -> bool {
        self.done_rx.borrow().is_some()
    }

    /// Awaits settlement. Resolves `Ok(())` on normal completion, the
    /// failing task's error otherwise (including an aborted-kind error).
    pub async fn join(&self) -> Result<(), TaskError> {
        let mut rx = self.done_rx.clone();
        loop {
            if let Some(outcome) = rx.borrow().clone() {
                return outcome;
            }
            if rx.changed().await.is_err() {
                return Err(TaskError::new("internal", "task list driver dropped"));
            }
        }
    }

    async fn execute(
        self: Arc<Self>,
        tasks: Vec<Task>,
        on_error: Option<OnError>,
        on_complete: Option<OnComplete>,
        on_done: Option<OnDone>,
    ) {
        let mut failed: Option<TaskError> = None;
        let mut aborted = false;

        if self.concurrent {
            let mut handles = Vec::with_capacity(tasks.len());
            for task in tasks {
                let ctx = self.ctx.clone();
                let events = self.events_tx.clone();
                handles.push(tokio::spawn(Self::run_one(ctx, events, task)));
            }
            for handle in handles {
                match handle.await {
                    Ok(Ok(())) => {}
                    Ok(Err(err)) => {
                        if err.is_aborted() {
                            aborted = true;
                        } else if failed.is_none() {
                            failed = Some(err);
                            self.ctx.cancellation().cancel();
                        }
                    }
                    Err(join_err) => {
                        if failed.is_none() {
                            failed = Some(TaskError::new("panic", join_err.to_string()));
                        }
                    }
                }
            }
            if failed.is_none() && !aborted && self.ctx.is_aborted() {
                aborted = true;
            }
        } else {
            for task in tasks {
                // Once a failure/abort has occurred, remaining tasks are
                // dropped unless marked `always_run` (e.g. a Finalize step
                // that must still observe ctx regardless of how an earlier
                // task ended).
                if !task.always_run {
                    if self.ctx.is_aborted() {
                        aborted = true;
                        continue;
                    }
                    if failed.is_some() || aborted {
                        continue;
                    }
                }
                match Self::run_one(self.ctx.clone(), self.events_tx.clone(), task).await {
                    Ok(()) => {}
                    Err(err) => {
                        if err.is_aborted() {
                            aborted = true;
                        } else if failed.is_none() {
                            failed = Some(err);
                        }
                    }
                }
            }
        }

        let outcome: Result<(), TaskError> = if aborted {
            Err(AbortedError.into())
        } else if let Some(err) = failed {
            Err(err)
        } else {
            Ok(())
        };

        let event = match &outcome {
            Ok(()) => TaskEvent::Done,
            Err(err) if err.is_aborted() => TaskEvent::Aborted,
            Err(err) => TaskEvent::Error { code: err.code.clone(), message: err.message.clone() },
        };

        match &outcome {
            Ok(()) => {
                if let Some(on_complete) = &on_complete {
                    on_complete();
                }
            }
            Err(err) if !err.is_aborted() => {
                if let Some(on_error) = &on_error {
                    on_error(err, &self.ctx);
                }
            }
            Err(_) => {}
        }
        if let Some(on_done) = &on_done {
            on_done(outcome.is_err());
        }

        let _ = self.events_tx.send(event);
        let _ = self.done_tx.send(Some(outcome));
    }

    async fn run_one(
        ctx: Arc<OperationContext>,
        events: broadcast::Sender<TaskEvent>,
        task: Task,
    ) -> Result<(), TaskError> {
        if let Some(enabled) = &task.enabled {
            if !enabled() {
                return Ok(());
            }
        }
        if let Some(skip) = &task.skip {
            if let Some(reason) = skip() {
                let _ = events.send(TaskEvent::Progress { persist: false, message: reason });
                return Ok(());
            }
        }
        if ctx.is_aborted() && !task.always_run {
            return Err(AbortedError.into());
        }
        let _ = events.send(TaskEvent::Progress { persist: true, message: task.title.clone() });

        let Some(body) = &task.body else {
            return Ok(());
        };
        match body(ctx).await? {
            TaskOutcome::Done => Ok(()),
            TaskOutcome::Nested(nested) => {
                let mut rx = nested.subscribe();
                while let Ok(event) = rx.recv().await {
                    let terminal = event.is_terminal();
                    let _ = events.send(event);
                    if terminal {
                        break;
                    }
                }
                nested.join().await
            }
        }
    }
}

#[cfg(test)]
#[path = "task_list_tests.rs"]
mod tests;
