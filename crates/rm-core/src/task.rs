// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A single step of a [`crate::TaskList`] (C1).

use crate::context::OperationContext;
use crate::error::TaskError;
use crate::task_list::TaskList;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// What a task's body produces: either it's done, or it hands off to a
/// nested list whose completion this task waits on.
pub enum TaskOutcome {
    Done,
    Nested(Arc<TaskList>),
}

pub type TaskFuture = Pin<Box<dyn Future<Output = Result<TaskOutcome, TaskError>> + Send>>;
pub type TaskBody = Box<dyn Fn(Arc<OperationContext>) -> TaskFuture + Send + Sync>;
pub type EnabledPredicate = Box<dyn Fn() -> bool + Send + Sync>;
pub type SkipPredicate = Box<dyn Fn() -> Option<String> + Send + Sync>;

/// One pipeline step. `title` is display-only; `enabled`/`skip` are
/// evaluated lazily at the task's turn, never up front.
pub struct Task {
    pub(crate) title: String,
    pub(crate) enabled: Option<EnabledPredicate>,
    pub(crate) skip: Option<SkipPredicate>,
    pub(crate) body: Option<TaskBody>,
    pub(crate) always_run: bool,
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task").field("title", &self.title).finish_non_exhaustive()
    }
}

impl Task {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), enabled: None, skip: None, body: None, always_run: false }
    }

    /// Marks this task to run even if an earlier sequential sibling failed
    /// or the list was aborted before this task's turn. Used by
    /// compensation/finalization steps that must observe whatever partial
    /// state earlier tasks left in `ctx` regardless of how they ended.
    pub fn always_run(mut self) -> Self {
        self.always_run = true;
        self
    }

    pub fn enabled(mut self, pred: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        self.enabled = Some(Box::new(pred));
        self
    }

    pub fn skip_if(mut self, pred: impl Fn() -> Option<String> + Send + Sync + 'static) -> Self {
        self.skip = Some(Box::new(pred));
        self
    }

    /// Sets the task body from an async closure returning `()`.
    pub fn run<F, Fut>(mut self, body: F) -> Self
    where
        F: Fn(Arc<OperationContext>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
    {
        self.body = Some(Box::new(move |ctx| {
            let fut = body(ctx);
            Box::pin(async move {
                fut.await?;
                Ok(TaskOutcome::Done)
            })
        }));
        self
    }

    /// Sets the task body from an async closure that hands off to a nested
    /// list, whose settlement this task waits on.
    pub fn run_nested<F, Fut>(mut self, body: F) -> Self
    where
        F: Fn(Arc<OperationContext>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Arc<TaskList>, TaskError>> + Send + 'static,
    {
        self.body = Some(Box::new(move |ctx| {
            let fut = body(ctx);
            Box::pin(async move { Ok(TaskOutcome::Nested(fut.await?)) })
        }));
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
