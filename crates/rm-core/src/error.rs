// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy shared by the task-list runtime and `ResourcesManager`.

use crate::compound_name::CompoundName;
use thiserror::Error;

/// Raised synchronously from `start`/`stop` when the resource type does not
/// declare that CRUD operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("resource type does not support start")]
pub struct ResourceNoStartError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("resource type does not support stop")]
pub struct ResourceNoStopError;

/// Per-resource failure collected during `ResourcesManager::init`. Never
/// thrown — I6: a single bad resource must not abort the whole init.
#[derive(Debug, Error, Clone)]
#[error("failed to initialize resource {name}: {message}")]
pub struct InitError {
    pub name: CompoundName,
    pub message: String,
}

impl InitError {
    pub fn new(name: CompoundName, message: impl Into<String>) -> Self {
        Self { name, message: message.into() }
    }
}

/// Delivered through a `TaskList` when `abort()` was called on it (or an
/// ancestor list) before it settled.
#[derive(Debug, Error, Clone, Default)]
#[error("aborted")]
pub struct AbortedError;

/// A single task's failure, carrying the stable `code` surfaced in the
/// progress wire envelope (§6) alongside a free-form message.
#[derive(Debug, Error, Clone)]
#[error("{code}: {message}")]
pub struct TaskError {
    pub code: String,
    pub message: String,
}

impl TaskError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self { code: code.into(), message: message.into() }
    }

    pub fn aborted() -> Self {
        Self::new("aborted", "operation was aborted")
    }

    pub fn is_aborted(&self) -> bool {
        self.code == "aborted"
    }
}

impl From<AbortedError> for TaskError {
    fn from(_: AbortedError) -> Self {
        TaskError::aborted()
    }
}

impl From<ResourceNoStartError> for TaskError {
    fn from(_: ResourceNoStartError) -> Self {
        TaskError::new("no_start", "resource type does not support start")
    }
}

impl From<ResourceNoStopError> for TaskError {
    fn from(_: ResourceNoStopError) -> Self {
        TaskError::new("no_stop", "resource type does not support stop")
    }
}

/// Errors surfaced by [`crate::PluginManager::get_resources_manager`] — must
/// be total, so the only failure mode is "unknown".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("no resources manager registered for plugin={plugin} resource_type={resource_type}")]
pub struct PluginLookupError {
    pub plugin: String,
    pub resource_type: String,
}

/// Precondition and lookup errors raised synchronously by `ResourcesManager`
/// methods, outside the task-list/progress-envelope path.
#[derive(Debug, Error, Clone)]
pub enum ResourcesManagerError {
    #[error("resource does not exist: {0}")]
    NotFound(CompoundName),
    #[error(transparent)]
    NoStart(#[from] ResourceNoStartError),
    #[error(transparent)]
    NoStop(#[from] ResourceNoStopError),
    #[error("duplicate ready marker decodes to the same name: {0}")]
    DuplicateReadyMarker(CompoundName),
    #[error(transparent)]
    Lookup(#[from] PluginLookupError),
    #[error("storage error: {0}")]
    Storage(String),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
