// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The mutable bag threaded through one [`crate::TaskList`] and its
//! non-`freshContext` children.
//!
//! The source used an untyped map; per the design notes we use a typed
//! struct over the three fields that are actually read and written:
//! `resource_adapter`, `dependencies`, `dependents`.

use crate::adapter::ResourceAdapter;
use crate::dependency::ResourceDependency;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub struct OperationContext {
    pub resource_adapter: Mutex<Option<Arc<dyn ResourceAdapter>>>,
    pub dependencies: Mutex<Vec<ResourceDependency>>,
    pub dependents: Mutex<Vec<ResourceDependency>>,
    cancellation: CancellationToken,
}

impl OperationContext {
    /// A root context with its own cancellation token.
    pub fn fresh() -> Arc<Self> {
        Arc::new(Self {
            resource_adapter: Mutex::new(None),
            dependencies: Mutex::new(Vec::new()),
            dependents: Mutex::new(Vec::new()),
            cancellation: CancellationToken::new(),
        })
    }

    /// A context with its own data but whose cancellation still derives
    /// from the parent — used when `freshContext` is set on a nested list.
    pub fn fresh_child_of(parent: &Arc<Self>) -> Arc<Self> {
        Arc::new(Self {
            resource_adapter: Mutex::new(None),
            dependencies: Mutex::new(Vec::new()),
            dependents: Mutex::new(Vec::new()),
            cancellation: parent.cancellation.child_token(),
        })
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub fn is_aborted(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    pub fn set_resource_adapter(&self, adapter: Arc<dyn ResourceAdapter>) {
        *self.resource_adapter.lock() = Some(adapter);
    }

    pub fn resource_adapter(&self) -> Option<Arc<dyn ResourceAdapter>> {
        self.resource_adapter.lock().clone()
    }

    pub fn set_dependencies(&self, deps: Vec<ResourceDependency>) {
        *self.dependencies.lock() = deps;
    }

    pub fn dependencies(&self) -> Vec<ResourceDependency> {
        self.dependencies.lock().clone()
    }

    pub fn set_dependents(&self, deps: Vec<ResourceDependency>) {
        *self.dependents.lock() = deps;
    }

    pub fn dependents(&self) -> Vec<ResourceDependency> {
        self.dependents.lock().clone()
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
