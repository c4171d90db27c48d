// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registered hooks run concurrently alongside every create pipeline
//! (§4.5.2 step 4).

use super::ResourcesManager;
use rm_core::{CompoundName, OperationContext, TaskError};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub type CreateHook = Arc<
    dyn Fn(CompoundName, Arc<OperationContext>) -> Pin<Box<dyn Future<Output = Result<(), TaskError>> + Send>>
        + Send
        + Sync,
>;

impl ResourcesManager {
    pub fn add_create_hook(&self, hook: CreateHook) {
        self.create_hooks.lock().push(hook);
    }

    pub(crate) fn create_hooks_snapshot(&self) -> Vec<CreateHook> {
        self.create_hooks.lock().clone()
    }
}

#[cfg(test)]
#[path = "hooks_tests.rs"]
mod tests;
