// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ResourcesManager::init` (§4.5.1): rehydrate every ready resource's
//! adapter, then publish the dependency edges it recorded at creation time.
//!
//! Split into two phases so a process hosting several managers can
//! rehydrate every manager's adapter set first and only then publish
//! inverse edges, avoiding the cross-manager registration race named in
//! the design notes: if manager B's `_addDependents` ran before manager A
//! had installed the adapter it's registering against, A's
//! `resourceDependents` write would target a name A hasn't rehydrated yet.
//! `init()` itself just runs both phases back to back, which is correct
//! for a single manager used in isolation (e.g. in tests).

use super::ResourcesManager;
use rm_core::{CompoundName, InitError, ResourcesManagerError};
use rm_storage::StorageError;
use std::sync::Arc;

impl ResourcesManager {
    pub async fn init(self: &Arc<Self>) -> Result<Vec<InitError>, ResourcesManagerError> {
        let errors = self.init_adapters().await?;
        self.publish_pending_dependents()?;
        Ok(errors)
    }

    /// Phase 1: ensures the on-disk layout exists, scans the ready
    /// registry (a duplicate decode is fatal for the whole init, I6's
    /// asymmetric sibling), then rehydrates every name's adapter in
    /// parallel. A per-resource failure becomes an `InitError` and that
    /// name is simply absent from `adapters` afterward (I1, I6).
    pub async fn init_adapters(self: &Arc<Self>) -> Result<Vec<InitError>, ResourcesManagerError> {
        for dir in ["resources", "ready", "dependents", "dependencies"] {
            tokio::fs::create_dir_all(self.data_path.join(dir))
                .await
                .map_err(|e| ResourcesManagerError::Storage(format!("failed to create {dir}: {e}")))?;
        }

        let names = self.ready.get_all().await.map_err(|err| match err {
            StorageError::DuplicateMarker(msg) => ResourcesManagerError::DuplicateReadyMarker(CompoundName::from(msg)),
            other => ResourcesManagerError::Storage(other.to_string()),
        })?;

        let mut handles = Vec::with_capacity(names.len());
        for name in names {
            let this = Arc::clone(self);
            let name_for_task = name.clone();
            handles.push((name, tokio::spawn(async move { this.init_one(name_for_task).await })));
        }

        let mut errors = Vec::new();
        for (name, handle) in handles {
            match handle.await {
                Ok(Ok(())) => {}
                Ok(Err(err)) => errors.push(err),
                Err(join_err) => errors.push(InitError::new(name, join_err.to_string())),
            }
        }

        Ok(errors)
    }

    async fn init_one(self: Arc<Self>, name: CompoundName) -> Result<(), InitError> {
        let identity = self.identity(&name);
        let adapter = self
            .master_adapter
            .init_resource_adapter(identity)
            .await
            .map_err(|e| InitError::new(name.clone(), e.to_string()))?;

        let dependents = self
            .deps_store
            .read_dependents(&name)
            .await
            .map_err(|e| InitError::new(name.clone(), e.to_string()))?;
        let dependencies = self
            .deps_store
            .read_dependencies(&name)
            .await
            .map_err(|e| InitError::new(name.clone(), e.to_string()))?;

        self.spawn_stream_forwarder(Arc::clone(&adapter));
        self.adapters.lock().insert(name.clone(), adapter);
        self.direct_dependents.lock().insert(name.clone(), dependents);
        // I3: started state always resets at init, regardless of what an
        // adapter's own resource stream later reports.
        self.started.lock().insert(name.clone(), false);
        self.pending_dependencies.lock().insert(name, dependencies);
        Ok(())
    }

    /// Phase 2: publishes every rehydrated resource's recorded
    /// dependencies as inverse edges on their owning managers (`_addDependents`,
    /// §4.5.7), then emits `update$` so `resources$` reflects the rehydrated
    /// set.
    pub fn publish_pending_dependents(&self) -> Result<(), ResourcesManagerError> {
        let pending = std::mem::take(&mut *self.pending_dependencies.lock());
        for (name, dependencies) in pending {
            self.add_dependents(&name, &dependencies)?;
        }
        self.emit_update();
        Ok(())
    }
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
