// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! C9: a live aggregate of every adapter's latest resource snapshot.
//!
//! The source models `resources$` as `switchMap`-of-`combineLatest`: on
//! every `update$` tick, cancel the prior combined stream and rebuild it
//! from the current adapter set, and `combineLatest` itself re-emits on
//! every constituent stream's own tick, not just on membership changes.
//! `emit_update` handles the membership-change half (called after every
//! state-affecting manager operation); `spawn_stream_forwarder` handles the
//! other half by keeping one task alive per adapter that forwards its own
//! spontaneous `resource_stream` emissions into another `emit_update` call.

use super::ResourcesManager;
use rm_core::{CompoundName, OperationOptions, Resource, ResourceAdapter, TaskError};
use std::sync::Arc;
use tokio::sync::watch;

impl ResourcesManager {
    /// Subscribes to the live resource aggregate. The current value is
    /// available immediately via `watch::Receiver::borrow`.
    pub fn watch_resources(&self) -> watch::Receiver<Vec<Resource>> {
        self.resources_tx.subscribe()
    }

    /// A snapshot of the current aggregate.
    pub fn resources(&self) -> Vec<Resource> {
        self.resources_tx.borrow().clone()
    }

    pub fn get_resources(&self, options: &OperationOptions) -> Vec<Resource> {
        self.resource_type.filter_resources(options, &self.resources())
    }

    pub fn get_resource(&self, name: &CompoundName, options: &OperationOptions) -> Option<Resource> {
        self.get_resources(options).into_iter().find(|r| &r.name == name)
    }

    /// Recomputes the aggregate from the current adapter set's latest
    /// snapshots and publishes it. Called after every state-affecting
    /// operation (§5: "`update$` emits after any state-affecting operation
    /// completes").
    pub(crate) fn emit_update(&self) {
        let adapters = self.adapters.lock().values().cloned().collect::<Vec<_>>();
        let snapshot = adapters.iter().filter_map(|a| a.resource_stream().borrow().clone()).collect();
        let _ = self.resources_tx.send(snapshot);
    }

    /// Keeps `resources$` live against an adapter's own spontaneous state
    /// changes, not just manager-driven ones. Spawned once per adapter, at
    /// the same two points an adapter is installed into `self.adapters`
    /// (`create`'s finalize step and `init`'s rehydration). Exits once the
    /// adapter's sender side is dropped (`destroy`).
    pub(crate) fn spawn_stream_forwarder(self: &Arc<Self>, adapter: Arc<dyn ResourceAdapter>) {
        let this = Arc::clone(self);
        tokio::spawn(async move {
            let mut rx = adapter.resource_stream();
            while rx.changed().await.is_ok() {
                this.emit_update();
            }
        });
    }

    /// Awaits an adapter's stream producing its first snapshot (§4.5.2 step
    /// 2). The adapter contract guarantees at least one emission upon
    /// subscription, so this resolves immediately unless the adapter is
    /// unusually slow to warm up.
    pub(crate) async fn await_first_snapshot(adapter: &Arc<dyn ResourceAdapter>) -> Result<Resource, TaskError> {
        let mut rx = adapter.resource_stream();
        loop {
            if let Some(resource) = rx.borrow().clone() {
                return Ok(resource);
            }
            rx.changed()
                .await
                .map_err(|_| TaskError::new("adapter_stream_closed", "resource stream closed before first snapshot"))?;
        }
    }
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;
