// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ResourceAdapter` (C4) and `MasterResourceAdapter` (C5): the per-instance
//! driver and per-type factory that every plugin implements to plug a
//! resource kind into a `ResourcesManager`.

use crate::compound_name::CompoundName;
use crate::resource::Resource;
use crate::task_list::TaskList;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;

/// Opaque options bag passed through from the caller of `create`/`delete`/
/// `start`/`stop` down to the adapter. The core never inspects it.
pub type OperationOptions = serde_json::Value;

/// An error from an adapter's own I/O, passed through unchanged per §7 item 4.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct AdapterError(pub Box<dyn std::error::Error + Send + Sync>);

impl AdapterError {
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Box::new(err))
    }

    pub fn msg(message: impl Into<String>) -> Self {
        #[derive(Debug, Error)]
        #[error("{0}")]
        struct Msg(String);
        Self(Box::new(Msg(message.into())))
    }
}

/// Human-oriented introspection rows, returned by `getDebug()`.
pub type DescribeTable = Vec<(String, String)>;

/// Identity and private data directory handed to a `MasterResourceAdapter`
/// when constructing or rehydrating an adapter instance.
#[derive(Debug, Clone)]
pub struct AdapterIdentity {
    pub name: CompoundName,
    /// `<dataPath>/resources/<name>/` — owned by the adapter, opaque to the
    /// manager.
    pub data_path: PathBuf,
}

/// Per-instance driver for one resource. Exclusive: each adapter is owned by
/// exactly one `ResourcesManager`.
#[async_trait]
pub trait ResourceAdapter: Send + Sync {
    /// Starts the resource. Failure surfaces through the returned `TaskList`.
    fn start(&self, options: OperationOptions) -> Arc<TaskList>;

    fn stop(&self, options: OperationOptions) -> Arc<TaskList>;

    /// Performs destructive cleanup of underlying storage.
    fn delete(&self, options: OperationOptions) -> Arc<TaskList>;

    /// Tears down in-memory state only (subscriptions, mirrored child
    /// processes, …). Idempotent.
    async fn destroy(&self);

    /// Live stream of resource snapshots. Emits at least once upon
    /// subscription; the sender side is dropped on `destroy`.
    fn resource_stream(&self) -> watch::Receiver<Option<Resource>>;

    fn get_debug(&self) -> DescribeTable;
}

/// Per-type factory that creates and rehydrates `ResourceAdapter`s.
#[async_trait]
pub trait MasterResourceAdapter: Send + Sync {
    /// Builds a new adapter for a user-triggered create. The returned
    /// `TaskList`'s final context carries `resource_adapter`, and optionally
    /// `dependencies`/`dependents` (§4.5.2).
    fn create_resource_adapter(
        &self,
        identity: AdapterIdentity,
        options: OperationOptions,
    ) -> Arc<TaskList>;

    /// Rehydrates an adapter for a resource that already completed creation,
    /// during manager init.
    async fn init_resource_adapter(
        &self,
        identity: AdapterIdentity,
    ) -> Result<Arc<dyn ResourceAdapter>, AdapterError>;
}
