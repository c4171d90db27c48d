// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Core types and runtime shared by every `rm-*` crate: the task-list
//! engine (C1), the resource/dependency data model, the error taxonomy, and
//! the cross-manager collaborator contracts (C7/C8).
//!
//! Downstream crates (`rm-storage`, `rm-adapters`, `rm-engine`, `rm-wire`,
//! `rm-daemon`) depend only on this crate for these shared pieces, never on
//! each other, to keep the dependency graph a tree.

#[macro_use]
mod macros;

mod adapter;
mod clock;
mod compound_name;
mod context;
mod dependency;
mod error;
pub mod id;
mod resource;
mod task;
mod task_list;

pub mod contracts;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use adapter::{
    AdapterError, AdapterIdentity, DescribeTable, MasterResourceAdapter, OperationOptions, ResourceAdapter,
};
pub use clock::{Clock, FakeClock, SystemClock};
pub use compound_name::CompoundName;
pub use context::OperationContext;
pub use dependency::{unique_deps, ResourceDependency};
pub use error::{
    AbortedError, InitError, PluginLookupError, ResourceNoStartError, ResourceNoStopError, ResourcesManagerError,
    TaskError,
};
pub use id::{short, IdBuf, ID_MAX_LEN};
pub use resource::{Resource, ResourceState};
pub use task::{EnabledPredicate, SkipPredicate, Task, TaskBody, TaskFuture, TaskOutcome};
pub use task_list::{OnComplete, OnDone, OnError, TaskEvent, TaskList, TaskListOptions};
