// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ResourcesManager` (C6): the per-`(plugin, resourceType)` owner of a
//! resource kind's lifecycle — create, delete, start, stop, describe — and
//! the reactive aggregate of its resources' current state (C9).
//!
//! Everything here is built on `rm-core`'s task-list runtime and
//! collaborator contracts; persistence goes through `rm-storage`; CRUD
//! metadata comes from `rm-types`.

mod manager;

pub use manager::{CreateHook, ResourcesManager};

#[cfg(test)]
mod test_helpers;
