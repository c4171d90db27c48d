// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `ResourceType` CRUD descriptor a `ResourcesManager` is constructed
//! with, and its on-disk TOML definition.

mod def;
mod names;
mod resource_type;

pub use def::{ResourceTypeDef, ResourceTypeLoadError};
pub use names::Names;
pub use resource_type::{CreateOp, CrudOp, ResourceFilter, ResourceType};
