// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::names::Names;
use rm_core::{OperationOptions, Resource};
use std::sync::Arc;

/// Display metadata for one supported CRUD operation.
#[derive(Debug, Clone)]
pub struct CrudOp {
    pub names: Names,
}

/// `create` additionally carries whether a freshly created resource should
/// be started immediately (§4.5.2 step 3).
#[derive(Debug, Clone)]
pub struct CreateOp {
    pub names: Names,
    pub start_on_create: bool,
}

/// Narrows a resource list per the caller's options, applied by
/// `getResources$`/`getResource$` (§4.5.6).
pub type ResourceFilter = Arc<dyn Fn(&OperationOptions, &[Resource]) -> Vec<Resource> + Send + Sync>;

/// The CRUD descriptor a `ResourcesManager` is constructed with. `start`
/// and `stop` are both present or both absent — a resource type that
/// supports one must support the other (§4.5.4/§4.5.5).
#[derive(Clone)]
pub struct ResourceType {
    pub plugin: String,
    pub resource_type: String,
    pub create: CreateOp,
    pub delete: CrudOp,
    pub start: Option<CrudOp>,
    pub stop: Option<CrudOp>,
    pub describe: Option<CrudOp>,
    pub filter: Option<ResourceFilter>,
}

impl ResourceType {
    pub fn supports_start_stop(&self) -> bool {
        self.start.is_some() && self.stop.is_some()
    }

    /// Applies the configured filter, or returns `resources` unchanged when
    /// none was configured.
    pub fn filter_resources(&self, options: &OperationOptions, resources: &[Resource]) -> Vec<Resource> {
        match &self.filter {
            Some(filter) => filter(options, resources),
            None => resources.to_vec(),
        }
    }
}

#[cfg(test)]
#[path = "resource_type_tests.rs"]
mod tests;
