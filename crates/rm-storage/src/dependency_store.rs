// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The dependency store (C3): per-resource `dependencies` and
//! `directDependents` lists, persisted as JSON next to the ready registry.

use crate::atomic::{read_json_or_default, remove_tolerant, write_atomic, StorageError};
use rm_core::{CompoundName, ResourceDependency};
use std::path::PathBuf;

pub struct DependencyStore {
    dependencies_dir: PathBuf,
    dependents_dir: PathBuf,
}

impl DependencyStore {
    pub fn new(dependencies_dir: PathBuf, dependents_dir: PathBuf) -> Self {
        Self { dependencies_dir, dependents_dir }
    }

    fn path(dir: &PathBuf, name: &CompoundName) -> PathBuf {
        dir.join(name.as_str()).with_extension("json")
    }

    /// Resources this one depends on, recorded when it was created.
    /// `[]` if nothing was ever persisted.
    pub async fn read_dependencies(&self, name: &CompoundName) -> Result<Vec<ResourceDependency>, StorageError> {
        read_json_or_default(&Self::path(&self.dependencies_dir, name)).await
    }

    pub async fn write_dependencies(
        &self,
        name: &CompoundName,
        deps: &[ResourceDependency],
    ) -> Result<(), StorageError> {
        write_deps(&Self::path(&self.dependencies_dir, name), deps).await
    }

    pub async fn delete_dependencies(&self, name: &CompoundName) -> Result<(), StorageError> {
        remove_tolerant(&Self::path(&self.dependencies_dir, name)).await
    }

    /// Resources this one created as children of its own creation.
    pub async fn read_dependents(&self, name: &CompoundName) -> Result<Vec<ResourceDependency>, StorageError> {
        read_json_or_default(&Self::path(&self.dependents_dir, name)).await
    }

    pub async fn write_dependents(&self, name: &CompoundName, deps: &[ResourceDependency]) -> Result<(), StorageError> {
        write_deps(&Self::path(&self.dependents_dir, name), deps).await
    }

    pub async fn delete_dependents(&self, name: &CompoundName) -> Result<(), StorageError> {
        remove_tolerant(&Self::path(&self.dependents_dir, name)).await
    }
}

async fn write_deps(path: &std::path::Path, deps: &[ResourceDependency]) -> Result<(), StorageError> {
    let json = serde_json::to_vec_pretty(deps)
        .map_err(|e| StorageError::Decode { path: path.display().to_string(), source: e })?;
    write_atomic(path, &json).await
}

#[cfg(test)]
#[path = "dependency_store_tests.rs"]
mod tests;
