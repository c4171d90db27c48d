// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! On-disk declaration of a `ResourceType`, one TOML file per
//! `(plugin, resourceType)` pair.

use crate::names::Names;
use crate::resource_type::{CreateOp, CrudOp, ResourceType};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResourceTypeLoadError {
    #[error("failed to read {path}: {source}")]
    Io { path: String, #[source] source: std::io::Error },
    #[error("failed to parse {path}: {source}")]
    Parse { path: String, #[source] source: toml::de::Error },
}

/// The serialized shape of a resource type declaration.
///
/// ```toml
/// plugin = "chain"
/// resource_type = "node"
/// start_on_create = true
/// supports_start_stop = true
/// supports_describe = true
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceTypeDef {
    pub plugin: String,
    pub resource_type: String,
    #[serde(default)]
    pub start_on_create: bool,
    #[serde(default)]
    pub supports_start_stop: bool,
    #[serde(default)]
    pub supports_describe: bool,
}

impl ResourceTypeDef {
    pub fn from_toml_str(contents: &str, path: &str) -> Result<Self, ResourceTypeLoadError> {
        toml::from_str(contents).map_err(|e| ResourceTypeLoadError::Parse { path: path.to_string(), source: e })
    }

    pub async fn load(path: &std::path::Path) -> Result<Self, ResourceTypeLoadError> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ResourceTypeLoadError::Io { path: path.display().to_string(), source: e })?;
        Self::from_toml_str(&contents, &path.display().to_string())
    }

    /// Builds the runtime [`ResourceType`]. `create` and `delete` are
    /// mandatory per the core spec; `filter` is left unset — callers attach
    /// one afterward if their resources need CLI-option-driven narrowing.
    pub fn into_resource_type(self) -> ResourceType {
        ResourceType {
            plugin: self.plugin,
            resource_type: self.resource_type,
            create: CreateOp { names: Names::derive("create"), start_on_create: self.start_on_create },
            delete: CrudOp { names: Names::derive("delete") },
            start: self.supports_start_stop.then(|| CrudOp { names: Names::derive("start") }),
            stop: self.supports_start_stop.then(|| CrudOp { names: Names::derive("stop") }),
            describe: self.supports_describe.then(|| CrudOp { names: Names::derive("describe") }),
            filter: None,
        }
    }
}

#[cfg(test)]
#[path = "def_tests.rs"]
mod tests;
