// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The runtime view of a resource instance, as exposed by its adapter.

use crate::compound_name::CompoundName;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Started/stopped projection of a resource, as observed from its adapter's
/// state stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceState {
    Started,
    Stopped,
}

crate::simple_display! {
    ResourceState {
        Started => "started",
        Stopped => "stopped",
    }
}

/// A live snapshot of a resource instance, as produced by a `ResourceAdapter`'s
/// state stream.
///
/// `fields` carries adapter-specific data (ports, process ids, connection
/// strings, …) that the core does not interpret.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub plugin: String,
    pub resource_type: String,
    pub name: CompoundName,
    pub state: ResourceState,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub fields: HashMap<String, serde_json::Value>,
}

impl Resource {
    pub fn new(
        plugin: impl Into<String>,
        resource_type: impl Into<String>,
        name: CompoundName,
        state: ResourceState,
    ) -> Self {
        Self { plugin: plugin.into(), resource_type: resource_type.into(), name, state, fields: HashMap::new() }
    }

    /// The human-visible leaf segment of this resource's compound name.
    pub fn base_name(&self) -> &str {
        self.name.leaf()
    }

    pub fn is_started(&self) -> bool {
        self.state == ResourceState::Started
    }
}

/// Test builder for [`Resource`]. Hand-rolled rather than generated by
/// [`crate::builder!`] since every field has a meaningful non-default value.
#[cfg(any(test, feature = "test-support"))]
pub struct ResourceBuilder {
    plugin: String,
    resource_type: String,
    name: CompoundName,
    state: ResourceState,
    fields: HashMap<String, serde_json::Value>,
}

#[cfg(any(test, feature = "test-support"))]
impl Default for ResourceBuilder {
    fn default() -> Self {
        Self {
            plugin: "test-plugin".to_string(),
            resource_type: "test-resource".to_string(),
            name: CompoundName::new("test"),
            state: ResourceState::Stopped,
            fields: HashMap::new(),
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
impl ResourceBuilder {
    pub fn plugin(mut self, plugin: impl Into<String>) -> Self {
        self.plugin = plugin.into();
        self
    }

    pub fn resource_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = resource_type.into();
        self
    }

    pub fn name(mut self, name: impl Into<CompoundName>) -> Self {
        self.name = name.into();
        self
    }

    pub fn state(mut self, state: ResourceState) -> Self {
        self.state = state;
        self
    }

    pub fn field(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    pub fn build(self) -> Resource {
        Resource {
            plugin: self.plugin,
            resource_type: self.resource_type,
            name: self.name,
            state: self.state,
            fields: self.fields,
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
impl Resource {
    pub fn builder() -> ResourceBuilder {
        ResourceBuilder::default()
    }
}

#[cfg(test)]
#[path = "resource_tests.rs"]
mod tests;
