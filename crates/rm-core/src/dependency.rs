// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cross-manager resource dependency edges.

use crate::compound_name::CompoundName;
use serde::{Deserialize, Serialize};

/// A reference to a resource owned by some `(plugin, resourceType)` manager.
///
/// Equality is structural over all three fields — two dependencies pointing
/// at the same triple are the same edge regardless of where they came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceDependency {
    pub plugin: String,
    pub resource_type: String,
    pub name: CompoundName,
}

impl ResourceDependency {
    pub fn new(
        plugin: impl Into<String>,
        resource_type: impl Into<String>,
        name: impl Into<CompoundName>,
    ) -> Self {
        Self { plugin: plugin.into(), resource_type: resource_type.into(), name: name.into() }
    }
}

/// Deduplicate a list of dependencies by `(plugin, resourceType, name)`,
/// preserving first-seen order.
///
/// `resourceDependents` is appended to without dedup (§4.5.7); this is
/// applied whenever the list is consumed, matching the source's
/// `_uniqueDeps`.
pub fn unique_deps(deps: impl IntoIterator<Item = ResourceDependency>) -> Vec<ResourceDependency> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for dep in deps {
        if seen.insert(dep.clone()) {
            out.push(dep);
        }
    }
    out
}

#[cfg(test)]
#[path = "dependency_tests.rs"]
mod tests;
