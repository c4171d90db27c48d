// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Compound resource names: `scope/leaf`.
//!
//! A resource created as the child of another (e.g. a wallet created by a
//! node) is named `<parent-leaf>/<child-leaf>`. The scope is optional — a
//! top-level resource's name has no `/` and its scope is empty.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt;

/// A resource name of the form `scope/leaf`, or just `leaf` for a top-level
/// resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompoundName(SmolStr);

impl CompoundName {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The human-visible segment: everything after the last `/`, or the
    /// whole name if there is no scope.
    pub fn leaf(&self) -> &str {
        match self.0.rfind('/') {
            Some(idx) => &self.0[idx + 1..],
            None => &self.0,
        }
    }

    /// The parent scope, or `None` for a top-level resource.
    pub fn scope(&self) -> Option<&str> {
        self.0.rfind('/').map(|idx| &self.0[..idx])
    }

    /// Build the compound name of a resource created as a child of `self`.
    pub fn child(&self, leaf: impl fmt::Display) -> Self {
        Self(SmolStr::new(format!("{}/{leaf}", self.0)))
    }
}

impl fmt::Display for CompoundName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CompoundName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CompoundName {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl std::borrow::Borrow<str> for CompoundName {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
#[path = "compound_name_tests.rs"]
mod tests;
