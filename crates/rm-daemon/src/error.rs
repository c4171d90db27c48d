// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use rm_types::ResourceTypeLoadError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("could not resolve a state directory for this platform (set RM_STATE_DIR to override)")]
    NoStateDir,

    #[error("failed to read resource_types directory {path}: {source}")]
    ReadResourceTypes { path: String, #[source] source: std::io::Error },

    #[error(transparent)]
    ResourceTypeLoad(#[from] ResourceTypeLoadError),

    #[error(transparent)]
    Manager(#[from] rm_core::ResourcesManagerError),
}
