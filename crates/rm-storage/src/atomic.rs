// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Write-then-rename helpers shared by the ready registry and dependency
//! store.

use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error at {path}: {source}")]
    Io { path: String, #[source] source: std::io::Error },
    #[error("failed to decode {path}: {source}")]
    Decode { path: String, #[source] source: serde_json::Error },
    #[error("duplicate ready marker: {0}")]
    DuplicateMarker(String),
}

impl StorageError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io { path: path.display().to_string(), source }
    }
}

/// Writes `contents` to `path` atomically: write to a sibling `.tmp` file,
/// then rename over the destination.
pub async fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(|e| StorageError::io(parent, e))?;
    }
    let tmp_path = path.with_extension("tmp");
    tokio::fs::write(&tmp_path, contents).await.map_err(|e| StorageError::io(&tmp_path, e))?;
    tokio::fs::rename(&tmp_path, path).await.map_err(|e| StorageError::io(path, e))?;
    Ok(())
}

/// Removes `path`, tolerating it already being absent.
pub async fn remove_tolerant(path: &Path) -> Result<(), StorageError> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(StorageError::io(path, e)),
    }
}

/// Reads and JSON-decodes `path`, returning `default` when the file does
/// not exist.
pub async fn read_json_or_default<T: serde::de::DeserializeOwned + Default>(
    path: &Path,
) -> Result<T, StorageError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => {
            serde_json::from_slice(&bytes).map_err(|e| StorageError::Decode { path: path.display().to_string(), source: e })
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(T::default()),
        Err(e) => Err(StorageError::io(path, e)),
    }
}

#[cfg(test)]
#[path = "atomic_tests.rs"]
mod tests;
