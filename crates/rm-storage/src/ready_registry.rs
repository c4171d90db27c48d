// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The ready registry (C2): on-disk evidence that a resource's creation
//! pipeline completed at least once.
//!
//! A name is stored as a nested path mirroring its `scope/leaf` structure
//! (`ready/testnet/alice`), which is a bijective encoding — no escaping
//! needed. `get_all` also recognizes a flat, single-file encoding at the
//! registry's top level (`ready/testnet__alice`) for resource names that
//! happen to contain a literal `__`. When both forms exist for the same
//! logical name, that is an unrecoverable ambiguity and the whole scan
//! fails loudly rather than guessing.

use crate::atomic::{remove_tolerant, write_atomic, StorageError};
use rm_core::CompoundName;
use std::collections::HashMap;
use std::path::PathBuf;

pub struct ReadyRegistry {
    dir: PathBuf,
}

impl ReadyRegistry {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path(&self, name: &CompoundName) -> PathBuf {
        self.dir.join(name.as_str())
    }

    pub async fn write(&self, name: &CompoundName) -> Result<(), StorageError> {
        write_atomic(&self.path(name), b"").await
    }

    pub async fn delete(&self, name: &CompoundName) -> Result<(), StorageError> {
        remove_tolerant(&self.path(name)).await
    }

    /// Scans the registry. Order is unspecified (directory-scan order).
    pub async fn get_all(&self) -> Result<Vec<CompoundName>, StorageError> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| StorageError::Io {
            path: self.dir.display().to_string(),
            source: e,
        })?;

        let mut nested: HashMap<String, PathBuf> = HashMap::new();
        let mut flat: Vec<(String, PathBuf)> = Vec::new();

        let mut stack = vec![(self.dir.clone(), Vec::<String>::new())];
        while let Some((dir, rel)) = stack.pop() {
            let mut entries =
                tokio::fs::read_dir(&dir).await.map_err(|e| StorageError::Io { path: dir.display().to_string(), source: e })?;
            while let Some(entry) = entries
                .next_entry()
                .await
                .map_err(|e| StorageError::Io { path: dir.display().to_string(), source: e })?
            {
                let file_type = entry
                    .file_type()
                    .await
                    .map_err(|e| StorageError::Io { path: entry.path().display().to_string(), source: e })?;
                let segment = entry.file_name().to_string_lossy().into_owned();
                if file_type.is_dir() {
                    let mut child_rel = rel.clone();
                    child_rel.push(segment);
                    stack.push((entry.path(), child_rel));
                } else if file_type.is_file() {
                    if rel.is_empty() {
                        flat.push((segment, entry.path()));
                    } else {
                        let mut segments = rel.clone();
                        segments.push(segment);
                        nested.insert(segments.join("/"), entry.path());
                    }
                }
            }
        }

        let mut names: HashMap<String, PathBuf> = nested;
        for (raw, path) in flat {
            if raw.contains("__") {
                let legacy = raw.replacen("__", "/", 1);
                if let Some(existing) = names.get(&legacy) {
                    return Err(StorageError::DuplicateMarker(format!(
                        "{legacy} (from {} and {})",
                        existing.display(),
                        path.display()
                    )));
                }
            }
            if let Some(existing) = names.insert(raw.clone(), path.clone()) {
                return Err(StorageError::DuplicateMarker(format!(
                    "{raw} (from {} and {})",
                    existing.display(),
                    path.display()
                )));
            }
        }

        Ok(names.into_keys().map(CompoundName::from).collect())
    }
}

#[cfg(test)]
#[path = "ready_registry_tests.rs"]
mod tests;
