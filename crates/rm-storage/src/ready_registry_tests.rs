// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::tempdir;

#[tokio::test]
async fn write_then_get_all_returns_the_name() {
    let dir = tempdir().unwrap();
    let registry = ReadyRegistry::new(dir.path().join("ready"));
    registry.write(&CompoundName::from("alice")).await.unwrap();

    let all = registry.get_all().await.unwrap();
    assert_eq!(all, vec![CompoundName::from("alice")]);
}

#[tokio::test]
async fn scoped_name_round_trips_through_nested_storage() {
    let dir = tempdir().unwrap();
    let registry = ReadyRegistry::new(dir.path().join("ready"));
    registry.write(&CompoundName::from("testnet/alice")).await.unwrap();

    let all = registry.get_all().await.unwrap();
    assert_eq!(all, vec![CompoundName::from("testnet/alice")]);
}

#[tokio::test]
async fn delete_tolerates_missing_marker() {
    let dir = tempdir().unwrap();
    let registry = ReadyRegistry::new(dir.path().join("ready"));
    registry.delete(&CompoundName::from("nobody")).await.unwrap();
}

#[tokio::test]
async fn delete_removes_the_marker() {
    let dir = tempdir().unwrap();
    let registry = ReadyRegistry::new(dir.path().join("ready"));
    let name = CompoundName::from("alice");
    registry.write(&name).await.unwrap();
    registry.delete(&name).await.unwrap();
    assert!(registry.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_registry_scans_to_empty_directory() {
    let dir = tempdir().unwrap();
    let registry = ReadyRegistry::new(dir.path().join("ready"));
    assert!(registry.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn flat_and_nested_encodings_of_the_same_name_are_fatal() {
    let dir = tempdir().unwrap();
    let ready_dir = dir.path().join("ready");
    let registry = ReadyRegistry::new(ready_dir.clone());

    registry.write(&CompoundName::from("testnet/alice")).await.unwrap();
    write_atomic(&ready_dir.join("testnet__alice"), b"").await.unwrap();

    let err = registry.get_all().await.unwrap_err();
    assert!(matches!(err, StorageError::DuplicateMarker(_)));
}
