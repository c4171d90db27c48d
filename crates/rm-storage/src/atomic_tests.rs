// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::tempdir;

#[tokio::test]
async fn write_then_read_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.json");
    write_atomic(&path, b"[1,2,3]").await.unwrap();

    let value: Vec<i32> = read_json_or_default(&path).await.unwrap();
    assert_eq!(value, vec![1, 2, 3]);

    // no leftover tmp file
    assert!(!path.with_extension("tmp").exists());
}

#[tokio::test]
async fn read_missing_file_returns_default() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.json");
    let value: Vec<i32> = read_json_or_default(&path).await.unwrap();
    assert!(value.is_empty());
}

#[tokio::test]
async fn remove_tolerant_ignores_missing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing");
    remove_tolerant(&path).await.unwrap();
}

#[tokio::test]
async fn write_creates_parent_directories() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("deep").join("f.json");
    write_atomic(&path, b"{}").await.unwrap();
    assert!(path.exists());
}

#[tokio::test]
async fn second_write_overwrites_first() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.json");
    write_atomic(&path, b"1").await.unwrap();
    write_atomic(&path, b"2").await.unwrap();
    let contents = tokio::fs::read_to_string(&path).await.unwrap();
    assert_eq!(contents, "2");
}
