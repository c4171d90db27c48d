// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_helpers::build_manager;
use rm_core::contracts::ResourceManagerHandle;
use rm_core::CompoundName;
use tempfile::tempdir;

#[test]
fn supports_start_stop_reflects_the_resource_type() {
    let dir = tempdir().unwrap();
    let (with, _a1, _r1) = build_manager(dir.path(), "p", "node", true, false);
    let (without, _a2, _r2) = build_manager(dir.path(), "p", "wallet", false, false);

    let with_handle: Arc<dyn ResourceManagerHandle> = Arc::new(Arc::clone(&with));
    let without_handle: Arc<dyn ResourceManagerHandle> = Arc::new(Arc::clone(&without));

    assert!(with_handle.supports_start_stop());
    assert!(!without_handle.supports_start_stop());
}

#[tokio::test]
async fn handle_create_and_stop_delegate_to_the_manager() {
    let dir = tempdir().unwrap();
    let (manager, _adapter, _registry) = build_manager(dir.path(), "p", "node", true, false);
    let handle: Arc<dyn ResourceManagerHandle> = Arc::new(Arc::clone(&manager));

    manager.create(&CompoundName::new("alice"), OperationOptions::default()).join().await.unwrap();
    assert!(manager.exists(&CompoundName::new("alice")));

    handle.stop(&CompoundName::new("alice"), OperationOptions::default()).join().await.ok();
    assert!(!manager.is_started(&CompoundName::new("alice")));
}

#[test]
fn add_dependent_appends_to_resource_dependents() {
    let dir = tempdir().unwrap();
    let (manager, _adapter, _registry) = build_manager(dir.path(), "p", "wallet", false, false);

    manager.add_dependent(
        &CompoundName::new("w1"),
        rm_core::ResourceDependency::new("p", "node", CompoundName::new("parent")),
    );

    assert_eq!(manager.resource_dependents.lock().get(&CompoundName::new("w1")).map(Vec::len), Some(1));
}
