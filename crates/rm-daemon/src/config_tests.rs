// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::sync::Mutex;

// `RM_STATE_DIR` is process-wide; serialize tests that touch it.
static ENV_LOCK: Mutex<()> = Mutex::new(());

#[test]
fn load_honors_rm_state_dir_override() {
    let _guard = ENV_LOCK.lock().unwrap();
    std::env::set_var("RM_STATE_DIR", "/tmp/rm-daemon-test-state");
    let config = Config::load().unwrap();
    std::env::remove_var("RM_STATE_DIR");

    assert_eq!(config.state_dir, PathBuf::from("/tmp/rm-daemon-test-state"));
    assert_eq!(config.resource_types_dir, PathBuf::from("/tmp/rm-daemon-test-state/resource_types"));
}

#[test]
fn manager_data_path_is_scoped_by_plugin_and_type() {
    let _guard = ENV_LOCK.lock().unwrap();
    std::env::set_var("RM_STATE_DIR", "/tmp/rm-daemon-test-state");
    let config = Config::load().unwrap();
    std::env::remove_var("RM_STATE_DIR");

    assert_eq!(
        config.manager_data_path("chain", "node"),
        PathBuf::from("/tmp/rm-daemon-test-state/resources/chain/node")
    );
}
