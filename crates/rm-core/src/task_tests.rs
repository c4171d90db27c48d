// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn new_task_has_no_predicates_or_body() {
    let task = Task::new("do the thing");
    assert_eq!(task.title(), "do the thing");
    assert!(task.enabled.is_none());
    assert!(task.skip.is_none());
    assert!(task.body.is_none());
    assert!(!task.always_run);
}

#[test]
fn builder_methods_set_the_expected_fields() {
    let task =
        Task::new("x").enabled(|| true).skip_if(|| None).always_run().run(|_ctx| async { Ok(()) });
    assert!(task.enabled.is_some());
    assert!(task.skip.is_some());
    assert!(task.body.is_some());
    assert!(task.always_run);
}
