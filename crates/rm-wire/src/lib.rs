// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The progress wire envelope (§6): the transport-agnostic serialized form
//! of a `TaskList`'s events, consumed by a CLI or other front-end.
//!
//! Wire format here is JSON only; framing (length-prefixing, sockets) is
//! out of scope and left to whatever process hosts a `ResourcesManager`.

use rm_core::TaskEvent;
use serde::{Deserialize, Serialize};

/// The serialized form of a [`TaskEvent`]. Round-trips through JSON as
/// `{"type": "progress", "persist": bool, "message": string}` and friends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProgressEvent {
    Progress {
        #[serde(skip_serializing_if = "std::ops::Not::not", default)]
        persist: bool,
        message: String,
    },
    Done,
    Error { code: String, message: String },
    Aborted,
}

impl From<&TaskEvent> for ProgressEvent {
    fn from(event: &TaskEvent) -> Self {
        match event {
            TaskEvent::Progress { persist, message } => {
                ProgressEvent::Progress { persist: *persist, message: message.clone() }
            }
            TaskEvent::Done => ProgressEvent::Done,
            TaskEvent::Error { code, message } => {
                ProgressEvent::Error { code: code.clone(), message: message.clone() }
            }
            TaskEvent::Aborted => ProgressEvent::Aborted,
        }
    }
}

impl From<TaskEvent> for ProgressEvent {
    fn from(event: TaskEvent) -> Self {
        ProgressEvent::from(&event)
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
