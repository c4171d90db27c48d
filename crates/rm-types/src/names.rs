// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Display metadata for one CRUD verb, surfaced to a CLI layer (out of
//! scope here) alongside task-list progress messages.

use serde::{Deserialize, Serialize};

/// `{upper, lower, ed, ing, capital}` forms of a verb, e.g. for "start":
/// `{"START", "start", "started", "starting", "Start"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Names {
    pub upper: String,
    pub lower: String,
    pub ed: String,
    pub ing: String,
    pub capital: String,
}

impl Names {
    /// Derives all five forms from the base verb using regular English
    /// inflection (`create` → `created`/`creating`). Irregular verbs should
    /// be spelled out explicitly in the `ResourceTypeDef` TOML instead.
    pub fn derive(verb: &str) -> Self {
        let lower = verb.to_ascii_lowercase();
        let upper = lower.to_ascii_uppercase();
        let capital = capitalize(&lower);
        let ed = inflect_ed(&lower);
        let ing = inflect_ing(&lower);
        Self { upper, lower, ed, ing, capital }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn inflect_ed(verb: &str) -> String {
    if let Some(stem) = verb.strip_suffix('e') {
        format!("{stem}ed")
    } else {
        format!("{verb}ed")
    }
}

fn inflect_ing(verb: &str) -> String {
    if let Some(stem) = verb.strip_suffix('e') {
        format!("{stem}ing")
    } else {
        format!("{verb}ing")
    }
}

#[cfg(test)]
#[path = "names_tests.rs"]
mod tests;
