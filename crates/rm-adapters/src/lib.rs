// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reference `ResourceAdapter`/`MasterResourceAdapter` implementations.
//!
//! Real adapters (a blockchain node, a wallet, …) are plugin-provided and
//! out of scope here (see the core spec's §1). What ships in this crate is
//! a configurable fake used to exercise `rm-engine`'s `ResourcesManager`
//! end to end, gated behind the `test-support` feature.

#[cfg(feature = "test-support")]
mod fake;

#[cfg(feature = "test-support")]
pub use fake::{FakeAdapter, FakeMasterAdapter};
