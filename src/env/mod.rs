// envlayer: Layered environment variable access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment variable access.
//!
//! # Architecture
//!
//! ```text
//! Environment
//!   overrides  RwLock<BTreeMap>   set / hide / unset / *_scoped
//!   snapshot   Arc<Snapshot>      captured once, read-only
//! Sources: current_env(), Environment::empty(), Environment::from_map()
//! Ops: get / get_int / get_float / get_list / *_or / must_*
//! ```
//!
//! - **Override first**: overrides shadow the snapshot, hidden names read as missing
//! - **Never writes back**: the real process environment is left untouched
//! - **Case-insensitive on Windows** by default

pub mod container;
pub mod guard;
pub mod options;
pub mod snapshot;
pub mod types;

#[cfg(test)]
mod test_utils;

/// Layers an empty override table over the process environment.
#[must_use]
pub fn current_env() -> container::Environment {
    container::Environment::from_process()
}
