// envlayer: Layered environment variable access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Immutable capture of an environment block.
//!
//! ```text
//! "KEY=VALUE" entries --split at first '='--> BTreeMap<String, String>
//! "=C:=C:\\"  -> skipped (empty key)
//! "NOEQUALS"  -> skipped
//! "A=b=c"     -> A => "b=c"
//!
//! Snapshot::process(): OnceLock<Arc<Snapshot>>, captured on first use
//! ```

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

/// A read-only set of environment variables.
///
/// Names are stored as given; case folding is applied by the
/// [`Environment`](super::container::Environment) that reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    vars: BTreeMap<String, String>,
}

/// Splits a `KEY=VALUE` entry at the first `=`.
///
/// Returns `None` when there is no `=` or the key would be empty.
#[must_use]
pub fn parse_entry(entry: &str) -> Option<(&str, &str)> {
    match entry.split_once('=') {
        Some((key, value)) if !key.is_empty() => Some((key, value)),
        _ => None,
    }
}

impl Snapshot {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a snapshot from a map of variables.
    #[must_use]
    pub const fn from_map(vars: BTreeMap<String, String>) -> Self {
        Self { vars }
    }

    /// Builds a snapshot from raw `KEY=VALUE` entries.
    ///
    /// Malformed entries are skipped. A later entry with the same key
    /// replaces an earlier one.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vars = BTreeMap::new();
        for entry in entries {
            let entry = entry.as_ref();
            if let Some((key, value)) = parse_entry(entry) {
                vars.insert(key.to_owned(), value.to_owned());
            } else {
                tracing::debug!(entry, "skipping malformed environment entry");
            }
        }
        Self { vars }
    }

    /// Captures the current process environment.
    ///
    /// Entries whose name or value is not valid UTF-8 are skipped, as are
    /// entries with an empty name.
    #[must_use]
    pub fn capture() -> Self {
        let mut vars = BTreeMap::new();
        for (key, value) in std::env::vars_os() {
            match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) if !key.is_empty() => {
                    vars.insert(key, value);
                }
                (key, _) => {
                    tracing::debug!(key = ?key, "skipping non-UTF-8 or unnamed environment entry");
                }
            }
        }
        Self { vars }
    }

    /// Returns the process snapshot, capturing it on first use.
    ///
    /// Every call returns the same snapshot; later changes to the real
    /// environment are not observed.
    #[must_use]
    pub fn process() -> Arc<Self> {
        static PROCESS: OnceLock<Arc<Snapshot>> = OnceLock::new();
        PROCESS
            .get_or_init(|| {
                let snapshot = Self::capture();
                tracing::debug!(vars = snapshot.len(), "captured process environment");
                Arc::new(snapshot)
            })
            .clone()
    }

    /// Gets a variable by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Returns an iterator over variables in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }
}

impl<K, V> FromIterator<(K, V)> for Snapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
