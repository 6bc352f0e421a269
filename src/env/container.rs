// envlayer: Layered environment variable access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The layered environment and its typed accessors.
//!
//! # Architecture
//!
//! ```text
//! get(name)
//!    |
//!    v
//! overrides: RwLock<BTreeMap<folded name, OverrideEntry>>
//!    |  Value(v) -> Some(v)      Hidden -> None
//!    | (no entry)
//!    v
//! snapshot: Arc<Snapshot>  (+ folded index when case-insensitive)
//!    |  hit -> Some(v)   miss -> None
//!
//! get_int / get_float / get_list   -> parse::*
//! *_or(default)                    -> Defaulted<T>
//! must_*                           -> EnvResult<T>
//! ```

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Serialize, Serializer};

use super::guard::OverrideGuard;
use super::options::EnvOptions;
use super::snapshot::Snapshot;
use super::types::{Defaulted, KeyCase, Layer, Override, OverrideEntry, ValueKind};
use crate::error::{EnvError, EnvResult, ParseError};
use crate::parse;

type OverrideTable = BTreeMap<String, OverrideEntry>;

/// Environment variables layered as overrides over a snapshot.
///
/// Reads consult the override table first, then the snapshot. Writes only
/// touch the override table; the real process environment is never modified.
///
/// # Thread Safety
/// `Environment` is `Send` and `Sync`. The override table is behind a
/// `RwLock`, the snapshot is shared through an `Arc`.
#[derive(Debug)]
pub struct Environment {
    snapshot: Arc<Snapshot>,
    /// Folded name to snapshot name, present only for case-insensitive matching.
    folded: Option<Arc<BTreeMap<String, String>>>,
    overrides: RwLock<OverrideTable>,
    options: EnvOptions,
}

impl Default for Environment {
    fn default() -> Self {
        Self::from_process()
    }
}

impl Clone for Environment {
    /// Forks the environment: the snapshot is shared, the override table is copied.
    fn clone(&self) -> Self {
        Self {
            snapshot: Arc::clone(&self.snapshot),
            folded: self.folded.clone(),
            overrides: RwLock::new(self.read_overrides().clone()),
            options: self.options,
        }
    }
}

impl Environment {
    /// Layers an empty override table over the process snapshot.
    #[must_use]
    pub fn from_process() -> Self {
        Self::with_options(Snapshot::process(), EnvOptions::default())
    }

    /// Creates an environment with no snapshot variables.
    #[must_use]
    pub fn empty() -> Self {
        Self::with_options(Snapshot::empty(), EnvOptions::default())
    }

    /// Creates an environment whose snapshot holds `vars`.
    #[must_use]
    pub fn from_map(vars: BTreeMap<String, String>) -> Self {
        Self::with_options(Snapshot::from_map(vars), EnvOptions::default())
    }

    /// Creates an environment over `snapshot` with explicit options.
    #[must_use]
    pub fn with_options(snapshot: impl Into<Arc<Snapshot>>, options: EnvOptions) -> Self {
        let snapshot = snapshot.into();
        let key_case = options.key_case();
        let folded = match key_case {
            KeyCase::Sensitive => None,
            KeyCase::Insensitive => Some(Arc::new(
                snapshot
                    .iter()
                    .map(|(name, _)| (key_case.fold(name).into_owned(), name.to_owned()))
                    .collect(),
            )),
        };

        Self {
            snapshot,
            folded,
            overrides: RwLock::new(BTreeMap::new()),
            options,
        }
    }

    #[must_use]
    pub const fn options(&self) -> &EnvOptions {
        &self.options
    }

    /// Returns the underlying snapshot, without overrides.
    #[must_use]
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    fn read_overrides(&self) -> RwLockReadGuard<'_, OverrideTable> {
        self.overrides
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_overrides(&self) -> RwLockWriteGuard<'_, OverrideTable> {
        self.overrides
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn snapshot_get(&self, name: &str) -> Option<&str> {
        match &self.folded {
            Some(index) => {
                let key = self.options.key_case().fold(name);
                index
                    .get(&*key)
                    .and_then(|original| self.snapshot.get(original))
            }
            None => self.snapshot.get(name),
        }
    }

    // --- Raw lookup ---

    /// Gets a variable together with the layer that supplied it.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<(String, Layer)> {
        let key = self.options.key_case().fold(name);

        let found = match self.read_overrides().get(&*key) {
            Some(entry) => match &entry.state {
                Override::Value(value) => Some((value.clone(), Layer::Override)),
                Override::Hidden => None,
            },
            None => self
                .snapshot_get(name)
                .map(|value| (value.to_owned(), Layer::Snapshot)),
        };

        tracing::trace!(var = name, layer = ?found.as_ref().map(|(_, layer)| *layer), "env lookup");
        found
    }

    /// Gets a variable, override first.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<String> {
        self.lookup(name).map(|(value, _)| value)
    }

    /// Returns true if `get` would find the variable.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    // --- Override table ---

    /// Sets an override, shadowing any snapshot value.
    pub fn set(&self, name: impl Into<String>, value: impl Into<String>) -> &Self {
        let name = name.into();
        tracing::debug!(var = %name, "setting env override");
        self.replace_override(name, Some(Override::Value(value.into())));
        self
    }

    /// Hides a variable: `get` reports it missing even if the snapshot has it.
    pub fn hide(&self, name: impl Into<String>) -> &Self {
        let name = name.into();
        tracing::debug!(var = %name, "hiding env variable");
        self.replace_override(name, Some(Override::Hidden));
        self
    }

    /// Removes an override, revealing the snapshot value again.
    pub fn unset(&self, name: &str) -> &Self {
        if self.replace_override(name.to_owned(), None).is_some() {
            tracing::debug!(var = name, "removed env override");
        }
        self
    }

    /// Removes every override.
    pub fn clear_overrides(&self) {
        let mut overrides = self.write_overrides();
        tracing::debug!(count = overrides.len(), "clearing env overrides");
        overrides.clear();
    }

    /// Sets an override until the returned guard is dropped.
    #[must_use = "the override is reverted when the guard is dropped"]
    pub fn override_scoped(
        &self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> OverrideGuard<'_> {
        let name = name.into();
        let previous = self.replace_override(name.clone(), Some(Override::Value(value.into())));
        OverrideGuard::new(self, name, previous)
    }

    /// Hides a variable until the returned guard is dropped.
    #[must_use = "the variable reappears when the guard is dropped"]
    pub fn hide_scoped(&self, name: impl Into<String>) -> OverrideGuard<'_> {
        let name = name.into();
        let previous = self.replace_override(name.clone(), Some(Override::Hidden));
        OverrideGuard::new(self, name, previous)
    }

    /// Installs or removes the override for `name`, returning the previous entry.
    pub(super) fn replace_override(
        &self,
        name: String,
        state: Option<Override>,
    ) -> Option<OverrideEntry> {
        let key = self.options.key_case().fold(&name).into_owned();
        let mut overrides = self.write_overrides();
        match state {
            Some(state) => overrides.insert(key, OverrideEntry { name, state }),
            None => overrides.remove(&key),
        }
    }

    /// Puts back an entry captured by [`replace_override`](Self::replace_override).
    pub(super) fn restore_override(&self, name: &str, previous: Option<OverrideEntry>) {
        let key = self.options.key_case().fold(name).into_owned();
        let mut overrides = self.write_overrides();
        match previous {
            Some(entry) => {
                overrides.insert(key, entry);
            }
            None => {
                overrides.remove(&key);
            }
        }
    }

    // --- Typed accessors ---

    /// Gets a variable as an integer, detecting the base from its prefix.
    ///
    /// Returns `Ok(None)` if the variable is missing.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the variable is present but not an integer.
    pub fn get_int(&self, name: &str) -> Result<Option<i64>, ParseError> {
        self.get(name).map(|s| parse::parse_int(&s)).transpose()
    }

    /// Gets a variable as a float.
    ///
    /// Returns `Ok(None)` if the variable is missing.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the variable is present but not a float.
    pub fn get_float(&self, name: &str) -> Result<Option<f64>, ParseError> {
        self.get(name).map(|s| parse::parse_float(&s)).transpose()
    }

    /// Gets a variable as an integer, substituting `default` if it is
    /// missing or malformed.
    #[must_use]
    pub fn get_int_or(&self, name: &str, default: i64) -> Defaulted<i64> {
        defaulted(name, self.get_int(name), default)
    }

    /// Gets a variable as a float, substituting `default` if it is missing
    /// or malformed.
    #[must_use]
    pub fn get_float_or(&self, name: &str, default: f64) -> Defaulted<f64> {
        defaulted(name, self.get_float(name), default)
    }

    /// Gets a variable as a list split on the configured delimiter.
    ///
    /// An escaped delimiter (`\:`) stays in the item. An empty value yields
    /// an empty list, which is distinct from a missing variable.
    #[must_use]
    pub fn get_list(&self, name: &str) -> Option<Vec<String>> {
        self.get(name)
            .map(|s| parse::split_list(&s, self.options.list_delimiter()))
    }

    // --- Required accessors ---

    /// Gets a variable that must be present.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::Required`] if the variable is missing.
    pub fn must_get(&self, name: &str) -> EnvResult<String> {
        self.get(name).ok_or_else(|| EnvError::required(name))
    }

    /// Gets an integer variable that must be present and valid.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::Required`] if missing, [`EnvError::Malformed`] if
    /// not an integer.
    pub fn must_get_int(&self, name: &str) -> EnvResult<i64> {
        self.get_int(name)
            .map_err(|e| EnvError::malformed(name, ValueKind::Int, e))?
            .ok_or_else(|| EnvError::required(name))
    }

    /// Gets an integer variable, falling back to `default` only if missing.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::Malformed`] if the variable is present but not an
    /// integer.
    pub fn must_get_int_or(&self, name: &str, default: i64) -> EnvResult<i64> {
        let result = self.get_int_or(name, default);
        match result.error {
            Some(e) => Err(EnvError::malformed(name, ValueKind::Int, e)),
            None => Ok(result.value),
        }
    }

    /// Gets a float variable that must be present and valid.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::Required`] if missing, [`EnvError::Malformed`] if
    /// not a float.
    pub fn must_get_float(&self, name: &str) -> EnvResult<f64> {
        self.get_float(name)
            .map_err(|e| EnvError::malformed(name, ValueKind::Float, e))?
            .ok_or_else(|| EnvError::required(name))
    }

    /// Gets a list variable that must be present.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::Required`] if the variable is missing.
    pub fn must_get_list(&self, name: &str) -> EnvResult<Vec<String>> {
        self.get_list(name).ok_or_else(|| EnvError::required(name))
    }

    // --- Bulk views ---

    /// Returns the effective variables: snapshot with overrides applied.
    #[must_use]
    pub fn all(&self) -> BTreeMap<String, String> {
        let key_case = self.options.key_case();
        let overrides = self.read_overrides();

        let mut vars: BTreeMap<String, String> = self
            .snapshot
            .iter()
            .filter(|(name, _)| !overrides.contains_key(&*key_case.fold(name)))
            .map(|(name, value)| (name.to_owned(), value.to_owned()))
            .collect();

        for entry in overrides.values() {
            if let Override::Value(value) = &entry.state {
                vars.insert(entry.name.clone(), value.clone());
            }
        }

        vars
    }

    /// Returns the number of active overrides, hidden variables included.
    #[must_use]
    pub fn override_count(&self) -> usize {
        self.read_overrides().len()
    }
}

fn defaulted<T>(name: &str, parsed: Result<Option<T>, ParseError>, default: T) -> Defaulted<T> {
    match parsed {
        Ok(Some(value)) => Defaulted::parsed(value),
        Ok(None) => Defaulted::missing(default),
        Err(e) => {
            tracing::warn!(var = name, error = %e, "malformed env variable, using default");
            Defaulted::malformed(default, e)
        }
    }
}

impl Serialize for Environment {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.all().serialize(serializer)
    }
}
