// envlayer: Layered environment variable access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Types for environment variable lookup.
//!
//! # Architecture
//!
//! ```text
//! KeyCase: Sensitive (unix) / Insensitive (windows, PATH == Path == path)
//! Layer: Override | Snapshot (which table answered a lookup)
//! Override: Value(String) | Hidden (tombstone)
//! Defaulted<T>: value + found + error, for the *_or accessors
//! ValueKind: Int | Float | List (names the expected type in errors)
//! ```

use std::borrow::Cow;

use serde::Serialize;

use crate::error::ParseError;

/// How variable names are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCase {
    /// Names match byte for byte.
    Sensitive,
    /// Names match ignoring ASCII case.
    Insensitive,
}

impl Default for KeyCase {
    fn default() -> Self {
        Self::platform()
    }
}

impl KeyCase {
    /// The convention of the host OS: insensitive on Windows, sensitive elsewhere.
    #[must_use]
    pub const fn platform() -> Self {
        if cfg!(windows) {
            Self::Insensitive
        } else {
            Self::Sensitive
        }
    }

    /// Folds a name into its lookup key.
    #[must_use]
    pub fn fold<'a>(&self, name: &'a str) -> Cow<'a, str> {
        match self {
            Self::Insensitive if name.bytes().any(|b| b.is_ascii_uppercase()) => {
                Cow::Owned(name.to_ascii_lowercase())
            }
            _ => Cow::Borrowed(name),
        }
    }
}

/// The table that resolved a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    /// Set through [`Environment::set`](super::container::Environment::set).
    Override,
    /// Captured from the real environment.
    Snapshot,
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Override => write!(f, "override"),
            Self::Snapshot => write!(f, "snapshot"),
        }
    }
}

/// Expected type of a variable, as named in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Int,
    Float,
    List,
}

impl ValueKind {
    /// Type name with its indefinite article ("an integer").
    #[must_use]
    pub const fn with_article(&self) -> &'static str {
        match self {
            Self::Int => "an integer",
            Self::Float => "a float",
            Self::List => "a list",
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int => write!(f, "integer"),
            Self::Float => write!(f, "float"),
            Self::List => write!(f, "list"),
        }
    }
}

/// An entry in the override table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Override {
    /// Shadows the snapshot with a value.
    Value(String),
    /// Hides the variable even if the snapshot has it.
    Hidden,
}

/// An override entry together with the name it was set under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct OverrideEntry {
    pub(super) name: String,
    pub(super) state: Override,
}

/// Result of a typed lookup with a caller-supplied default.
///
/// `value` is always usable. A malformed variable still substitutes the
/// default, but `found` is true and `error` carries the parse failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Defaulted<T> {
    pub value: T,
    pub found: bool,
    pub error: Option<ParseError>,
}

impl<T> Defaulted<T> {
    pub(super) const fn missing(default: T) -> Self {
        Self {
            value: default,
            found: false,
            error: None,
        }
    }

    pub(super) const fn parsed(value: T) -> Self {
        Self {
            value,
            found: true,
            error: None,
        }
    }

    pub(super) const fn malformed(default: T, error: ParseError) -> Self {
        Self {
            value: default,
            found: true,
            error: Some(error),
        }
    }

    /// Returns true if the variable was present but failed to parse.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        self.error.is_some()
    }

    /// Drops the default on a parse failure.
    ///
    /// # Errors
    ///
    /// Returns the parse error if the variable was malformed.
    pub fn into_result(self) -> Result<T, ParseError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.value),
        }
    }
}
