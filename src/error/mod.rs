// envlayer: Layered environment variable access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!            EnvError (must_* accessors)
//!                  |
//!        +---------+---------+
//!        v                   v
//!    Required            Malformed
//!    { name }     { name, kind, ParseError }
//!                            |
//!                 +----------+----------+
//!                 v          v          v
//!                Int        Sign      Float
//!           ParseIntError  (+-1)  ParseFloatError
//! ```
//!
//! Plain accessors report [`ParseError`] directly. Only the `must_*`
//! accessors produce [`EnvError`], and only [`OrAbort::or_abort`] turns one
//! into a panic.

use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

use crate::env::types::ValueKind;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`EnvError`].
pub type EnvResult<T> = std::result::Result<T, EnvError>;

/// A variable was present but its value did not parse as the requested type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Integer digits were invalid or out of range.
    #[error("invalid integer {value:?}: {source}")]
    Int {
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// A sign appeared after the leading position.
    #[error("invalid integer {value:?}: misplaced sign")]
    Sign { value: String },

    /// Floating-point literal was invalid.
    #[error("invalid float {value:?}: {source}")]
    Float {
        value: String,
        #[source]
        source: ParseFloatError,
    },
}

impl ParseError {
    /// The raw value that failed to parse.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Int { value, .. } | Self::Sign { value } | Self::Float { value, .. } => value,
        }
    }
}

/// A required variable was missing or malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvError {
    /// Variable absent from both the override table and the snapshot.
    #[error("${name} is required.")]
    Required { name: String },

    /// Variable present but unparsable as `kind`.
    #[error("${name} must be {}.", .kind.with_article())]
    Malformed {
        name: String,
        kind: ValueKind,
        #[source]
        source: ParseError,
    },
}

impl EnvError {
    pub(crate) fn required(name: &str) -> Self {
        Self::Required {
            name: name.to_owned(),
        }
    }

    pub(crate) fn malformed(name: &str, kind: ValueKind, source: ParseError) -> Self {
        Self::Malformed {
            name: name.to_owned(),
            kind,
            source,
        }
    }

    /// Name of the offending variable.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Required { name } | Self::Malformed { name, .. } => name,
        }
    }

    /// Returns true if the variable was absent.
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Required { .. })
    }
}

/// Abort-on-error wrapper for `must_*` results.
///
/// Callers that have no fallback for a missing or malformed variable opt in
/// to the fatal path explicitly at the call site:
///
/// ```should_panic
/// use envlayer::{Environment, OrAbort};
///
/// let env = Environment::empty();
/// let _port = env.must_get_int("PORT").or_abort();
/// ```
pub trait OrAbort<T> {
    /// Unwraps the value, or logs the error and panics with its message.
    ///
    /// # Panics
    ///
    /// Panics with `$NAME is required.` or `$NAME must be ...` on error.
    fn or_abort(self) -> T;
}

impl<T> OrAbort<T> for EnvResult<T> {
    #[track_caller]
    fn or_abort(self) -> T {
        match self {
            Ok(value) => value,
            Err(e) => {
                tracing::error!(var = e.name(), "{e}");
                panic!("{e}");
            }
        }
    }
}
