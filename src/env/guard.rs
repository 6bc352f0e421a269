// envlayer: Layered environment variable access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Scoped overrides.

use super::container::Environment;
use super::types::OverrideEntry;

/// Restores the previous override state of one variable when dropped.
///
/// Returned by [`Environment::override_scoped`] and
/// [`Environment::hide_scoped`]. Guards for the same name must be dropped in
/// reverse order of creation, as with any stack of scopes.
#[derive(Debug)]
pub struct OverrideGuard<'a> {
    env: &'a Environment,
    name: String,
    previous: Option<OverrideEntry>,
}

impl<'a> OverrideGuard<'a> {
    pub(super) const fn new(
        env: &'a Environment,
        name: String,
        previous: Option<OverrideEntry>,
    ) -> Self {
        Self {
            env,
            name,
            previous,
        }
    }

    /// Name of the guarded variable.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for OverrideGuard<'_> {
    fn drop(&mut self) {
        tracing::debug!(var = %self.name, "restoring env override");
        self.env.restore_override(&self.name, self.previous.take());
    }
}
