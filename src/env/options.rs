// envlayer: Layered environment variable access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use bon::Builder;

use super::types::KeyCase;
use crate::parse::DEFAULT_DELIMITER;

/// Options for an [`Environment`](super::container::Environment).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder)]
pub struct EnvOptions {
    /// Name matching mode (default: host OS convention)
    #[builder(setters(name = with_key_case), default = KeyCase::platform())]
    key_case: KeyCase,
    /// Separator for list values (default: ':')
    #[builder(setters(name = with_list_delimiter), default = DEFAULT_DELIMITER)]
    list_delimiter: char,
}

impl Default for EnvOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl EnvOptions {
    #[must_use]
    pub const fn key_case(&self) -> KeyCase {
        self.key_case
    }

    #[must_use]
    pub const fn list_delimiter(&self) -> char {
        self.list_delimiter
    }
}
