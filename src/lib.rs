// envlayer: Layered environment variable access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!        caller (application / tests)
//!                   |
//!                   v
//!   ,-------------------------------------,
//!   |             Environment             |
//!   |  get / get_int / get_float / list   |
//!   |  *_or(default)   must_* -> EnvError |
//!   '----+-------------------------+------'
//!        |                         |
//!        v                         v
//!    overrides                 snapshot
//!  set / hide / unset      OnceLock<Arc<..>>
//!  OverrideGuard           KEY=VALUE parsing
//!        |
//!        v
//!      parse   int (base prefix) / float / list (\: escape)
//!
//!   +-----------------------------------------+
//!   |  foundation   error (thiserror), tracing |
//!   +-----------------------------------------+
//! ```
//!
//! # Example
//!
//! ```
//! use envlayer::Environment;
//!
//! let env = Environment::empty();
//! env.set("PATHS", "/usr/bin:/opt/a\\:b");
//!
//! assert_eq!(env.get_list("PATHS").unwrap(), ["/usr/bin", "/opt/a:b"]);
//! assert_eq!(env.get_int_or("WORKERS", 4).value, 4);
//! assert!(env.must_get("TOKEN").is_err());
//! ```

pub mod env;
pub mod error;
pub mod parse;

pub use env::container::Environment;
pub use env::current_env;
pub use env::guard::OverrideGuard;
pub use env::options::EnvOptions;
pub use env::snapshot::Snapshot;
pub use env::types::{Defaulted, KeyCase, Layer, ValueKind};
pub use error::{EnvError, EnvResult, OrAbort, ParseError};
