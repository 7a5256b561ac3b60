// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

//! # handsql
//!
//! One crate, all features. Re-exports:
//! - [`Entity`] derive macro from `handsql-derive`
//! - The full runtime from `handsql-core` ([`Repository`], [`Dialect`],
//!   [`OrderBy`], [`Where`], …)
//!
//! handsql generates predictable, loggable, hand-inspectable SQL from
//! annotated record types — no query provider, no change tracking. You
//! declare the shape, it writes the statements; your executor runs them.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use handsql::{Dialect, Entity, Repository, Where, set_active_dialect};
//!
//! #[derive(Entity)]
//! #[entity(table = "Users")]
//! pub struct User {
//!     #[column(key)]
//!     pub id: i32,
//!     #[column(name = "LastName")]
//!     pub last_name: String,
//!     pub age: i32,
//! }
//!
//! set_active_dialect(Dialect::Postgres);
//! let repo = Repository::new(executor);
//!
//! let user: Option<User> = repo.get(42).await?;
//! let seniors = repo.count::<User>(Where::raw("WHERE age > @age")).await?;
//! ```

// Re-export derive macro
// Re-export all core types
pub use handsql_core::*;
pub use handsql_derive::Entity;
