// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Dialect-aware SQL synthesis engine and CRUD mapping runtime.
//!
//! This crate turns explicit entity schema descriptors into predictable,
//! loggable, hand-inspectable SQL for six dialects, without an ORM-style
//! change tracker or query provider. It is the runtime half of `handsql`;
//! the derive macro that writes [`Entity`] implementations lives in
//! `handsql-derive`, and most users depend on the `handsql` facade.
//!
//! # Overview
//!
//! - [`Dialect`] / [`DialectProfile`] — quoting, identity retrieval, and
//!   paging per database, with one process-wide active profile
//! - [`EntitySchema`] / [`SchemaBuilder`] / [`Entity`] — explicit schema
//!   descriptors replacing runtime reflection
//! - [`Repository`] — generated-SQL CRUD over a pluggable [`Executor`]
//! - [`OrderBy`] — allow-list-validated free text or typed field tokens
//! - [`sequential_uuid`] — fragmentation-friendly client-side key values
//!
//! # Example
//!
//! ```rust,ignore
//! use handsql_core::{Filter, OrderBy, Repository, Where, set_active_dialect, Dialect};
//!
//! set_active_dialect(Dialect::Postgres);
//! let repo = Repository::new(pool_executor);
//!
//! let adults: Vec<Person> = repo
//!     .list(
//!         Where::Filter(Filter::new().equals("age", 21)),
//!         Some(OrderBy::text("LastName ASC"))
//!     )
//!     .await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod builder;
mod classify;
mod dialect;
mod error;
mod executor;
mod keygen;
mod orderby;
mod paging;
pub mod prelude;
mod query;
mod repository;
mod resolve;
mod row;
mod schema;
mod statement;
mod value;

pub use classify::EntityMeta;
pub use dialect::{Dialect, DialectProfile, active_profile, set_active_dialect};
pub use error::{ErrorKind, RepositoryError, StatementError};
pub use executor::Executor;
pub use keygen::sequential_uuid;
pub use orderby::{OrderBy, SortDirection};
pub use query::{Filter, Key, Where};
pub use repository::Repository;
pub use resolve::{
    ColumnNameResolver, ConventionResolver, TableNameResolver, set_column_name_resolver,
    set_table_name_resolver
};
pub use row::Row;
pub use schema::{ColumnDescriptor, Entity, EntitySchema, FieldToken, SchemaBuilder};
pub use statement::{Parameter, Statement};
pub use value::{FromValue, Value, ValueKind};

/// Re-export async_trait for hand-written executor implementations.
pub use async_trait::async_trait;
