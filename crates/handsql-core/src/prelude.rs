// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for typical usage.
//!
//! ```rust
//! use handsql_core::prelude::*;
//! ```

pub use crate::{
    Dialect, Entity, EntitySchema, Executor, Filter, FromValue, Key, OrderBy, Parameter,
    Repository, RepositoryError, Row, SchemaBuilder, SortDirection, Statement, StatementError,
    Value, ValueKind, Where, set_active_dialect
};
