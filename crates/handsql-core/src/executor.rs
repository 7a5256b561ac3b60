// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! The execution seam.
//!
//! The core builds statements; an [`Executor`] runs them. Implementations
//! wrap whatever driver the application uses and translate [`Statement`]
//! bindings into that driver's parameter form. The core calls the executor
//! and nothing else — connection pooling, transactions, timeouts, and
//! cancellation all live behind this trait and pass through untouched.
//!
//! Identity-retrieving inserts send two statements in one text separated by
//! `;` and read the generated value from the scalar result, so an executor
//! must run multi-statement text in a single round-trip (drivers for every
//! supported dialect can).

use async_trait::async_trait;

use crate::{row::Row, statement::Statement, value::Value};

/// Parameterized statement execution against one database.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Driver error type, propagated unchanged through repository results.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Run a query and return all result rows.
    async fn fetch(&self, statement: &Statement) -> Result<Vec<Row>, Self::Error>;

    /// Run a query and return the first column of the first row.
    async fn fetch_scalar(&self, statement: &Statement) -> Result<Option<Value>, Self::Error>;

    /// Run a statement and return the affected-row count.
    async fn execute(&self, statement: &Statement) -> Result<u64, Self::Error>;
}
