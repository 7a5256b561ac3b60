// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Finished statements handed to the executor.
//!
//! A [`Statement`] is plain SQL text plus named parameter bindings. The
//! text only ever contains identifiers and placeholders the builder itself
//! generated (or a raw WHERE fragment the caller explicitly supplied), so
//! it is safe to log verbatim — that is the point of this layer.

use std::fmt;

use crate::value::Value;

/// A named parameter binding.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    name:  String,
    value: Value
}

impl Parameter {
    /// Create a binding. The name is the bare field name, without the `@`
    /// placeholder prefix used in the SQL text.
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value
        }
    }

    /// Parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bound value.
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }
}

/// SQL text plus its parameter bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    sql:        String,
    parameters: Vec<Parameter>
}

impl Statement {
    /// Create a statement.
    pub fn new(sql: impl Into<String>, parameters: Vec<Parameter>) -> Self {
        Self {
            sql: sql.into(),
            parameters
        }
    }

    /// The SQL text.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The parameter bindings, in the order they were added.
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Decompose into text and bindings.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<Parameter>) {
        (self.sql, self.parameters)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}
