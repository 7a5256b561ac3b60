// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Result rows returned by the executor.

use crate::{
    error::StatementError,
    value::{FromValue, Value}
};

/// One result row: ordered (label, value) pairs.
///
/// Lookup is by label, case-insensitively, because dialects disagree on the
/// casing of unquoted identifiers they echo back. SELECT statements alias
/// mapped columns back to their field names, so generated `from_row`
/// implementations always look up by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, Value)>
}

impl Row {
    /// Create an empty row.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            columns: Vec::new()
        }
    }

    /// Append a column value.
    pub fn push(&mut self, label: impl Into<String>, value: Value) {
        self.columns.push((label.into(), value));
    }

    /// Builder-style [`push`](Self::push).
    #[must_use]
    pub fn with(mut self, label: impl Into<String>, value: Value) -> Self {
        self.push(label, value);
        self
    }

    /// Look up a value by label, case-insensitively.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(label))
            .map(|(_, value)| value)
    }

    /// Look up and convert a value, reporting mapping errors.
    pub fn try_get<T: FromValue>(&self, label: &str) -> Result<T, StatementError> {
        let value = self.get(label).ok_or_else(|| StatementError::MissingColumn {
            column: label.to_string()
        })?;
        T::from_value(value)
    }

    /// Number of columns in this row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check for an empty row.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
