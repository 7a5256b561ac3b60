// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Caller-facing query inputs: filters, WHERE sources, and keys.

use crate::value::Value;

/// Equality filter over entity fields.
///
/// Each entry pairs a field name with a value; [`Value::Null`] renders as
/// `IS NULL` instead of an equality comparison. Field names are resolved
/// against the entity schema — an unknown name is an input error, so a
/// filter can never smuggle raw text into the statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    entries: Vec<(String, Value)>
}

impl Filter {
    /// Empty filter.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new()
        }
    }

    /// Add an equality condition.
    #[must_use]
    pub fn equals(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.push((field.into(), value.into()));
        self
    }

    /// Add an `IS NULL` condition.
    #[must_use]
    pub fn is_null(mut self, field: impl Into<String>) -> Self {
        self.entries.push((field.into(), Value::Null));
        self
    }

    /// The accumulated conditions, in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[(String, Value)] {
        &self.entries
    }

    /// Check for an empty filter.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// WHERE-clause source for list, delete-many, count, and paged queries.
#[derive(Debug, Clone, PartialEq)]
pub enum Where {
    /// No restriction.
    All,

    /// Validated equality filter (the safe path).
    Filter(Filter),

    /// Raw fragment passed through verbatim, including the `WHERE` keyword
    /// (e.g. `"WHERE age > @Age"`), with its parameter bindings.
    ///
    /// The fragment is trusted exactly as written — it is the caller's SQL,
    /// not user input. Never build one from unvalidated strings.
    Raw(String, Vec<crate::statement::Parameter>)
}

impl Where {
    /// Raw fragment without parameters.
    #[must_use]
    pub fn raw(fragment: impl Into<String>) -> Self {
        Self::Raw(fragment.into(), Vec::new())
    }
}

impl From<Filter> for Where {
    fn from(filter: Filter) -> Self {
        Self::Filter(filter)
    }
}

/// Key argument for get/delete-by-key operations.
///
/// A single value matches the entity's one key column; a composite key
/// supplies (field name, value) pairs for each declared key column.
#[derive(Debug, Clone, PartialEq)]
pub enum Key {
    /// Value for a single-column key.
    Single(Value),

    /// Named values for a composite key.
    Composite(Vec<(String, Value)>)
}

impl Key {
    /// Single-column key from any bindable value.
    #[must_use]
    pub fn single(value: impl Into<Value>) -> Self {
        Self::Single(value.into())
    }

    /// Composite key from (field, value) pairs.
    #[must_use]
    pub fn composite<I, N, V>(parts: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<Value>
    {
        Self::Composite(
            parts
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect()
        )
    }
}

impl From<Value> for Key {
    fn from(value: Value) -> Self {
        Self::Single(value)
    }
}

impl From<i16> for Key {
    fn from(value: i16) -> Self {
        Self::single(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Self::single(value)
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Self::single(value)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Self::single(value)
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Self::single(value)
    }
}

impl From<uuid::Uuid> for Key {
    fn from(value: uuid::Uuid) -> Self {
        Self::single(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_accumulates_in_order() {
        let filter = Filter::new().equals("age", 10).is_null("nickname");
        assert_eq!(filter.entries().len(), 2);
        assert_eq!(filter.entries()[0].0, "age");
        assert_eq!(filter.entries()[1].1, Value::Null);
    }

    #[test]
    fn key_from_scalar() {
        assert_eq!(Key::from(5_i32), Key::Single(Value::I32(5)));
        assert_eq!(Key::from("abc"), Key::Single(Value::Text("abc".into())));
    }

    #[test]
    fn composite_key_keeps_order() {
        let key = Key::composite([("order_id", 1_i32), ("line_number", 2_i32)]);
        match key {
            Key::Composite(parts) => {
                assert_eq!(parts[0].0, "order_id");
                assert_eq!(parts[1].0, "line_number");
            }
            Key::Single(_) => panic!("expected composite")
        }
    }
}
