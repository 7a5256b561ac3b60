// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Runtime value model for parameter binding and row mapping.
//!
//! [`Value`] is a closed enum over the "simple" type set — the types the
//! classifier considers scaffoldable without an explicit override. Anything
//! outside this set (enumerations, domain newtypes) participates only
//! through an editable-true override plus caller-provided [`Into<Value>`]
//! and [`FromValue`] conversions.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use crate::error::StatementError;

/// A single database value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL NULL.
    Null,

    /// Boolean.
    Bool(bool),

    /// 16-bit signed integer.
    I16(i16),

    /// 32-bit signed integer.
    I32(i32),

    /// 64-bit signed integer.
    I64(i64),

    /// 32-bit float.
    F32(f32),

    /// 64-bit float.
    F64(f64),

    /// Text.
    Text(String),

    /// Single character.
    Char(char),

    /// Binary blob.
    Bytes(Vec<u8>),

    /// UUID.
    Uuid(Uuid),

    /// Timestamp with UTC offset.
    DateTime(DateTime<Utc>),

    /// Calendar date.
    Date(NaiveDate),

    /// Time of day.
    Time(NaiveTime)
}

impl Value {
    /// Check for SQL NULL.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The kind of this value. NULL reports [`ValueKind::Other`].
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Other,
            Self::Bool(_) => ValueKind::Bool,
            Self::I16(_) => ValueKind::I16,
            Self::I32(_) => ValueKind::I32,
            Self::I64(_) => ValueKind::I64,
            Self::F32(_) => ValueKind::F32,
            Self::F64(_) => ValueKind::F64,
            Self::Text(_) => ValueKind::Text,
            Self::Char(_) => ValueKind::Char,
            Self::Bytes(_) => ValueKind::Bytes,
            Self::Uuid(_) => ValueKind::Uuid,
            Self::DateTime(_) => ValueKind::DateTime,
            Self::Date(_) => ValueKind::Date,
            Self::Time(_) => ValueKind::Time
        }
    }

    /// Short name of the contained kind, for diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::I16(_) => "i16",
            Self::I32(_) => "i32",
            Self::I64(_) => "i64",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
            Self::Text(_) => "text",
            Self::Char(_) => "char",
            Self::Bytes(_) => "bytes",
            Self::Uuid(_) => "uuid",
            Self::DateTime(_) => "datetime",
            Self::Date(_) => "date",
            Self::Time(_) => "time"
        }
    }

    /// Check whether this value counts as an "empty" key.
    ///
    /// Empty keys trigger client-side generation for UUID columns and
    /// rejection for text columns: NULL, the nil UUID, or empty text.
    #[must_use]
    pub fn is_empty_key(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Uuid(u) => u.is_nil(),
            Self::Text(s) => s.is_empty(),
            _ => false
        }
    }
}

/// Static kind of a column, recorded in the schema descriptor.
///
/// Mirrors the [`Value`] variants plus [`ValueKind::Other`] for types
/// outside the simple set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Boolean.
    Bool,
    /// 16-bit signed integer.
    I16,
    /// 32-bit signed integer.
    I32,
    /// 64-bit signed integer.
    I64,
    /// 32-bit float.
    F32,
    /// 64-bit float.
    F64,
    /// Text.
    Text,
    /// Single character.
    Char,
    /// Binary blob.
    Bytes,
    /// UUID.
    Uuid,
    /// Timestamp.
    DateTime,
    /// Calendar date.
    Date,
    /// Time of day.
    Time,
    /// Not in the simple set; scaffolded only via editable-true.
    Other
}

impl ValueKind {
    /// Check membership in the simple (auto-scaffoldable) type set.
    #[must_use]
    pub const fn is_simple(&self) -> bool {
        !matches!(self, Self::Other)
    }

    /// Check if a key column of this kind is database-assigned.
    ///
    /// UUID and text keys are client-supplied; every other kind is treated
    /// as an identity column the database generates.
    #[must_use]
    pub const fn is_identity_key(&self) -> bool {
        !matches!(self, Self::Uuid | Self::Text)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Self::I16(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::I32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::I64(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::F32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::F64(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Self::Char(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Self::Uuid(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Self::DateTime(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Self::Date(v)
    }
}

impl From<NaiveTime> for Value {
    fn from(v: NaiveTime) -> Self {
        Self::Time(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// Conversion from a database [`Value`] into a Rust field type.
///
/// Integer conversions are widening or checked-narrowing; a narrowing
/// overflow is a [`StatementError::Conversion`] mapping error, never a
/// silent truncation.
pub trait FromValue: Sized {
    /// Convert, reporting a mapping error on kind mismatch.
    fn from_value(value: &Value) -> Result<Self, StatementError>;
}

fn conversion(expected: &'static str, value: &Value) -> StatementError {
    StatementError::Conversion {
        expected,
        found: value.kind_name()
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self, StatementError> {
        match value {
            Value::Bool(v) => Ok(*v),
            other => Err(conversion("bool", other))
        }
    }
}

impl FromValue for i16 {
    fn from_value(value: &Value) -> Result<Self, StatementError> {
        match value {
            Value::I16(v) => Ok(*v),
            Value::I32(v) => Self::try_from(*v).map_err(|_| conversion("i16", value)),
            Value::I64(v) => Self::try_from(*v).map_err(|_| conversion("i16", value)),
            other => Err(conversion("i16", other))
        }
    }
}

impl FromValue for i32 {
    fn from_value(value: &Value) -> Result<Self, StatementError> {
        match value {
            Value::I16(v) => Ok(Self::from(*v)),
            Value::I32(v) => Ok(*v),
            Value::I64(v) => Self::try_from(*v).map_err(|_| conversion("i32", value)),
            other => Err(conversion("i32", other))
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Result<Self, StatementError> {
        match value {
            Value::I16(v) => Ok(Self::from(*v)),
            Value::I32(v) => Ok(Self::from(*v)),
            Value::I64(v) => Ok(*v),
            other => Err(conversion("i64", other))
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> Result<Self, StatementError> {
        match value {
            Value::F32(v) => Ok(*v),
            other => Err(conversion("f32", other))
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self, StatementError> {
        match value {
            Value::F32(v) => Ok(Self::from(*v)),
            Value::F64(v) => Ok(*v),
            other => Err(conversion("f64", other))
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self, StatementError> {
        match value {
            Value::Text(v) => Ok(v.clone()),
            other => Err(conversion("String", other))
        }
    }
}

impl FromValue for char {
    fn from_value(value: &Value) -> Result<Self, StatementError> {
        match value {
            Value::Char(v) => Ok(*v),
            other => Err(conversion("char", other))
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: &Value) -> Result<Self, StatementError> {
        match value {
            Value::Bytes(v) => Ok(v.clone()),
            other => Err(conversion("Vec<u8>", other))
        }
    }
}

impl FromValue for Uuid {
    fn from_value(value: &Value) -> Result<Self, StatementError> {
        match value {
            Value::Uuid(v) => Ok(*v),
            other => Err(conversion("Uuid", other))
        }
    }
}

impl FromValue for DateTime<Utc> {
    fn from_value(value: &Value) -> Result<Self, StatementError> {
        match value {
            Value::DateTime(v) => Ok(*v),
            other => Err(conversion("DateTime<Utc>", other))
        }
    }
}

impl FromValue for NaiveDate {
    fn from_value(value: &Value) -> Result<Self, StatementError> {
        match value {
            Value::Date(v) => Ok(*v),
            other => Err(conversion("NaiveDate", other))
        }
    }
}

impl FromValue for NaiveTime {
    fn from_value(value: &Value) -> Result<Self, StatementError> {
        match value {
            Value::Time(v) => Ok(*v),
            other => Err(conversion("NaiveTime", other))
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self, StatementError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_checks() {
        assert!(Value::Null.is_null());
        assert!(!Value::I32(0).is_null());
    }

    #[test]
    fn empty_key_detection() {
        assert!(Value::Null.is_empty_key());
        assert!(Value::Uuid(Uuid::nil()).is_empty_key());
        assert!(Value::Text(String::new()).is_empty_key());
        assert!(!Value::Uuid(Uuid::new_v4()).is_empty_key());
        assert!(!Value::Text("k".into()).is_empty_key());
        assert!(!Value::I64(0).is_empty_key());
    }

    #[test]
    fn from_impls() {
        assert_eq!(Value::from(7_i32), Value::I32(7));
        assert_eq!(Value::from("bob"), Value::Text("bob".into()));
        assert_eq!(Value::from(Some(5_i64)), Value::I64(5));
        assert_eq!(Value::from(None::<i64>), Value::Null);
    }

    #[test]
    fn integer_widening() {
        assert_eq!(i64::from_value(&Value::I16(3)).unwrap(), 3);
        assert_eq!(i64::from_value(&Value::I32(3)).unwrap(), 3);
        assert_eq!(i32::from_value(&Value::I64(42)).unwrap(), 42);
    }

    #[test]
    fn integer_narrowing_overflow() {
        let err = i32::from_value(&Value::I64(i64::MAX)).unwrap_err();
        assert!(matches!(err, StatementError::Conversion { .. }));
    }

    #[test]
    fn kind_mismatch() {
        let err = bool::from_value(&Value::Text("true".into())).unwrap_err();
        assert_eq!(
            err,
            StatementError::Conversion {
                expected: "bool",
                found:    "text"
            }
        );
    }

    #[test]
    fn optional_from_value() {
        assert_eq!(Option::<i32>::from_value(&Value::Null).unwrap(), None);
        assert_eq!(
            Option::<i32>::from_value(&Value::I32(1)).unwrap(),
            Some(1)
        );
    }

    #[test]
    fn identity_key_kinds() {
        assert!(ValueKind::I32.is_identity_key());
        assert!(ValueKind::I64.is_identity_key());
        assert!(!ValueKind::Uuid.is_identity_key());
        assert!(!ValueKind::Text.is_identity_key());
    }
}
