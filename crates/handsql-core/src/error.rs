// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Error types for statement synthesis and repository operations.
//!
//! Errors fall into three families, surfaced by [`StatementError::kind`]:
//!
//! | Kind | Meaning | Recovery |
//! |------|---------|----------|
//! | [`ErrorKind::Declaration`] | The entity schema is invalid | Fix the type definition |
//! | [`ErrorKind::Input`] | A caller argument was rejected | Fix the call site |
//! | [`ErrorKind::Mapping`] | A row value did not convert | Fix schema/data mismatch |
//!
//! Declaration errors signal a programming mistake and are raised on first
//! resolution of the offending type. Input errors are rejected before any
//! statement reaches the database. Execution errors never appear here; they
//! belong to the executor and propagate unchanged through
//! [`RepositoryError::Database`].

use std::fmt;

use crate::dialect::Dialect;

/// Family of a [`StatementError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The entity type declaration is invalid.
    Declaration,

    /// A caller-supplied argument was rejected.
    Input,

    /// A row value could not be converted to the requested field type.
    Mapping
}

/// Error produced while classifying an entity or synthesizing a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementError {
    /// No key column was declared and no `id` fallback field exists.
    MissingKey {
        /// Entity type name.
        entity: &'static str
    },

    /// More than one column carries the version marker.
    DuplicateVersion {
        /// Entity type name.
        entity: &'static str
    },

    /// The resolved version column is not a non-nullable 64-bit integer.
    VersionType {
        /// Entity type name.
        entity: &'static str,
        /// Offending field name.
        field:  &'static str
    },

    /// Page numbers are 1-based; zero or negative values are rejected.
    PageNumber {
        /// The rejected page number.
        page: i64
    },

    /// The active dialect has no paging template.
    PagingUnsupported {
        /// The dialect lacking paging support.
        dialect: Dialect
    },

    /// The active dialect cannot retrieve database-assigned identities.
    IdentityUnsupported {
        /// The dialect lacking identity retrieval.
        dialect: Dialect
    },

    /// A text-typed key must be supplied by the caller before insert.
    MissingStringKey {
        /// Entity type name.
        entity: &'static str,
        /// Key field name.
        field:  &'static str
    },

    /// A free-text ORDER BY identifier is not a selectable column.
    OrderByColumn {
        /// The rejected identifier as supplied.
        token: String
    },

    /// A free-text ORDER BY direction is neither `ASC` nor `DESC`.
    OrderByDirection {
        /// The rejected direction as supplied.
        token: String
    },

    /// A field name does not exist on the entity schema.
    UnknownField {
        /// Entity type name.
        entity: &'static str,
        /// The unknown field name.
        field:  String
    },

    /// A key argument does not match the entity's key column count.
    KeyArity {
        /// Entity type name.
        entity:   &'static str,
        /// Number of declared key columns.
        expected: usize,
        /// Number of values supplied.
        supplied: usize
    },

    /// A column expected during row mapping was absent from the result row.
    MissingColumn {
        /// The missing column label.
        column: String
    },

    /// A row value had an unexpected type.
    Conversion {
        /// The Rust type the caller requested.
        expected: &'static str,
        /// The kind of value actually found.
        found:    &'static str
    }
}

impl StatementError {
    /// Classify this error into its family.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingKey { .. } | Self::DuplicateVersion { .. } | Self::VersionType { .. } => {
                ErrorKind::Declaration
            }
            Self::MissingColumn { .. } | Self::Conversion { .. } => ErrorKind::Mapping,
            _ => ErrorKind::Input
        }
    }

    /// Check if this is a declaration error.
    #[must_use]
    pub const fn is_declaration(&self) -> bool {
        matches!(self.kind(), ErrorKind::Declaration)
    }

    /// Check if this is an input validation error.
    #[must_use]
    pub const fn is_input(&self) -> bool {
        matches!(self.kind(), ErrorKind::Input)
    }
}

impl fmt::Display for StatementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingKey { entity } => {
                write!(f, "entity {} requires at least one key column", entity)
            }
            Self::DuplicateVersion { entity } => {
                write!(f, "entity {} declares more than one version column", entity)
            }
            Self::VersionType { entity, field } => write!(
                f,
                "version column {}.{} must be a non-nullable i64",
                entity, field
            ),
            Self::PageNumber { page } => {
                write!(f, "page number must be >= 1, got {}", page)
            }
            Self::PagingUnsupported { dialect } => {
                write!(f, "dialect {:?} does not support paged queries", dialect)
            }
            Self::IdentityUnsupported { dialect } => {
                write!(f, "dialect {:?} does not support identity retrieval", dialect)
            }
            Self::MissingStringKey { entity, field } => write!(
                f,
                "string key {}.{} must be supplied before insert",
                entity, field
            ),
            Self::OrderByColumn { token } => {
                write!(f, "Invalid ORDER BY column: {}", token)
            }
            Self::OrderByDirection { token } => {
                write!(f, "Invalid ORDER BY direction: {}", token)
            }
            Self::UnknownField { entity, field } => {
                write!(f, "entity {} has no field named {}", entity, field)
            }
            Self::KeyArity {
                entity,
                expected,
                supplied
            } => write!(
                f,
                "entity {} has {} key column(s) but {} value(s) were supplied",
                entity, expected, supplied
            ),
            Self::MissingColumn { column } => {
                write!(f, "result row has no column {}", column)
            }
            Self::Conversion { expected, found } => {
                write!(f, "cannot convert {} value into {}", found, expected)
            }
        }
    }
}

impl std::error::Error for StatementError {}

/// Error type for repository operations.
///
/// Composes statement synthesis failures with whatever error type the
/// executor reports. Execution errors are never caught, retried, or
/// reinterpreted by the core.
#[derive(Debug)]
pub enum RepositoryError<E> {
    /// Statement synthesis or validation failed before execution.
    Statement(StatementError),

    /// The executor reported a database error.
    Database(E)
}

impl<E> RepositoryError<E> {
    /// Check if this error was raised before any statement was sent.
    pub const fn is_statement(&self) -> bool {
        matches!(self, Self::Statement(_))
    }

    /// Check if this error came from the database executor.
    pub const fn is_database(&self) -> bool {
        matches!(self, Self::Database(_))
    }
}

impl<E> From<StatementError> for RepositoryError<E> {
    fn from(err: StatementError) -> Self {
        Self::Statement(err)
    }
}

impl<E: fmt::Display> fmt::Display for RepositoryError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Statement(e) => write!(f, "statement error: {}", e),
            Self::Database(e) => write!(f, "database error: {}", e)
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for RepositoryError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Statement(e) => Some(e),
            Self::Database(e) => Some(e)
        }
    }
}
