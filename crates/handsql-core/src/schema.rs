// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity schema descriptors.
//!
//! An [`EntitySchema`] is the explicit replacement for runtime reflection:
//! a per-type, immutable description of the table name and every mapped
//! column with its role flags. It is produced either by
//! `#[derive(Entity)]` or by hand through [`SchemaBuilder`], and exposed
//! through the [`Entity`] trait's `schema()` — typically behind a
//! `OnceLock` so the build runs once per process.
//!
//! The descriptor is dialect-independent. Quoting is applied at render
//! time, never baked in here.

use std::marker::PhantomData;

use crate::{error::StatementError, row::Row, value::{Value, ValueKind}};

/// Role and mapping flags for one column.
///
/// # Flags
///
/// | Flag | Effect |
/// |------|--------|
/// | `key` | Part of the unique identifier; drives WHERE predicates |
/// | `version` | Optimistic-concurrency column; must be non-nullable `i64` |
/// | `read_only` | Excluded from INSERT and UPDATE |
/// | `editable` | Tri-state override of the simple-type scaffold rule |
/// | `ignore_select` / `ignore_insert` / `ignore_update` | Per-statement exclusion |
/// | `not_mapped` | Excluded from every statement |
/// | `required` | Key columns: caller supplies the value, no identity retrieval |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// Logical field name on the Rust type.
    pub field: &'static str,

    /// Explicit column-name override, when declared.
    pub column: Option<&'static str>,

    /// Static kind of the field's value type.
    pub kind: ValueKind,

    /// Whether the field type is `Option<T>`.
    pub nullable: bool,

    /// Key marker.
    pub key: bool,

    /// Version marker.
    pub version: bool,

    /// Read-only marker.
    pub read_only: bool,

    /// Editable override; `None` means "follow the simple-type rule".
    pub editable: Option<bool>,

    /// Exclude from SELECT lists.
    pub ignore_select: bool,

    /// Exclude from INSERT lists.
    pub ignore_insert: bool,

    /// Exclude from UPDATE set lists.
    pub ignore_update: bool,

    /// Exclude from every generated statement.
    pub not_mapped: bool,

    /// Caller always supplies this value on insert.
    pub required: bool
}

impl ColumnDescriptor {
    /// New descriptor with no roles set.
    #[must_use]
    pub const fn new(field: &'static str, kind: ValueKind) -> Self {
        Self {
            field,
            column: None,
            kind,
            nullable: false,
            key: false,
            version: false,
            read_only: false,
            editable: None,
            ignore_select: false,
            ignore_insert: false,
            ignore_update: false,
            not_mapped: false,
            required: false
        }
    }

    /// Whether an explicit column-name override was declared.
    ///
    /// When set, SELECT lists alias the column back to the field name so
    /// row mapping keeps working.
    #[must_use]
    pub const fn has_column_override(&self) -> bool {
        self.column.is_some()
    }

    /// The declared column name, falling back to the field name.
    #[must_use]
    pub const fn declared_name(&self) -> &'static str {
        match self.column {
            Some(name) => name,
            None => self.field
        }
    }
}

/// Immutable schema for one entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySchema {
    type_name: &'static str,
    table:     Option<&'static str>,
    columns:   Vec<ColumnDescriptor>
}

impl EntitySchema {
    /// Start building a schema for the named type.
    #[must_use]
    pub const fn builder(type_name: &'static str) -> SchemaBuilder {
        SchemaBuilder {
            schema: Self {
                type_name,
                table: None,
                columns: Vec::new()
            }
        }
    }

    /// Bare name of the Rust type.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Declared table-name override, if any.
    #[must_use]
    pub const fn table(&self) -> Option<&'static str> {
        self.table
    }

    /// All declared columns, in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// Find a column by field name, case-insensitively.
    #[must_use]
    pub fn column(&self, field: &str) -> Option<&ColumnDescriptor> {
        self.columns
            .iter()
            .find(|c| c.field.eq_ignore_ascii_case(field))
    }
}

/// Declarative registration builder for [`EntitySchema`].
///
/// Role methods apply to the most recently added column:
///
/// ```rust
/// use handsql_core::{EntitySchema, ValueKind};
///
/// let schema = EntitySchema::builder("User")
///     .table("Users")
///     .column("id", ValueKind::I32).key()
///     .column("last_name", ValueKind::Text).column_name("LastName")
///     .finish();
/// assert_eq!(schema.columns().len(), 2);
/// ```
#[derive(Debug)]
pub struct SchemaBuilder {
    schema: EntitySchema
}

impl SchemaBuilder {
    /// Declare the table name.
    #[must_use]
    pub fn table(mut self, table: &'static str) -> Self {
        self.schema.table = Some(table);
        self
    }

    /// Add a column for a field of the given kind.
    #[must_use]
    pub fn column(mut self, field: &'static str, kind: ValueKind) -> Self {
        self.schema.columns.push(ColumnDescriptor::new(field, kind));
        self
    }

    fn last(&mut self) -> &mut ColumnDescriptor {
        // Role methods before the first column() are a programming error in
        // schema-building code, caught immediately.
        self.schema
            .columns
            .last_mut()
            .expect("role method called before column()")
    }

    /// Mark the current column as (part of) the key.
    #[must_use]
    pub fn key(mut self) -> Self {
        self.last().key = true;
        self
    }

    /// Mark the current column as the version column.
    #[must_use]
    pub fn version(mut self) -> Self {
        self.last().version = true;
        self
    }

    /// Mark the current column read-only.
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.last().read_only = true;
        self
    }

    /// Override the simple-type scaffold rule for the current column.
    #[must_use]
    pub fn editable(mut self, editable: bool) -> Self {
        self.last().editable = Some(editable);
        self
    }

    /// Declare an explicit column name for the current column.
    #[must_use]
    pub fn column_name(mut self, name: &'static str) -> Self {
        self.last().column = Some(name);
        self
    }

    /// Mark the current column nullable (`Option<T>` field).
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.last().nullable = true;
        self
    }

    /// Exclude the current column from SELECT lists.
    #[must_use]
    pub fn ignore_select(mut self) -> Self {
        self.last().ignore_select = true;
        self
    }

    /// Exclude the current column from INSERT lists.
    #[must_use]
    pub fn ignore_insert(mut self) -> Self {
        self.last().ignore_insert = true;
        self
    }

    /// Exclude the current column from UPDATE set lists.
    #[must_use]
    pub fn ignore_update(mut self) -> Self {
        self.last().ignore_update = true;
        self
    }

    /// Exclude the current column from every statement.
    #[must_use]
    pub fn not_mapped(mut self) -> Self {
        self.last().not_mapped = true;
        self
    }

    /// Mark the current column as caller-supplied on insert.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.last().required = true;
        self
    }

    /// Finish building.
    #[must_use]
    pub fn finish(self) -> EntitySchema {
        self.schema
    }
}

/// A mapped record type.
///
/// Implemented by `#[derive(Entity)]` or by hand alongside a
/// [`SchemaBuilder`] registration. The contract ties the runtime entity to
/// its schema descriptor:
///
/// - `schema()` returns the process-lifetime descriptor (build it once,
///   e.g. behind a `OnceLock`);
/// - `value_of` reads one field as a [`Value`] for parameter binding
///   (unknown fields return [`Value::Null`]);
/// - `from_row` materializes an instance from an executor row, looking
///   columns up by field name;
/// - `set_key` writes a generated or database-assigned key back into the
///   (single) key field.
pub trait Entity: Sized + Send + Sync + 'static {
    /// The schema descriptor for this type.
    fn schema() -> &'static EntitySchema;

    /// Read one field as a bindable value.
    fn value_of(&self, field: &str) -> Value;

    /// Materialize an instance from a result row.
    fn from_row(row: &Row) -> Result<Self, StatementError>;

    /// Write a generated key back into the key field.
    fn set_key(&mut self, value: Value) -> Result<(), StatementError>;
}

/// Type-safe reference to a field of `E`, for ordered queries.
///
/// Tokens are produced at schema-build time (the derive emits one inherent
/// const per mapped field), so they never carry free text and bypass the
/// ORDER BY allow-list.
pub struct FieldToken<E: ?Sized> {
    field:   &'static str,
    _entity: PhantomData<fn() -> E>
}

impl<E: ?Sized> FieldToken<E> {
    /// Create a token for a field name.
    #[must_use]
    pub const fn new(field: &'static str) -> Self {
        Self {
            field,
            _entity: PhantomData
        }
    }

    /// The referenced field name.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }
}

impl<E: ?Sized> Clone for FieldToken<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: ?Sized> Copy for FieldToken<E> {}

impl<E: ?Sized> std::fmt::Debug for FieldToken<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("FieldToken").field(&self.field).finish()
    }
}
