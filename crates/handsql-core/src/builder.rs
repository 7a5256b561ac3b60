// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! SQL fragment rendering.
//!
//! Pure string building over already-classified columns and an explicit
//! dialect profile. Every identifier comes from the resolver and is quoted
//! here; every placeholder is `@field` for a field name the schema owns.
//! Nothing in this module ever embeds caller-supplied text.

use crate::{
    classify::EntityMeta,
    dialect::DialectProfile,
    error::StatementError,
    query::{Filter, Key},
    resolve,
    schema::{ColumnDescriptor, Entity},
    statement::Parameter,
    value::Value
};

/// Quoted, resolved column name for one descriptor.
fn quoted(meta: &EntityMeta, profile: &DialectProfile, column: &ColumnDescriptor) -> String {
    let resolved = resolve::column_name(meta.type_id(), meta.schema(), column);
    profile.encapsulate(&resolved)
}

/// Quoted table name for the entity.
pub(crate) fn table(meta: &EntityMeta, profile: &DialectProfile) -> String {
    let resolved = resolve::table_name(meta.type_id(), meta.schema());
    profile.encapsulate_qualified(&resolved)
}

/// Comma-joined SELECT list.
///
/// Columns whose resolved name differs from the field name are aliased
/// back (`"LastName" AS "last_name"`) so row mapping finds them under the
/// field name.
pub(crate) fn select_list(meta: &EntityMeta, profile: &DialectProfile) -> String {
    meta.select_columns()
        .iter()
        .map(|column| {
            let rendered = quoted(meta, profile, column);
            let resolved = resolve::column_name(meta.type_id(), meta.schema(), column);
            if resolved == column.field {
                rendered
            } else {
                format!("{} AS {}", rendered, profile.encapsulate(column.field))
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// ` AND `-joined equality predicate for a validated filter.
///
/// Null-valued entries render `IS NULL` and bind nothing; the rest render
/// `column = @field` with one binding each.
pub(crate) fn filter_predicate(
    meta: &EntityMeta,
    profile: &DialectProfile,
    filter: &Filter
) -> Result<(String, Vec<Parameter>), StatementError> {
    let mut fragments = Vec::with_capacity(filter.entries().len());
    let mut parameters = Vec::new();

    for (field, value) in filter.entries() {
        let column = meta.schema().column(field).ok_or_else(|| {
            StatementError::UnknownField {
                entity: meta.schema().type_name(),
                field:  field.clone()
            }
        })?;
        let rendered = quoted(meta, profile, column);
        if value.is_null() {
            fragments.push(format!("{} IS NULL", rendered));
        } else {
            fragments.push(format!("{} = @{}", rendered, column.field));
            parameters.push(Parameter::new(column.field, value.clone()));
        }
    }

    Ok((fragments.join(" AND "), parameters))
}

/// Key predicate plus bindings from an explicit [`Key`] argument.
///
/// A single value must match exactly one declared key column; composite
/// values are matched to key columns by field name, and every key column
/// must be covered — a partial composite never silently matches more rows
/// than intended.
pub(crate) fn key_predicate(
    meta: &EntityMeta,
    profile: &DialectProfile,
    key: &Key
) -> Result<(String, Vec<Parameter>), StatementError> {
    let key_columns = meta.require_keys()?;
    let entity = meta.schema().type_name();

    let pairs: Vec<(&'static ColumnDescriptor, Value)> = match key {
        Key::Single(value) => {
            if key_columns.len() != 1 {
                return Err(StatementError::KeyArity {
                    entity,
                    expected: key_columns.len(),
                    supplied: 1
                });
            }
            vec![(key_columns[0], value.clone())]
        }
        Key::Composite(parts) => {
            if parts.len() != key_columns.len() {
                return Err(StatementError::KeyArity {
                    entity,
                    expected: key_columns.len(),
                    supplied: parts.len()
                });
            }
            key_columns
                .iter()
                .map(|column| {
                    parts
                        .iter()
                        .find(|(name, _)| name.eq_ignore_ascii_case(column.field))
                        .map(|(_, value)| (*column, value.clone()))
                        .ok_or_else(|| StatementError::UnknownField {
                            entity,
                            field: column.field.to_string()
                        })
                })
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    Ok(render_pairs(meta, profile, &pairs))
}

/// Key predicate plus bindings read from an entity instance.
pub(crate) fn entity_key_predicate<E: Entity>(
    meta: &EntityMeta,
    profile: &DialectProfile,
    entity: &E
) -> Result<(String, Vec<Parameter>), StatementError> {
    let pairs: Vec<(&'static ColumnDescriptor, Value)> = meta
        .require_keys()?
        .into_iter()
        .map(|column| (column, entity.value_of(column.field)))
        .collect();
    Ok(render_pairs(meta, profile, &pairs))
}

fn render_pairs(
    meta: &EntityMeta,
    profile: &DialectProfile,
    pairs: &[(&'static ColumnDescriptor, Value)]
) -> (String, Vec<Parameter>) {
    let mut fragments = Vec::with_capacity(pairs.len());
    let mut parameters = Vec::with_capacity(pairs.len());
    for (column, value) in pairs {
        fragments.push(format!("{} = @{}", quoted(meta, profile, column), column.field));
        parameters.push(Parameter::new(column.field, value.clone()));
    }
    (fragments.join(" AND "), parameters)
}

/// Comma-joined, quoted INSERT column list.
pub(crate) fn insert_columns(meta: &EntityMeta, profile: &DialectProfile) -> String {
    meta.insert_columns()
        .iter()
        .map(|column| quoted(meta, profile, column))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Comma-joined `@field` placeholders, positionally aligned with
/// [`insert_columns`].
pub(crate) fn insert_placeholders(meta: &EntityMeta) -> String {
    meta.insert_columns()
        .iter()
        .map(|column| format!("@{}", column.field))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Bindings for the INSERT-eligible columns, read from the entity.
pub(crate) fn insert_parameters<E: Entity>(meta: &EntityMeta, entity: &E) -> Vec<Parameter> {
    meta.insert_columns()
        .iter()
        .map(|column| Parameter::new(column.field, entity.value_of(column.field)))
        .collect()
}

/// Comma-joined `column = @field` UPDATE set list.
pub(crate) fn update_set_list(meta: &EntityMeta, profile: &DialectProfile) -> String {
    meta.update_columns()
        .iter()
        .map(|column| format!("{} = @{}", quoted(meta, profile, column), column.field))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Bindings for the UPDATE-eligible columns, read from the entity.
pub(crate) fn update_parameters<E: Entity>(meta: &EntityMeta, entity: &E) -> Vec<Parameter> {
    meta.update_columns()
        .iter()
        .map(|column| Parameter::new(column.field, entity.value_of(column.field)))
        .collect()
}
