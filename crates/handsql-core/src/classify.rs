// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Property classification: which columns participate in which statement.
//!
//! [`EntityMeta`] is the classified view of an [`EntitySchema`]: the
//! scaffoldable column set filtered per statement kind, plus resolved key
//! and version columns. It is computed lazily on first use per type and
//! cached for the process lifetime — schema shape does not change at
//! runtime. The classification is dialect-independent.
//!
//! # Classification rules
//!
//! - **Scaffold**: simple-kind columns plus editable-true overrides, minus
//!   editable-false.
//! - **Select**: scaffold minus ignore-select and not-mapped.
//! - **Insert**: scaffold minus ignore-insert, not-mapped, read-only;
//!   minus identity-kind keys unless required; minus the legacy rule that
//!   also skips any field literally named `id` (case-insensitive) of
//!   non-UUID kind that is not marked required, even when it was never
//!   declared a key. That last rule exists to avoid inserting into
//!   auto-increment primary keys that were not formally declared; it can
//!   surprise schemas with a non-key client-populated column genuinely
//!   named `Id` — mark such a column `required` to opt out.
//! - **Update**: scaffold minus fields named `id`/`version`
//!   (case-insensitive), key/version/read-only roles, ignore-update, and
//!   not-mapped.
//!
//! Declaration errors (duplicate version markers, wrong version type) are
//! raised here, on first resolution, and are never cached as successes.

use std::{
    any::TypeId,
    collections::HashMap,
    sync::{Arc, RwLock}
};

use crate::{
    error::StatementError,
    schema::{ColumnDescriptor, Entity, EntitySchema},
    value::ValueKind
};

/// Classified, cached metadata for one entity type.
#[derive(Debug)]
pub struct EntityMeta {
    type_id:   TypeId,
    schema:    &'static EntitySchema,
    scaffold:  Vec<usize>,
    select:    Vec<usize>,
    insert:    Vec<usize>,
    update:    Vec<usize>,
    keys:      Vec<usize>,
    version:   Option<usize>
}

impl EntityMeta {
    /// Classified metadata for `E`, cached per type.
    ///
    /// Concurrent first calls may classify twice; the first writer wins and
    /// later results are discarded.
    pub fn resolve<E: Entity>() -> Result<Arc<Self>, StatementError> {
        let type_id = TypeId::of::<E>();
        if let Some(meta) = cached(type_id) {
            return Ok(meta);
        }
        let meta = Arc::new(Self::classify(type_id, E::schema())?);
        Ok(store(type_id, meta))
    }

    fn classify(
        type_id: TypeId,
        schema: &'static EntitySchema
    ) -> Result<Self, StatementError> {
        let columns = schema.columns();

        let scaffold: Vec<usize> = columns
            .iter()
            .enumerate()
            .filter(|(_, c)| match c.editable {
                Some(editable) => editable,
                None => c.kind.is_simple()
            })
            .map(|(i, _)| i)
            .collect();

        let select: Vec<usize> = scaffold
            .iter()
            .copied()
            .filter(|&i| !columns[i].ignore_select && !columns[i].not_mapped)
            .collect();

        let insert: Vec<usize> = scaffold
            .iter()
            .copied()
            .filter(|&i| {
                let c = &columns[i];
                if c.ignore_insert || c.not_mapped || c.read_only {
                    return false;
                }
                if c.key && c.kind.is_identity_key() && !c.required {
                    return false;
                }
                // Legacy fallback: a bare `Id` of non-UUID kind is assumed
                // to be an auto-increment primary key.
                if c.field.eq_ignore_ascii_case("id")
                    && c.kind != ValueKind::Uuid
                    && !c.required
                {
                    return false;
                }
                true
            })
            .collect();

        let update: Vec<usize> = scaffold
            .iter()
            .copied()
            .filter(|&i| {
                let c = &columns[i];
                !c.field.eq_ignore_ascii_case("id")
                    && !c.field.eq_ignore_ascii_case("version")
                    && !c.key
                    && !c.version
                    && !c.read_only
                    && !c.ignore_update
                    && !c.not_mapped
            })
            .collect();

        let keys = resolve_keys(columns);
        let version = resolve_version(schema)?;

        Ok(Self {
            type_id,
            schema,
            scaffold,
            select,
            insert,
            update,
            keys,
            version
        })
    }

    /// The `TypeId` of the entity type, for dialect-dependent cache keys.
    #[must_use]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The underlying schema descriptor.
    #[must_use]
    pub const fn schema(&self) -> &'static EntitySchema {
        self.schema
    }

    fn pick(&self, indices: &[usize]) -> Vec<&'static ColumnDescriptor> {
        indices.iter().map(|&i| &self.schema.columns()[i]).collect()
    }

    /// All scaffoldable columns, in declaration order.
    #[must_use]
    pub fn scaffold_columns(&self) -> Vec<&'static ColumnDescriptor> {
        self.pick(&self.scaffold)
    }

    /// SELECT-eligible columns.
    #[must_use]
    pub fn select_columns(&self) -> Vec<&'static ColumnDescriptor> {
        self.pick(&self.select)
    }

    /// INSERT-eligible columns.
    #[must_use]
    pub fn insert_columns(&self) -> Vec<&'static ColumnDescriptor> {
        self.pick(&self.insert)
    }

    /// UPDATE-eligible columns.
    #[must_use]
    pub fn update_columns(&self) -> Vec<&'static ColumnDescriptor> {
        self.pick(&self.update)
    }

    /// Key columns in declaration order; empty when none resolve.
    #[must_use]
    pub fn key_columns(&self) -> Vec<&'static ColumnDescriptor> {
        self.pick(&self.keys)
    }

    /// Key columns, or the hard error every keyed operation raises.
    pub fn require_keys(&self) -> Result<Vec<&'static ColumnDescriptor>, StatementError> {
        let keys = self.key_columns();
        if keys.is_empty() {
            return Err(StatementError::MissingKey {
                entity: self.schema.type_name()
            });
        }
        Ok(keys)
    }

    /// The resolved version column, if one exists.
    #[must_use]
    pub fn version_column(&self) -> Option<&'static ColumnDescriptor> {
        self.version.map(|i| &self.schema.columns()[i])
    }
}

/// Explicitly marked keys in declaration order, else an `id`-named field.
fn resolve_keys(columns: &[ColumnDescriptor]) -> Vec<usize> {
    let explicit: Vec<usize> = columns
        .iter()
        .enumerate()
        .filter(|(_, c)| c.key)
        .map(|(i, _)| i)
        .collect();
    if !explicit.is_empty() {
        return explicit;
    }
    columns
        .iter()
        .position(|c| c.field.eq_ignore_ascii_case("id"))
        .into_iter()
        .collect()
}

/// Explicitly marked version column, else a `version`-named field.
///
/// More than one marker, a nullable field, or any kind other than `i64` is
/// a declaration error.
fn resolve_version(schema: &EntitySchema) -> Result<Option<usize>, StatementError> {
    let columns = schema.columns();
    let marked: Vec<usize> = columns
        .iter()
        .enumerate()
        .filter(|(_, c)| c.version)
        .map(|(i, _)| i)
        .collect();

    let index = match marked.len() {
        0 => columns
            .iter()
            .position(|c| c.field.eq_ignore_ascii_case("version")),
        1 => Some(marked[0]),
        _ => {
            return Err(StatementError::DuplicateVersion {
                entity: schema.type_name()
            });
        }
    };

    if let Some(i) = index {
        let column = &columns[i];
        if column.kind != ValueKind::I64 || column.nullable {
            return Err(StatementError::VersionType {
                entity: schema.type_name(),
                field:  column.field
            });
        }
    }
    Ok(index)
}

static META: RwLock<Option<HashMap<TypeId, Arc<EntityMeta>>>> = RwLock::new(None);

fn cached(type_id: TypeId) -> Option<Arc<EntityMeta>> {
    META.read()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .as_ref()
        .and_then(|map| map.get(&type_id).cloned())
}

fn store(type_id: TypeId, meta: Arc<EntityMeta>) -> Arc<EntityMeta> {
    let mut guard = META
        .write()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    let map = guard.get_or_insert_with(HashMap::new);
    map.entry(type_id).or_insert(meta).clone()
}
