// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Table and column name resolution.
//!
//! Resolution is convention-first: a declared override wins, otherwise the
//! bare type/field name is used. Both hooks are pluggable process-wide for
//! schemas with their own naming conventions (snake-case tables, prefixed
//! columns, …).
//!
//! Resolved names are cached for the process lifetime — resolving the same
//! type twice never re-invokes the strategy. Installing a new resolver
//! clears the affected cache. Quoting is *not* part of resolution; it is
//! applied by the active profile at render time.

use std::{
    any::TypeId,
    collections::HashMap,
    sync::{Arc, RwLock}
};

use crate::schema::{ColumnDescriptor, EntitySchema};

/// Strategy mapping an entity schema to its table name.
pub trait TableNameResolver: Send + Sync {
    /// Resolve the (unquoted, possibly schema-qualified) table name.
    fn resolve(&self, schema: &EntitySchema) -> String;
}

/// Strategy mapping a column descriptor to its column name.
pub trait ColumnNameResolver: Send + Sync {
    /// Resolve the unquoted column name.
    fn resolve(&self, schema: &EntitySchema, column: &ColumnDescriptor) -> String;
}

/// Default strategy: declared override, else the bare name.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConventionResolver;

impl TableNameResolver for ConventionResolver {
    fn resolve(&self, schema: &EntitySchema) -> String {
        schema
            .table()
            .map_or_else(|| schema.type_name().to_string(), str::to_string)
    }
}

impl ColumnNameResolver for ConventionResolver {
    fn resolve(&self, _schema: &EntitySchema, column: &ColumnDescriptor) -> String {
        column.declared_name().to_string()
    }
}

struct ResolverState {
    table_resolver:  Option<Arc<dyn TableNameResolver>>,
    column_resolver: Option<Arc<dyn ColumnNameResolver>>,
    tables:          HashMap<TypeId, String>,
    columns:         HashMap<(TypeId, &'static str), String>
}

static STATE: RwLock<Option<ResolverState>> = RwLock::new(None);

fn read_state<T>(f: impl FnOnce(&ResolverState) -> Option<T>) -> Option<T> {
    let guard = STATE
        .read()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    guard.as_ref().and_then(f)
}

fn with_state<T>(f: impl FnOnce(&mut ResolverState) -> T) -> T {
    let mut guard = STATE
        .write()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    let state = guard.get_or_insert_with(|| ResolverState {
        table_resolver:  None,
        column_resolver: None,
        tables:          HashMap::new(),
        columns:         HashMap::new()
    });
    f(state)
}

/// Install a custom table-name strategy and drop cached table names.
pub fn set_table_name_resolver(resolver: Arc<dyn TableNameResolver>) {
    with_state(|state| {
        state.table_resolver = Some(resolver);
        state.tables.clear();
    });
}

/// Install a custom column-name strategy and drop cached column names.
pub fn set_column_name_resolver(resolver: Arc<dyn ColumnNameResolver>) {
    with_state(|state| {
        state.column_resolver = Some(resolver);
        state.columns.clear();
    });
}

/// Resolve (and cache) the table name for a type.
pub(crate) fn table_name(type_id: TypeId, schema: &EntitySchema) -> String {
    if let Some(cached) = read_state(|state| state.tables.get(&type_id).cloned()) {
        return cached;
    }
    with_state(|state| {
        // First-writer-wins: a concurrent resolver may have filled the slot
        // between the read and write lock.
        if let Some(cached) = state.tables.get(&type_id) {
            return cached.clone();
        }
        let resolved = match &state.table_resolver {
            Some(resolver) => resolver.resolve(schema),
            None => TableNameResolver::resolve(&ConventionResolver, schema)
        };
        state.tables.insert(type_id, resolved.clone());
        resolved
    })
}

/// Resolve (and cache) the column name for a field.
pub(crate) fn column_name(
    type_id: TypeId,
    schema: &EntitySchema,
    column: &ColumnDescriptor
) -> String {
    let key = (type_id, column.field);
    if let Some(cached) = read_state(|state| state.columns.get(&key).cloned()) {
        return cached;
    }
    with_state(|state| {
        if let Some(cached) = state.columns.get(&key) {
            return cached.clone();
        }
        let resolved = match &state.column_resolver {
            Some(resolver) => resolver.resolve(schema, column),
            None => ColumnNameResolver::resolve(&ConventionResolver, schema, column)
        };
        state.columns.insert(key, resolved.clone());
        resolved
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::value::ValueKind;

    fn sample_schema() -> EntitySchema {
        EntitySchema::builder("CacheProbe")
            .table("Probes")
            .column("id", ValueKind::I32)
            .column("name", ValueKind::Text)
            .finish()
    }

    #[test]
    fn convention_prefers_declared_names() {
        let schema = sample_schema();
        let resolver = ConventionResolver;
        assert_eq!(TableNameResolver::resolve(&resolver, &schema), "Probes");

        let bare = EntitySchema::builder("CacheProbe")
            .column("id", ValueKind::I32)
            .finish();
        assert_eq!(TableNameResolver::resolve(&resolver, &bare), "CacheProbe");
    }

    #[test]
    fn convention_column_falls_back_to_field() {
        let schema = sample_schema();
        let resolver = ConventionResolver;
        assert_eq!(
            ColumnNameResolver::resolve(&resolver, &schema, &schema.columns()[1]),
            "name"
        );
    }

    // Delegates to the convention for everything except one probe type so
    // concurrently running tests keep their default resolution.
    struct CountingResolver {
        calls: AtomicUsize
    }

    impl TableNameResolver for CountingResolver {
        fn resolve(&self, schema: &EntitySchema) -> String {
            if schema.type_name() == "CountProbe" {
                self.calls.fetch_add(1, Ordering::SeqCst);
                return "Counted".to_string();
            }
            TableNameResolver::resolve(&ConventionResolver, schema)
        }
    }

    #[test]
    fn table_resolution_is_cached() {
        struct CountProbeMarker;
        let schema = EntitySchema::builder("CountProbe")
            .column("id", ValueKind::I32)
            .finish();

        let resolver = Arc::new(CountingResolver {
            calls: AtomicUsize::new(0)
        });
        set_table_name_resolver(resolver.clone());

        let type_id = TypeId::of::<CountProbeMarker>();
        let first = table_name(type_id, &schema);
        let second = table_name(type_id, &schema);

        assert_eq!(first, "Counted");
        assert_eq!(first, second);
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 1);
    }
}
