// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! The CRUD repository surface.
//!
//! [`Repository`] wraps an [`Executor`] and exposes the generated-SQL
//! operations. Each call is stateless: it snapshots the active dialect
//! profile, resolves the entity's classified metadata (cached), renders
//! the statement, logs it, and delegates execution. Nothing here blocks on
//! I/O except the executor call itself, and nothing is retried — executor
//! errors propagate unchanged.
//!
//! # Insert key handling
//!
//! The single key column's kind decides the insert flow:
//!
//! - **UUID** — a nil/empty value is replaced with a client-generated
//!   sequential identifier before the statement is built; a caller-supplied
//!   value is never overwritten.
//! - **Text** — the caller must supply a non-empty value; rejected
//!   otherwise.
//! - **Numeric** (identity) — the column is omitted from the statement and
//!   the dialect's identity-retrieval query runs in the same round-trip;
//!   the returned scalar is written back through `set_key`. A key marked
//!   `required` skips all of this and inserts the caller's value.

use tracing::debug;

use crate::{
    builder,
    classify::EntityMeta,
    dialect::{self, DialectProfile},
    error::{RepositoryError, StatementError},
    executor::Executor,
    keygen,
    orderby::{self, OrderBy},
    paging::{self, PageParts},
    query::{Key, Where},
    schema::Entity,
    statement::{Parameter, Statement},
    value::{FromValue, Value, ValueKind}
};

/// Convention-driven CRUD repository over an executor.
pub struct Repository<X> {
    executor: X
}

type Outcome<T, X> = Result<T, RepositoryError<<X as Executor>::Error>>;

impl<X: Executor> Repository<X> {
    /// Wrap an executor.
    pub const fn new(executor: X) -> Self {
        Self {
            executor
        }
    }

    /// The wrapped executor, for transactions and hand-written queries.
    pub const fn executor(&self) -> &X {
        &self.executor
    }

    /// Fetch one record by key.
    pub async fn get<E: Entity>(&self, key: impl Into<Key>) -> Outcome<Option<E>, X> {
        let meta = EntityMeta::resolve::<E>()?;
        let profile = dialect::active_profile();
        let (predicate, parameters) = builder::key_predicate(&meta, &profile, &key.into())?;

        let sql = format!(
            "SELECT {} FROM {} WHERE {}",
            builder::select_list(&meta, &profile),
            builder::table(&meta, &profile),
            predicate
        );
        let statement = Statement::new(sql, parameters);
        debug!(target: "handsql", sql = %statement, "get");

        let rows = self
            .executor
            .fetch(&statement)
            .await
            .map_err(RepositoryError::Database)?;
        match rows.first() {
            Some(row) => Ok(Some(E::from_row(row)?)),
            None => Ok(None)
        }
    }

    /// Fetch records matching a filter, optionally ordered.
    pub async fn list<E: Entity>(
        &self,
        filter: Where,
        order: Option<OrderBy<E>>
    ) -> Outcome<Vec<E>, X> {
        let meta = EntityMeta::resolve::<E>()?;
        let profile = dialect::active_profile();
        let (where_clause, parameters) = render_where(&meta, &profile, &filter)?;

        let mut sql = format!(
            "SELECT {} FROM {}",
            builder::select_list(&meta, &profile),
            builder::table(&meta, &profile)
        );
        if !where_clause.is_empty() {
            sql.push(' ');
            sql.push_str(&where_clause);
        }
        if let Some(order) = &order {
            sql.push_str(" ORDER BY ");
            sql.push_str(&orderby::render(&meta, &profile, order)?);
        }
        let statement = Statement::new(sql, parameters);
        debug!(target: "handsql", sql = %statement, "list");

        let rows = self
            .executor
            .fetch(&statement)
            .await
            .map_err(RepositoryError::Database)?;
        rows.iter()
            .map(|row| E::from_row(row).map_err(RepositoryError::from))
            .collect()
    }

    /// Fetch every record of the type.
    pub async fn list_all<E: Entity>(&self) -> Outcome<Vec<E>, X> {
        self.list(Where::All, None::<OrderBy<E>>).await
    }

    /// Fetch one page of records.
    ///
    /// Page numbers are 1-based. With no ordering supplied, rows are
    /// ordered by the first key column — paging without a stable order
    /// would hand back nondeterministic pages.
    pub async fn list_paged<E: Entity>(
        &self,
        page_number: i64,
        rows_per_page: i64,
        filter: Where,
        order: Option<OrderBy<E>>
    ) -> Outcome<Vec<E>, X> {
        if page_number < 1 {
            return Err(StatementError::PageNumber {
                page: page_number
            }
            .into());
        }

        let meta = EntityMeta::resolve::<E>()?;
        let profile = dialect::active_profile();
        let template = profile
            .paging_template()
            .ok_or(StatementError::PagingUnsupported {
                dialect: profile.dialect()
            })?;

        let (where_clause, parameters) = render_where(&meta, &profile, &filter)?;
        let order_by = match &order {
            Some(order) => orderby::render(&meta, &profile, order)?,
            None => orderby::default_order(&meta, &profile)?
        };

        let sql = paging::fill(
            template,
            &PageParts {
                select_columns: &builder::select_list(&meta, &profile),
                table_name:     &builder::table(&meta, &profile),
                where_clause:   &where_clause,
                order_by:       &order_by,
                page_number,
                rows_per_page
            }
        );
        let statement = Statement::new(sql, parameters);
        debug!(target: "handsql", sql = %statement, page_number, "list_paged");

        let rows = self
            .executor
            .fetch(&statement)
            .await
            .map_err(RepositoryError::Database)?;
        rows.iter()
            .map(|row| E::from_row(row).map_err(RepositoryError::from))
            .collect()
    }

    /// Insert a record and return its key value.
    ///
    /// Generated keys (client-side UUIDs and database identities) are also
    /// written back into the entity.
    pub async fn insert<E: Entity>(&self, entity: &mut E) -> Outcome<Value, X> {
        let meta = EntityMeta::resolve::<E>()?;
        let profile = dialect::active_profile();
        let keys = meta.require_keys()?;

        let mut identity_insert = false;
        let mut key_value = Value::Null;

        if keys.len() == 1 {
            let key = keys[0];
            match key.kind {
                ValueKind::Uuid => {
                    let current = entity.value_of(key.field);
                    if current.is_empty_key() {
                        let generated = Value::Uuid(keygen::sequential_uuid());
                        entity.set_key(generated.clone())?;
                        key_value = generated;
                    } else {
                        key_value = current;
                    }
                }
                ValueKind::Text => {
                    let current = entity.value_of(key.field);
                    if current.is_empty_key() {
                        return Err(StatementError::MissingStringKey {
                            entity: meta.schema().type_name(),
                            field:  key.field
                        }
                        .into());
                    }
                    key_value = current;
                }
                _ if key.required => {
                    key_value = entity.value_of(key.field);
                }
                _ => {
                    identity_insert = true;
                }
            }
        }

        let mut sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            builder::table(&meta, &profile),
            builder::insert_columns(&meta, &profile),
            builder::insert_placeholders(&meta)
        );
        let parameters = builder::insert_parameters(&meta, entity);

        if identity_insert {
            let identity_sql =
                profile
                    .identity_sql()
                    .ok_or(StatementError::IdentityUnsupported {
                        dialect: profile.dialect()
                    })?;
            sql.push_str("; ");
            sql.push_str(identity_sql);

            let statement = Statement::new(sql, parameters);
            debug!(target: "handsql", sql = %statement, "insert");

            let scalar = self
                .executor
                .fetch_scalar(&statement)
                .await
                .map_err(RepositoryError::Database)?;
            let generated = scalar.ok_or(StatementError::MissingColumn {
                column: "identity".to_string()
            })?;
            entity.set_key(generated.clone())?;
            return Ok(generated);
        }

        let statement = Statement::new(sql, parameters);
        debug!(target: "handsql", sql = %statement, "insert");
        self.executor
            .execute(&statement)
            .await
            .map_err(RepositoryError::Database)?;
        Ok(key_value)
    }

    /// Update a record by its key; returns the affected-row count.
    ///
    /// When a version column resolves, the statement increments it and
    /// restricts the WHERE clause to the entity's current version — a
    /// concurrent writer makes the update affect zero rows instead of
    /// silently clobbering.
    pub async fn update<E: Entity>(&self, entity: &E) -> Outcome<u64, X> {
        let meta = EntityMeta::resolve::<E>()?;
        let profile = dialect::active_profile();

        let mut set_list = builder::update_set_list(&meta, &profile);
        let (mut predicate, key_parameters) =
            builder::entity_key_predicate(&meta, &profile, entity)?;
        let mut parameters = builder::update_parameters(&meta, entity);
        parameters.extend(key_parameters);

        if let Some(version) = meta.version_column() {
            let quoted = profile.encapsulate(&crate::resolve::column_name(
                meta.type_id(),
                meta.schema(),
                version
            ));
            set_list.push_str(&format!(", {} = @{} + 1", quoted, version.field));
            predicate.push_str(&format!(" AND {} = @{}", quoted, version.field));
            parameters.push(Parameter::new(version.field, entity.value_of(version.field)));
        }

        let sql = format!(
            "UPDATE {} SET {} WHERE {}",
            builder::table(&meta, &profile),
            set_list,
            predicate
        );
        let statement = Statement::new(sql, parameters);
        debug!(target: "handsql", sql = %statement, "update");

        self.executor
            .execute(&statement)
            .await
            .map_err(RepositoryError::Database)
    }

    /// Delete a record by its key values; returns the affected-row count.
    pub async fn delete<E: Entity>(&self, entity: &E) -> Outcome<u64, X> {
        let meta = EntityMeta::resolve::<E>()?;
        let profile = dialect::active_profile();
        let (predicate, parameters) = builder::entity_key_predicate(&meta, &profile, entity)?;
        self.delete_with(&meta, &profile, predicate, parameters).await
    }

    /// Delete by an explicit key; returns the affected-row count.
    pub async fn delete_by_key<E: Entity>(&self, key: impl Into<Key>) -> Outcome<u64, X> {
        let meta = EntityMeta::resolve::<E>()?;
        let profile = dialect::active_profile();
        let (predicate, parameters) = builder::key_predicate(&meta, &profile, &key.into())?;
        self.delete_with(&meta, &profile, predicate, parameters).await
    }

    async fn delete_with(
        &self,
        meta: &EntityMeta,
        profile: &DialectProfile,
        predicate: String,
        parameters: Vec<Parameter>
    ) -> Outcome<u64, X> {
        let sql = format!(
            "DELETE FROM {} WHERE {}",
            builder::table(meta, profile),
            predicate
        );
        let statement = Statement::new(sql, parameters);
        debug!(target: "handsql", sql = %statement, "delete");

        self.executor
            .execute(&statement)
            .await
            .map_err(RepositoryError::Database)
    }

    /// Delete every record matching a filter; returns the affected count.
    pub async fn delete_where<E: Entity>(&self, filter: Where) -> Outcome<u64, X> {
        let meta = EntityMeta::resolve::<E>()?;
        let profile = dialect::active_profile();
        let (where_clause, parameters) = render_where(&meta, &profile, &filter)?;

        let mut sql = format!("DELETE FROM {}", builder::table(&meta, &profile));
        if !where_clause.is_empty() {
            sql.push(' ');
            sql.push_str(&where_clause);
        }
        let statement = Statement::new(sql, parameters);
        debug!(target: "handsql", sql = %statement, "delete_where");

        self.executor
            .execute(&statement)
            .await
            .map_err(RepositoryError::Database)
    }

    /// Count records matching a filter.
    pub async fn count<E: Entity>(&self, filter: Where) -> Outcome<i64, X> {
        let meta = EntityMeta::resolve::<E>()?;
        let profile = dialect::active_profile();
        let (where_clause, parameters) = render_where(&meta, &profile, &filter)?;

        let mut sql = format!("SELECT COUNT(*) FROM {}", builder::table(&meta, &profile));
        if !where_clause.is_empty() {
            sql.push(' ');
            sql.push_str(&where_clause);
        }
        let statement = Statement::new(sql, parameters);
        debug!(target: "handsql", sql = %statement, "count");

        let scalar = self
            .executor
            .fetch_scalar(&statement)
            .await
            .map_err(RepositoryError::Database)?;
        match scalar {
            Some(value) => Ok(i64::from_value(&value)?),
            None => Ok(0)
        }
    }
}

/// Render a [`Where`] source into clause text plus bindings.
///
/// The clause includes its `WHERE` keyword; an unrestricted source renders
/// empty text.
fn render_where(
    meta: &EntityMeta,
    profile: &DialectProfile,
    filter: &Where
) -> Result<(String, Vec<Parameter>), StatementError> {
    match filter {
        Where::All => Ok((String::new(), Vec::new())),
        Where::Filter(filter) if filter.is_empty() => Ok((String::new(), Vec::new())),
        Where::Filter(filter) => {
            let (predicate, parameters) = builder::filter_predicate(meta, profile, filter)?;
            Ok((format!("WHERE {}", predicate), parameters))
        }
        Where::Raw(fragment, parameters) => Ok((fragment.clone(), parameters.clone()))
    }
}
