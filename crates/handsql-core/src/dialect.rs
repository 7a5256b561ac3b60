// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Dialect profiles: quoting, identity retrieval, and paging templates.
//!
//! A [`DialectProfile`] is an immutable bundle of the three things the six
//! supported databases disagree on:
//!
//! | Dialect | Quoting | Identity | Paging |
//! |---------|---------|----------|--------|
//! | SQL Server | `[X]` | `SCOPE_IDENTITY()` | `ROW_NUMBER()` window |
//! | PostgreSQL | `"X"` | `LASTVAL()` | `LIMIT/OFFSET` |
//! | SQLite | `"X"` | `LAST_INSERT_ROWID()` | `LIMIT/OFFSET` |
//! | MySQL | `` `X` `` | `LAST_INSERT_ID()` | `LIMIT offset,rows` |
//! | Oracle | `"X"` | unsupported | `OFFSET … FETCH NEXT` |
//! | DB2 | `"X"` | `IDENTITY_VAL_LOCAL()` | `OFFSET … FETCH NEXT` |
//!
//! Exactly one profile is active process-wide. [`set_active_dialect`]
//! publishes a new profile atomically and clears every dialect-dependent
//! cache; it is intended to be called once at startup, before statements
//! are built, though switching later is safe.

use std::sync::RwLock;

use crate::orderby;

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    /// Microsoft SQL Server.
    ///
    /// The default: unknown or unconfigured deployments get SQL Server
    /// quoting rules rather than an error.
    #[default]
    SqlServer,

    /// PostgreSQL.
    Postgres,

    /// SQLite.
    Sqlite,

    /// MySQL / MariaDB.
    MySql,

    /// Oracle Database.
    Oracle,

    /// IBM DB2.
    Db2
}

/// Immutable per-dialect configuration.
///
/// All fields are `'static` so the profile is `Copy`; readers snapshot it
/// once per operation and never observe a torn switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialectProfile {
    dialect:       Dialect,
    encapsulation: &'static str,
    identity_sql:  &'static str,
    paging:        &'static str
}

const SQL_SERVER: DialectProfile = DialectProfile {
    dialect:       Dialect::SqlServer,
    encapsulation: "[{}]",
    identity_sql:  "SELECT CAST(SCOPE_IDENTITY() AS BIGINT) AS [Id]",
    paging:        "SELECT * FROM (SELECT ROW_NUMBER() OVER(ORDER BY {OrderBy}) AS PagedNumber, \
                    {SelectColumns} FROM {TableName} {WhereClause}) AS u \
                    WHERE PagedNumber BETWEEN (({PageNumber}-1) * {RowsPerPage} + 1) \
                    AND ({PageNumber} * {RowsPerPage})"
};

const POSTGRES: DialectProfile = DialectProfile {
    dialect:       Dialect::Postgres,
    encapsulation: "\"{}\"",
    identity_sql:  "SELECT LASTVAL() AS id",
    paging:        "SELECT {SelectColumns} FROM {TableName} {WhereClause} ORDER BY {OrderBy} \
                    LIMIT {RowsPerPage} OFFSET (({PageNumber}-1) * {RowsPerPage})"
};

const SQLITE: DialectProfile = DialectProfile {
    dialect:       Dialect::Sqlite,
    encapsulation: "\"{}\"",
    identity_sql:  "SELECT LAST_INSERT_ROWID() AS id",
    paging:        "SELECT {SelectColumns} FROM {TableName} {WhereClause} ORDER BY {OrderBy} \
                    LIMIT {RowsPerPage} OFFSET (({PageNumber}-1) * {RowsPerPage})"
};

const MYSQL: DialectProfile = DialectProfile {
    dialect:       Dialect::MySql,
    encapsulation: "`{}`",
    identity_sql:  "SELECT LAST_INSERT_ID() AS id",
    paging:        "SELECT {SelectColumns} FROM {TableName} {WhereClause} ORDER BY {OrderBy} \
                    LIMIT {Offset},{RowsPerPage}"
};

const ORACLE: DialectProfile = DialectProfile {
    dialect:       Dialect::Oracle,
    encapsulation: "\"{}\"",
    identity_sql:  "",
    paging:        "SELECT {SelectColumns} FROM {TableName} {WhereClause} ORDER BY {OrderBy} \
                    OFFSET (({PageNumber}-1) * {RowsPerPage}) ROWS FETCH NEXT {RowsPerPage} ROWS ONLY"
};

const DB2: DialectProfile = DialectProfile {
    dialect:       Dialect::Db2,
    encapsulation: "\"{}\"",
    identity_sql:  "SELECT CAST(IDENTITY_VAL_LOCAL() AS BIGINT) AS \"id\" FROM SYSIBM.SYSDUMMY1",
    paging:        "SELECT {SelectColumns} FROM {TableName} {WhereClause} ORDER BY {OrderBy} \
                    OFFSET (({PageNumber}-1) * {RowsPerPage}) ROWS FETCH NEXT {RowsPerPage} ROWS ONLY"
};

impl DialectProfile {
    /// Profile for a dialect. Pure and total.
    #[must_use]
    pub const fn new(dialect: Dialect) -> Self {
        match dialect {
            Dialect::SqlServer => SQL_SERVER,
            Dialect::Postgres => POSTGRES,
            Dialect::Sqlite => SQLITE,
            Dialect::MySql => MYSQL,
            Dialect::Oracle => ORACLE,
            Dialect::Db2 => DB2
        }
    }

    /// The dialect this profile belongs to.
    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Quote an identifier with the dialect's bracket/quote form.
    ///
    /// Never cached: callers re-read the active profile per operation so a
    /// runtime dialect switch takes effect immediately.
    #[must_use]
    pub fn encapsulate(&self, identifier: &str) -> String {
        self.encapsulation.replacen("{}", identifier, 1)
    }

    /// Quote a possibly schema-qualified name part by part.
    ///
    /// `dbo.Users` becomes `[dbo].[Users]` under SQL Server rules.
    #[must_use]
    pub fn encapsulate_qualified(&self, name: &str) -> String {
        name.split('.')
            .map(|part| self.encapsulate(part))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Identity-retrieval statement, or `None` when unsupported.
    #[must_use]
    pub fn identity_sql(&self) -> Option<&'static str> {
        if self.identity_sql.is_empty() {
            None
        } else {
            Some(self.identity_sql)
        }
    }

    /// Paging template, or `None` when the dialect cannot page.
    #[must_use]
    pub fn paging_template(&self) -> Option<&'static str> {
        if self.paging.is_empty() {
            None
        } else {
            Some(self.paging)
        }
    }
}

impl Default for DialectProfile {
    fn default() -> Self {
        Self::new(Dialect::SqlServer)
    }
}

static ACTIVE: RwLock<DialectProfile> = RwLock::new(SQL_SERVER);

/// Snapshot the active profile.
///
/// The returned value is a copy; an operation works against one consistent
/// profile even if the dialect is switched mid-flight.
#[must_use]
pub fn active_profile() -> DialectProfile {
    *ACTIVE.read().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Switch the process-wide dialect.
///
/// Publishes the new profile atomically and clears the allowed-ORDER-BY
/// column maps, which bake in dialect quoting. Schema descriptors are
/// dialect-independent and survive the switch.
pub fn set_active_dialect(dialect: Dialect) {
    {
        let mut active = ACTIVE
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *active = DialectProfile::new(dialect);
    }
    orderby::clear_allowed_maps();
    tracing::debug!(target: "handsql", ?dialect, "active dialect switched");
}
