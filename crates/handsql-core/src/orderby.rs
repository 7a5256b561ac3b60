// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! ORDER BY validation and rendering.
//!
//! Free-text ORDER BY input is the single place where caller-supplied text
//! reaches raw SQL, so it is validated against an allow-list built from the
//! entity's SELECT-eligible columns. Unknown identifiers and directions are
//! rejected, never ignored. Typed specifications built from
//! [`FieldToken`]s skip the allow-list — they cannot carry free text.
//!
//! The allow-list maps are cached per (type, dialect) because the rendered
//! side bakes in dialect quoting; [`clear_allowed_maps`] is called on every
//! dialect switch so a stale-dialect rendering is never served.

use std::{
    any::TypeId,
    collections::HashMap,
    sync::{Arc, RwLock}
};

use crate::{
    classify::EntityMeta,
    dialect::{Dialect, DialectProfile},
    error::StatementError,
    resolve,
    schema::FieldToken
};

/// Sort direction for ordered queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Ascending order (A-Z, 0-9, oldest first).
    #[default]
    Asc,

    /// Descending order (Z-A, 9-0, newest first).
    Desc
}

impl SortDirection {
    /// Convert to SQL keyword.
    #[must_use]
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC"
        }
    }
}

/// Ordering specification for list and paged queries.
#[derive(Debug, Clone)]
pub enum OrderBy<E: ?Sized> {
    /// Free-text, comma-separated list (`"LastName ASC, Age DESC"`).
    /// Validated against the allow-list before rendering.
    Text(String),

    /// Typed specification; resolved directly from field tokens.
    Fields(Vec<(FieldToken<E>, SortDirection)>)
}

impl<E: ?Sized> OrderBy<E> {
    /// Free-text ordering.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Single-field typed ordering.
    #[must_use]
    pub fn field(token: FieldToken<E>, direction: SortDirection) -> Self {
        Self::Fields(vec![(token, direction)])
    }

    /// Multi-field typed ordering, left-to-right precedence.
    #[must_use]
    pub fn fields(terms: Vec<(FieldToken<E>, SortDirection)>) -> Self {
        Self::Fields(terms)
    }
}

type AllowedMap = HashMap<String, String>;

static MAPS: RwLock<Option<HashMap<(TypeId, Dialect), Arc<AllowedMap>>>> = RwLock::new(None);

/// Drop every cached allow-list map. Called on dialect switch.
pub(crate) fn clear_allowed_maps() {
    let mut guard = MAPS
        .write()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    if let Some(map) = guard.as_mut() {
        map.clear();
    }
}

/// Allow-list for the entity under the given profile, cached.
///
/// Keys are normalized (lower-cased) column *and* field names; values are
/// the quoted column rendering to embed.
fn allowed_map(meta: &EntityMeta, profile: &DialectProfile) -> Arc<AllowedMap> {
    let cache_key = (meta.type_id(), profile.dialect());
    {
        let guard = MAPS
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(cached) = guard.as_ref().and_then(|m| m.get(&cache_key)) {
            return cached.clone();
        }
    }

    let mut map = AllowedMap::new();
    for column in meta.select_columns() {
        let resolved = resolve::column_name(meta.type_id(), meta.schema(), column);
        let rendered = profile.encapsulate(&resolved);
        map.insert(resolved.to_lowercase(), rendered.clone());
        map.insert(column.field.to_lowercase(), rendered);
    }
    let map = Arc::new(map);

    let mut guard = MAPS
        .write()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    guard
        .get_or_insert_with(HashMap::new)
        .entry(cache_key)
        .or_insert(map)
        .clone()
}

/// Strip one layer of quoting, a leading qualifier, and case.
fn normalize(identifier: &str) -> String {
    let trimmed = identifier.trim();
    let unquoted = strip_quotes(trimmed);
    let unqualified = unquoted.rsplit('.').next().unwrap_or(unquoted);
    unqualified.to_lowercase()
}

fn strip_quotes(identifier: &str) -> &str {
    let stripped = identifier
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .or_else(|| {
            identifier
                .strip_prefix('"')
                .and_then(|rest| rest.strip_suffix('"'))
        })
        .or_else(|| {
            identifier
                .strip_prefix('`')
                .and_then(|rest| rest.strip_suffix('`'))
        });
    stripped.unwrap_or(identifier)
}

/// Validate a free-text ORDER BY list against the allow-list.
///
/// Returns the safe rendering (`"LastName" ASC, "Age" DESC`). Every token
/// must name a selectable column; directions default to `ASC` and must
/// otherwise be exactly `ASC` or `DESC`, case-insensitively.
fn validate_text(
    text: &str,
    allowed: &AllowedMap
) -> Result<String, StatementError> {
    let mut rendered = Vec::new();

    for token in text.split(',') {
        let mut parts = token.split_whitespace();
        let identifier = parts.next().ok_or_else(|| StatementError::OrderByColumn {
            token: token.trim().to_string()
        })?;

        let column = allowed.get(&normalize(identifier)).ok_or_else(|| {
            StatementError::OrderByColumn {
                token: identifier.to_string()
            }
        })?;

        let direction = match parts.next() {
            None => SortDirection::Asc,
            Some(word) if word.eq_ignore_ascii_case("ASC") => SortDirection::Asc,
            Some(word) if word.eq_ignore_ascii_case("DESC") => SortDirection::Desc,
            Some(word) => {
                return Err(StatementError::OrderByDirection {
                    token: word.to_string()
                });
            }
        };

        // Anything after the direction is not part of a column reference.
        if let Some(extra) = parts.next() {
            return Err(StatementError::OrderByDirection {
                token: extra.to_string()
            });
        }

        rendered.push(format!("{} {}", column, direction.as_sql()));
    }

    Ok(rendered.join(", "))
}

/// Render an ordering specification for the entity.
pub(crate) fn render<E: ?Sized>(
    meta: &EntityMeta,
    profile: &DialectProfile,
    order: &OrderBy<E>
) -> Result<String, StatementError> {
    match order {
        OrderBy::Text(text) => validate_text(text, &allowed_map(meta, profile)),
        OrderBy::Fields(terms) => {
            let mut rendered = Vec::with_capacity(terms.len());
            for (token, direction) in terms {
                let column = meta.schema().column(token.field()).ok_or_else(|| {
                    StatementError::UnknownField {
                        entity: meta.schema().type_name(),
                        field:  token.field().to_string()
                    }
                })?;
                let resolved = resolve::column_name(meta.type_id(), meta.schema(), column);
                rendered.push(format!(
                    "{} {}",
                    profile.encapsulate(&resolved),
                    direction.as_sql()
                ));
            }
            Ok(rendered.join(", "))
        }
    }
}

/// Default ordering: the first key column, ascending.
pub(crate) fn default_order(
    meta: &EntityMeta,
    profile: &DialectProfile
) -> Result<String, StatementError> {
    let keys = meta.require_keys()?;
    let resolved = resolve::column_name(meta.type_id(), meta.schema(), keys[0]);
    Ok(profile.encapsulate(&resolved))
}
