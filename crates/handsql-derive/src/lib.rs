// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! # handsql-derive
//!
//! Procedural macro implementing the `handsql_core::Entity` trait from an
//! annotated struct definition.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use handsql::Entity;
//!
//! #[derive(Entity)]
//! #[entity(table = "Users")]
//! pub struct User {
//!     #[column(key)]
//!     pub id: i32,
//!
//!     #[column(name = "LastName")]
//!     pub last_name: String,
//!
//!     pub age: i32,
//!
//!     #[column(ignore(select, insert))]
//!     pub password_hash: String,
//! }
//! ```
//!
//! Generates the schema descriptor, value accessors, row mapping, key
//! write-back, and one typed ORDER BY token per mapped field
//! (`User::LAST_NAME`).

mod entity;

use proc_macro::TokenStream;

/// Derive macro implementing `handsql_core::Entity`.
///
/// # Struct attribute
///
/// - `#[entity(table = "...")]` — table-name override; defaults to the
///   bare type name.
///
/// # Field attributes
///
/// All optional, combined inside one `#[column(...)]`:
///
/// - `key` — part of the unique identifier
/// - `version` — optimistic-concurrency column (`i64` required)
/// - `readonly` — excluded from INSERT and UPDATE
/// - `required` — caller always supplies the value on insert
/// - `editable = true|false` — override the simple-type scaffold rule
/// - `name = "..."` — explicit column name
/// - `ignore(select, insert, update)` — per-statement exclusion
/// - `not_mapped` — excluded from every statement
#[proc_macro_derive(Entity, attributes(entity, column))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    entity::derive(input)
}
