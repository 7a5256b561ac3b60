// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `Entity::schema` generation.
//!
//! Expands to a `SchemaBuilder` chain behind a `OnceLock`, so the
//! descriptor is built once per process and every later call is a cache
//! hit.

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::{EntityDef, FieldDef};

/// Generate the `schema()` method.
pub fn generate(entity: &EntityDef) -> TokenStream {
    let type_name = entity.name_str();
    let table_call = entity.table().map(|table| quote! { .table(#table) });
    let columns: Vec<TokenStream> = entity.fields().iter().map(column_calls).collect();

    quote! {
        fn schema() -> &'static handsql_core::EntitySchema {
            static SCHEMA: std::sync::OnceLock<handsql_core::EntitySchema> =
                std::sync::OnceLock::new();
            SCHEMA.get_or_init(|| {
                handsql_core::EntitySchema::builder(#type_name)
                    #table_call
                    #(#columns)*
                    .finish()
            })
        }
    }
}

/// Builder calls for one column: `.column(...)` plus its role modifiers.
fn column_calls(field: &FieldDef) -> TokenStream {
    let name = field.name_str();
    let kind = field.kind.tokens();
    let mut calls = quote! { .column(#name, #kind) };

    if field.nullable {
        calls.extend(quote! { .nullable() });
    }
    if let Some(column) = &field.column_name {
        calls.extend(quote! { .column_name(#column) });
    }
    if field.key {
        calls.extend(quote! { .key() });
    }
    if field.version {
        calls.extend(quote! { .version() });
    }
    if field.read_only {
        calls.extend(quote! { .read_only() });
    }
    if field.required {
        calls.extend(quote! { .required() });
    }
    if let Some(editable) = field.editable {
        calls.extend(quote! { .editable(#editable) });
    }
    if field.ignore_select {
        calls.extend(quote! { .ignore_select() });
    }
    if field.ignore_insert {
        calls.extend(quote! { .ignore_insert() });
    }
    if field.ignore_update {
        calls.extend(quote! { .ignore_update() });
    }
    if field.not_mapped {
        calls.extend(quote! { .not_mapped() });
    }

    calls
}
