// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `value_of`, `from_row`, and `set_key` generation.
//!
//! Only representable fields get a `value_of` arm and a `try_get` in
//! `from_row`; everything else binds as NULL and materializes as
//! `Default::default()`, which keeps non-mapped domain fields (caches,
//! computed state) out of the SQL surface without extra bounds on their
//! types beyond `Default`.

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::EntityDef;

/// Generate the `value_of()` method.
pub fn value_of(entity: &EntityDef) -> TokenStream {
    let arms: Vec<TokenStream> = entity
        .fields()
        .iter()
        .filter(|field| field.is_representable())
        .map(|field| {
            let name = field.name();
            let name_str = field.name_str();
            quote! { #name_str => self.#name.clone().into(), }
        })
        .collect();

    quote! {
        #[allow(clippy::clone_on_copy)]
        fn value_of(&self, field: &str) -> handsql_core::Value {
            match field {
                #(#arms)*
                _ => handsql_core::Value::Null
            }
        }
    }
}

/// Generate the `from_row()` method.
pub fn from_row(entity: &EntityDef) -> TokenStream {
    let assigns: Vec<TokenStream> = entity
        .fields()
        .iter()
        .map(|field| {
            let name = field.name();
            if field.in_select() {
                let name_str = field.name_str();
                quote! { #name: row.try_get(#name_str)?, }
            } else {
                quote! { #name: ::core::default::Default::default(), }
            }
        })
        .collect();

    quote! {
        fn from_row(
            row: &handsql_core::Row
        ) -> Result<Self, handsql_core::StatementError> {
            Ok(Self {
                #(#assigns)*
            })
        }
    }
}

/// Generate the `set_key()` method.
///
/// Writes into the first explicit key field, falling back to a field named
/// `id`. Entities with no key field get a body that reports the missing
/// key, matching the runtime's declaration-error semantics.
pub fn set_key(entity: &EntityDef) -> TokenStream {
    let key = entity.key_field().filter(|field| field.is_representable());

    match key {
        Some(field) => {
            let name = field.name();
            quote! {
                fn set_key(
                    &mut self,
                    value: handsql_core::Value
                ) -> Result<(), handsql_core::StatementError> {
                    self.#name = handsql_core::FromValue::from_value(&value)?;
                    Ok(())
                }
            }
        }
        None => {
            let type_name = entity.name_str();
            quote! {
                fn set_key(
                    &mut self,
                    _value: handsql_core::Value
                ) -> Result<(), handsql_core::StatementError> {
                    Err(handsql_core::StatementError::MissingKey {
                        entity: #type_name
                    })
                }
            }
        }
    }
}
