// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Typed ORDER BY field-token generation.
//!
//! One inherent `FieldToken` constant per mapped field, named in upper
//! snake case (`last_name` → `User::LAST_NAME`). Tokens resolve straight
//! to columns at query time and bypass the free-text allow-list.

use convert_case::{Case, Casing};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::parse::EntityDef;

/// Generate the inherent impl with one token constant per mapped field.
pub fn generate(entity: &EntityDef) -> TokenStream {
    let name = entity.name();
    let vis = entity.vis();

    let consts: Vec<TokenStream> = entity
        .fields()
        .iter()
        .filter(|field| field.is_representable() && !field.not_mapped)
        .map(|field| {
            let name_str = field.name_str();
            let const_ident = format_ident!("{}", name_str.to_case(Case::UpperSnake));
            let doc = format!("Typed ORDER BY token for `{}`.", name_str);
            quote! {
                #[doc = #doc]
                #vis const #const_ident: handsql_core::FieldToken<Self> =
                    handsql_core::FieldToken::new(#name_str);
            }
        })
        .collect();

    if consts.is_empty() {
        return TokenStream::new();
    }

    quote! {
        #[automatically_derived]
        impl #name {
            #(#consts)*
        }
    }
}
