// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity derive orchestration.
//!
//! Parses the annotated struct into [`parse::EntityDef`], then generates
//! the `Entity` trait implementation and the typed field-token constants.

pub mod kind;
pub mod parse;
pub mod schema;
pub mod tokens;
pub mod values;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

use self::parse::EntityDef;

/// Main entry point for the Entity derive macro.
pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match generate(&input) {
        Ok(generated) => generated.into(),
        Err(err) => err.write_errors().into()
    }
}

/// Generate the full expansion for one entity struct.
fn generate(input: &DeriveInput) -> darling::Result<TokenStream2> {
    let entity = EntityDef::from_derive_input(input)?;

    let schema_impl = schema::generate(&entity);
    let value_of_impl = values::value_of(&entity);
    let from_row_impl = values::from_row(&entity);
    let set_key_impl = values::set_key(&entity);
    let token_consts = tokens::generate(&entity);

    let name = entity.name();

    Ok(quote! {
        #[automatically_derived]
        impl handsql_core::Entity for #name {
            #schema_impl
            #value_of_impl
            #from_row_impl
            #set_key_impl
        }

        #token_consts
    })
}
