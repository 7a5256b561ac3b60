// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field type to value-kind inference.
//!
//! Maps a field's Rust type to the `handsql_core::ValueKind` recorded in
//! the schema descriptor. Detection is by the last path segment, the same
//! heuristic the rest of the ecosystem uses for `Option` — a custom type
//! that happens to be named `Uuid` will be misclassified, and can opt out
//! with `editable = false`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{GenericArgument, PathArguments, Type};

/// Inferred kind of a field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// `bool`
    Bool,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `f32`
    F32,
    /// `f64`
    F64,
    /// `String`
    Text,
    /// `char`
    Char,
    /// `Vec<u8>`
    Bytes,
    /// `uuid::Uuid`
    Uuid,
    /// `chrono::DateTime<Utc>`
    DateTime,
    /// `chrono::NaiveDate`
    Date,
    /// `chrono::NaiveTime`
    Time,
    /// Anything else; scaffolded only via `editable = true`.
    Other
}

impl FieldKind {
    /// Check membership in the simple (auto-scaffoldable) set.
    pub const fn is_simple(self) -> bool {
        !matches!(self, Self::Other)
    }

    /// The `handsql_core::ValueKind` path for generated code.
    pub fn tokens(self) -> TokenStream {
        match self {
            Self::Bool => quote! { handsql_core::ValueKind::Bool },
            Self::I16 => quote! { handsql_core::ValueKind::I16 },
            Self::I32 => quote! { handsql_core::ValueKind::I32 },
            Self::I64 => quote! { handsql_core::ValueKind::I64 },
            Self::F32 => quote! { handsql_core::ValueKind::F32 },
            Self::F64 => quote! { handsql_core::ValueKind::F64 },
            Self::Text => quote! { handsql_core::ValueKind::Text },
            Self::Char => quote! { handsql_core::ValueKind::Char },
            Self::Bytes => quote! { handsql_core::ValueKind::Bytes },
            Self::Uuid => quote! { handsql_core::ValueKind::Uuid },
            Self::DateTime => quote! { handsql_core::ValueKind::DateTime },
            Self::Date => quote! { handsql_core::ValueKind::Date },
            Self::Time => quote! { handsql_core::ValueKind::Time },
            Self::Other => quote! { handsql_core::ValueKind::Other }
        }
    }
}

/// Infer the kind and nullability of a field type.
///
/// `Option<T>` marks the column nullable and classifies `T`.
pub fn infer(ty: &Type) -> (FieldKind, bool) {
    if let Some(inner) = option_inner(ty) {
        return (classify(inner), true);
    }
    (classify(ty), false)
}

fn classify(ty: &Type) -> FieldKind {
    let Type::Path(type_path) = ty else {
        return FieldKind::Other;
    };
    let Some(segment) = type_path.path.segments.last() else {
        return FieldKind::Other;
    };

    match segment.ident.to_string().as_str() {
        "bool" => FieldKind::Bool,
        "i16" => FieldKind::I16,
        "i32" => FieldKind::I32,
        "i64" => FieldKind::I64,
        "f32" => FieldKind::F32,
        "f64" => FieldKind::F64,
        "String" => FieldKind::Text,
        "char" => FieldKind::Char,
        "Uuid" => FieldKind::Uuid,
        "DateTime" => FieldKind::DateTime,
        "NaiveDate" => FieldKind::Date,
        "NaiveTime" => FieldKind::Time,
        "Vec" if first_argument_is(segment, "u8") => FieldKind::Bytes,
        _ => FieldKind::Other
    }
}

/// Extract `T` from `Option<T>`, by last path segment.
fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(inner) => Some(inner),
        _ => None
    })
}

fn first_argument_is(segment: &syn::PathSegment, ident: &str) -> bool {
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return false;
    };
    args.args.iter().any(|arg| match arg {
        GenericArgument::Type(Type::Path(p)) => {
            p.path.segments.last().is_some_and(|s| s.ident == ident)
        }
        _ => false
    })
}
