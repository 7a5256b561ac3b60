// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity and field attribute parsing.
//!
//! Struct-level attributes are parsed with darling; the `#[column(...)]`
//! field attribute is walked manually with `parse_nested_meta`, mirroring
//! the flag style of the runtime's `ColumnDescriptor`.

use darling::{FromDeriveInput, ast::Data, util::Ignored};
use syn::{Attribute, DeriveInput, Field, Ident, LitBool, LitStr, Meta, Type, Visibility};

use super::kind::{self, FieldKind};

/// Struct-level attributes parsed from `#[entity(...)]`.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(entity), supports(struct_named))]
struct EntityAttrs {
    ident: Ident,
    vis:   Visibility,
    data:  Data<Ignored, Field>,

    /// Table-name override. Defaults to the bare type name at resolution
    /// time, so the attribute itself is optional.
    #[darling(default)]
    table: Option<String>
}

/// Complete parsed entity definition.
#[derive(Debug)]
pub struct EntityDef {
    ident:  Ident,
    vis:    Visibility,
    table:  Option<String>,
    fields: Vec<FieldDef>
}

impl EntityDef {
    /// Parse an entity definition from derive input.
    pub fn from_derive_input(input: &DeriveInput) -> darling::Result<Self> {
        let attrs = EntityAttrs::from_derive_input(input)?;
        let struct_fields = attrs
            .data
            .take_struct()
            .expect("struct_named is enforced by darling")
            .fields;

        let fields = struct_fields
            .iter()
            .map(FieldDef::from_field)
            .collect::<darling::Result<Vec<_>>>()?;

        Ok(Self {
            ident: attrs.ident,
            vis: attrs.vis,
            table: attrs.table,
            fields
        })
    }

    /// Struct identifier.
    pub const fn name(&self) -> &Ident {
        &self.ident
    }

    /// Struct name as a string.
    pub fn name_str(&self) -> String {
        self.ident.to_string()
    }

    /// Struct visibility, reused for generated token constants.
    pub const fn vis(&self) -> &Visibility {
        &self.vis
    }

    /// Declared table name, if any.
    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    /// All fields in declaration order.
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// The field a generated `set_key` writes into: the first explicit key,
    /// else a field literally named `id` (case-insensitive).
    pub fn key_field(&self) -> Option<&FieldDef> {
        self.fields
            .iter()
            .find(|f| f.key)
            .or_else(|| {
                self.fields
                    .iter()
                    .find(|f| f.name_str().eq_ignore_ascii_case("id"))
            })
    }
}

/// Field definition with all parsed attributes.
#[derive(Debug)]
pub struct FieldDef {
    /// Field identifier.
    pub ident: Ident,

    /// Field type.
    pub ty: Type,

    /// Inferred value kind.
    pub kind: FieldKind,

    /// Whether the type is `Option<T>`.
    pub nullable: bool,

    /// Explicit column name from `name = "..."`.
    pub column_name: Option<String>,

    /// Key marker.
    pub key: bool,

    /// Version marker.
    pub version: bool,

    /// Read-only marker.
    pub read_only: bool,

    /// Required-on-insert marker.
    pub required: bool,

    /// Editable override.
    pub editable: Option<bool>,

    /// Exclude from SELECT.
    pub ignore_select: bool,

    /// Exclude from INSERT.
    pub ignore_insert: bool,

    /// Exclude from UPDATE.
    pub ignore_update: bool,

    /// Exclude from everything.
    pub not_mapped: bool
}

impl FieldDef {
    /// Parse one named field.
    pub fn from_field(field: &Field) -> darling::Result<Self> {
        let ident = field.ident.clone().expect("named field required");
        let ty = field.ty.clone();
        let (kind, nullable) = kind::infer(&ty);

        let mut def = Self {
            ident,
            ty,
            kind,
            nullable,
            column_name: None,
            key: false,
            version: false,
            read_only: false,
            required: false,
            editable: None,
            ignore_select: false,
            ignore_insert: false,
            ignore_update: false,
            not_mapped: false
        };

        for attr in &field.attrs {
            if attr.path().is_ident("column") {
                def.parse_column_attr(attr)?;
            }
        }

        Ok(def)
    }

    /// Parse `#[column(key, version, name = "...", ignore(...), ...)]`.
    ///
    /// Unknown identifiers are silently ignored for forward compatibility.
    fn parse_column_attr(&mut self, attr: &Attribute) -> darling::Result<()> {
        if !matches!(attr.meta, Meta::List(_)) {
            return Ok(());
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("key") {
                self.key = true;
            } else if meta.path.is_ident("version") {
                self.version = true;
            } else if meta.path.is_ident("readonly") {
                self.read_only = true;
            } else if meta.path.is_ident("required") {
                self.required = true;
            } else if meta.path.is_ident("not_mapped") {
                self.not_mapped = true;
            } else if meta.path.is_ident("editable") {
                let lit: LitBool = meta.value()?.parse()?;
                self.editable = Some(lit.value());
            } else if meta.path.is_ident("name") {
                let lit: LitStr = meta.value()?.parse()?;
                self.column_name = Some(lit.value());
            } else if meta.path.is_ident("ignore") {
                meta.parse_nested_meta(|inner| {
                    if inner.path.is_ident("select") {
                        self.ignore_select = true;
                    } else if inner.path.is_ident("insert") {
                        self.ignore_insert = true;
                    } else if inner.path.is_ident("update") {
                        self.ignore_update = true;
                    }
                    Ok(())
                })?;
            }
            Ok(())
        })
        .map_err(darling::Error::from)
    }

    /// Field identifier.
    pub const fn name(&self) -> &Ident {
        &self.ident
    }

    /// Field name as a string.
    pub fn name_str(&self) -> String {
        self.ident.to_string()
    }

    /// Whether the field can be read into / out of a runtime `Value`.
    ///
    /// Follows the scaffold rule: simple kinds participate unless
    /// editable-false; `Other` kinds participate only with editable-true
    /// (the type must then convert to and from `Value`).
    pub fn is_representable(&self) -> bool {
        match self.editable {
            Some(editable) => editable,
            None => self.kind.is_simple()
        }
    }

    /// Whether generated SELECTs return this field.
    ///
    /// Mirrors the runtime select classification so `from_row` defaults
    /// fields the statement never fetches.
    pub fn in_select(&self) -> bool {
        self.is_representable() && !self.ignore_select && !self.not_mapped
    }
}
