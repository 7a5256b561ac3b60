// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Paging template expansion.
//!
//! Dialect paging templates are plain text with named placeholders; this
//! module fills them. Placeholder values are either builder-rendered
//! fragments or formatted integers — the page arithmetic
//! (`{Offset}` = `(page - 1) * rows`) happens here so MySQL-style
//! templates get a precomputed offset.

/// Fragments and numbers substituted into a paging template.
#[derive(Debug, Clone)]
pub(crate) struct PageParts<'a> {
    /// Rendered SELECT column list.
    pub select_columns: &'a str,
    /// Quoted table name.
    pub table_name:     &'a str,
    /// Rendered WHERE clause, empty when unfiltered.
    pub where_clause:   &'a str,
    /// Validated ORDER BY fragment.
    pub order_by:       &'a str,
    /// 1-based page number.
    pub page_number:    i64,
    /// Page size.
    pub rows_per_page:  i64
}

/// Fill a dialect paging template.
pub(crate) fn fill(template: &str, parts: &PageParts<'_>) -> String {
    let offset = (parts.page_number - 1) * parts.rows_per_page;
    template
        .replace("{SelectColumns}", parts.select_columns)
        .replace("{TableName}", parts.table_name)
        .replace("{WhereClause}", parts.where_clause)
        .replace("{OrderBy}", parts.order_by)
        .replace("{PageNumber}", &parts.page_number.to_string())
        .replace("{RowsPerPage}", &parts.rows_per_page.to_string())
        .replace("{Offset}", &offset.to_string())
}
