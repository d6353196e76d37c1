// SPDX-License-Identifier: Apache-2.0

use crate::QueryError;
use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags};
use std::path::Path;

/// Every operation opens its own read-only connection, runs one statement,
/// and drops the connection on return.
pub(crate) fn open_read_only(path: &Path) -> Result<Connection, QueryError> {
    Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .map_err(|e| QueryError(format!("failed to open store {}: {e}", path.display())))
}

/// `column IN (?, ?, ...)` with one placeholder per value. Values always
/// travel as bound parameters, never spliced into the SQL text.
#[must_use]
pub(crate) fn in_clause(column: &str, len: usize) -> String {
    let placeholders = vec!["?"; len].join(", ");
    format!("{column} IN ({placeholders})")
}

pub(crate) fn push_text_filter(
    where_parts: &mut Vec<String>,
    params: &mut Vec<Value>,
    column: &str,
    values: &[String],
) {
    if values.is_empty() {
        return;
    }
    where_parts.push(in_clause(column, values.len()));
    params.extend(values.iter().cloned().map(Value::Text));
}

pub(crate) fn push_year_filter(
    where_parts: &mut Vec<String>,
    params: &mut Vec<Value>,
    column: &str,
    years: &[i64],
) {
    if years.is_empty() {
        return;
    }
    where_parts.push(in_clause(column, years.len()));
    params.extend(years.iter().copied().map(Value::Integer));
}

pub(crate) fn append_where(sql: &mut String, where_parts: &[String]) {
    if !where_parts.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&where_parts.join(" AND "));
    }
}
