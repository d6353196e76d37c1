use crate::db::{in_clause, open_read_only};
use crate::QueryError;
use rusqlite::params_from_iter;
use rusqlite::types::Value;
use std::collections::BTreeSet;
use std::path::Path;

pub fn list_states(db: &Path) -> Result<Vec<String>, QueryError> {
    let conn = open_read_only(db)?;
    let mut stmt = conn
        .prepare(
            "SELECT DISTINCT state FROM climate_agri WHERE state IS NOT NULL
             UNION
             SELECT DISTINCT state FROM kcc_telangana WHERE state IS NOT NULL
             ORDER BY state",
        )
        .map_err(|e| QueryError(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(|e| QueryError(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| QueryError(e.to_string()))?;
    Ok(rows)
}

/// Districts whose row's state is in `states`, computed independently
/// against each table and unioned. An empty filter returns every known
/// district.
pub fn list_districts(db: &Path, states: &[String]) -> Result<Vec<String>, QueryError> {
    let conn = open_read_only(db)?;
    let (sql, params) = if states.is_empty() {
        (
            "SELECT DISTINCT district FROM climate_agri WHERE district IS NOT NULL
             UNION
             SELECT DISTINCT district FROM kcc_telangana WHERE district IS NOT NULL
             ORDER BY district"
                .to_string(),
            Vec::new(),
        )
    } else {
        let clause = in_clause("state", states.len());
        let sql = format!(
            "SELECT DISTINCT district FROM climate_agri
               WHERE district IS NOT NULL AND {clause}
             UNION
             SELECT DISTINCT district FROM kcc_telangana
               WHERE district IS NOT NULL AND {clause}
             ORDER BY district"
        );
        let mut params: Vec<Value> = Vec::with_capacity(states.len() * 2);
        params.extend(states.iter().cloned().map(Value::Text));
        params.extend(states.iter().cloned().map(Value::Text));
        (sql, params)
    };

    let mut stmt = conn.prepare(&sql).map_err(|e| QueryError(e.to_string()))?;
    let rows = stmt
        .query_map(params_from_iter(params.iter()), |row| {
            row.get::<_, String>(0)
        })
        .map_err(|e| QueryError(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| QueryError(e.to_string()))?;
    Ok(rows)
}

/// Distinct advisory query texts for keyword pickers. Entries that differ
/// only by case or surrounding whitespace collapse to one, keeping the
/// first-seen trimmed spelling; output is sorted.
pub fn list_keywords(db: &Path) -> Result<Vec<String>, QueryError> {
    let conn = open_read_only(db)?;
    let mut stmt = conn
        .prepare("SELECT query FROM kcc_telangana WHERE query IS NOT NULL ORDER BY rowid")
        .map_err(|e| QueryError(e.to_string()))?;
    let raw = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(|e| QueryError(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| QueryError(e.to_string()))?;
    Ok(dedupe_keywords(raw))
}

pub(crate) fn dedupe_keywords(raw: Vec<String>) -> Vec<String> {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut out = Vec::new();
    for value in raw {
        let trimmed = value.trim();
        if seen.insert(trimmed.to_lowercase()) {
            out.push(trimmed.to_string());
        }
    }
    out.sort();
    out
}
