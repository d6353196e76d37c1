use crate::db::{append_where, open_read_only, push_text_filter};
use crate::QueryError;
use krishi_model::AdvisoryRecord;
use rusqlite::params_from_iter;
use rusqlite::types::Value;
use std::path::Path;

/// Full advisory records matching every supplied filter. `keywords` matches
/// the `query` column by exact stored value. Zero matches is a normal empty
/// result.
pub fn advisory_search(
    db: &Path,
    states: &[String],
    districts: &[String],
    keywords: &[String],
) -> Result<Vec<AdvisoryRecord>, QueryError> {
    let conn = open_read_only(db)?;
    let mut sql =
        "SELECT state, district, query, response, year, month FROM kcc_telangana".to_string();
    let mut where_parts: Vec<String> = Vec::new();
    let mut params: Vec<Value> = Vec::new();
    push_text_filter(&mut where_parts, &mut params, "state", states);
    push_text_filter(&mut where_parts, &mut params, "district", districts);
    push_text_filter(&mut where_parts, &mut params, "query", keywords);
    append_where(&mut sql, &where_parts);

    let mut stmt = conn.prepare(&sql).map_err(|e| QueryError(e.to_string()))?;
    let rows = stmt
        .query_map(params_from_iter(params.iter()), |row| {
            Ok(AdvisoryRecord {
                state: row.get(0)?,
                district: row.get(1)?,
                query: row.get(2)?,
                response: row.get(3)?,
                year: row.get(4)?,
                month: row.get(5)?,
            })
        })
        .map_err(|e| QueryError(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| QueryError(e.to_string()))?;
    Ok(rows)
}
