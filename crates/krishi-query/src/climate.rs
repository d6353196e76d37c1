use crate::db::{append_where, in_clause, open_read_only, push_text_filter, push_year_filter};
use crate::QueryError;
use krishi_model::{ClimateRecord, TrendPoint};
use rusqlite::params_from_iter;
use rusqlite::types::Value;
use std::path::Path;

/// Mean groundwater level over rows matching all supplied filters. Filters
/// are ANDed; an empty dimension is not applied. `None` means the filtered
/// set was empty or held only null levels, which is not the same as a mean
/// of zero.
pub fn average_groundwater(
    db: &Path,
    states: &[String],
    years: &[i64],
) -> Result<Option<f64>, QueryError> {
    let conn = open_read_only(db)?;
    let mut sql = "SELECT AVG(groundwater_level) FROM climate_agri".to_string();
    let mut where_parts: Vec<String> = Vec::new();
    let mut params: Vec<Value> = Vec::new();
    push_text_filter(&mut where_parts, &mut params, "state", states);
    push_year_filter(&mut where_parts, &mut params, "year", years);
    append_where(&mut sql, &where_parts);

    conn.query_row(&sql, params_from_iter(params.iter()), |row| {
        row.get::<_, Option<f64>>(0)
    })
    .map_err(|e| QueryError(e.to_string()))
}

pub fn cyclone_rows(db: &Path, years: &[i64]) -> Result<Vec<ClimateRecord>, QueryError> {
    let conn = open_read_only(db)?;
    let mut sql = "SELECT state, district, year, groundwater_level, \
                   cyclonic_disturbances, cyclones, severe_cyclones FROM climate_agri"
        .to_string();
    let mut where_parts: Vec<String> = Vec::new();
    let mut params: Vec<Value> = Vec::new();
    push_year_filter(&mut where_parts, &mut params, "year", years);
    append_where(&mut sql, &where_parts);

    let mut stmt = conn.prepare(&sql).map_err(|e| QueryError(e.to_string()))?;
    let rows = stmt
        .query_map(params_from_iter(params.iter()), |row| {
            Ok(ClimateRecord {
                state: row.get(0)?,
                district: row.get(1)?,
                year: row.get(2)?,
                groundwater_level: row.get(3)?,
                cyclonic_disturbances: row.get(4)?,
                cyclones: row.get(5)?,
                severe_cyclones: row.get(6)?,
            })
        })
        .map_err(|e| QueryError(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| QueryError(e.to_string()))?;
    Ok(rows)
}

/// (district, year, level) triples for exactly the given districts, grouped
/// by district and ascending in year within each group.
pub fn groundwater_trend(db: &Path, districts: &[String]) -> Result<Vec<TrendPoint>, QueryError> {
    if districts.is_empty() {
        return Err(QueryError(
            "groundwater trend requires at least one district".to_string(),
        ));
    }
    let conn = open_read_only(db)?;
    let clause = in_clause("district", districts.len());
    let sql = format!(
        "SELECT district, year, groundwater_level FROM climate_agri
         WHERE {clause}
         ORDER BY district, year"
    );
    let params: Vec<Value> = districts.iter().cloned().map(Value::Text).collect();

    let mut stmt = conn.prepare(&sql).map_err(|e| QueryError(e.to_string()))?;
    let rows = stmt
        .query_map(params_from_iter(params.iter()), |row| {
            Ok(TrendPoint {
                district: row.get(0)?,
                year: row.get(1)?,
                groundwater_level: row.get(2)?,
            })
        })
        .map_err(|e| QueryError(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| QueryError(e.to_string()))?;
    Ok(rows)
}
