use crate::tabular::{cell, optional_text, parse_required_int, TabularFile};
use crate::IngestError;
use krishi_model::AdvisoryRecord;

pub const STATE_COLUMN: &str = "StateName";
pub const DISTRICT_COLUMN: &str = "DistrictName";
pub const QUERY_COLUMN: &str = "QueryText";
pub const RESPONSE_COLUMN: &str = "KccAns";
pub const YEAR_COLUMN: &str = "year";
pub const MONTH_COLUMN: &str = "month";

/// Source row order is preserved; the keyword lookup's first-seen dedup rule
/// depends on it.
pub fn parse_advisory_table(table: &TabularFile) -> Result<Vec<AdvisoryRecord>, IngestError> {
    let state_idx = table.require_column(STATE_COLUMN)?;
    let district_idx = table.require_column(DISTRICT_COLUMN)?;
    let query_idx = table.require_column(QUERY_COLUMN)?;
    let response_idx = table.require_column(RESPONSE_COLUMN)?;
    let year_idx = table.require_column(YEAR_COLUMN)?;
    let month_idx = table.require_column(MONTH_COLUMN)?;

    let mut out = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        out.push(AdvisoryRecord {
            state: optional_text(row, state_idx),
            district: optional_text(row, district_idx),
            query: cell(row, query_idx).to_string(),
            response: cell(row, response_idx).to_string(),
            year: parse_required_int(cell(row, year_idx), "advisory year")?,
            month: optional_text(row, month_idx),
        });
    }
    Ok(out)
}
