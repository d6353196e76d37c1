use crate::tabular::{cell, parse_required_int, TabularFile};
use crate::IngestError;

pub const YEAR_COLUMN: &str = "Year";
pub const DISTURBANCES_COLUMN: &str = "Cyclonic Disturbances - TOTAL";
pub const CYCLONES_COLUMN: &str = "Cyclones - TOTAL";
pub const SEVERE_COLUMN: &str = "Severe Cyclones - TOTAL";

/// National cyclone counts for one year. Counts recorded as empty cells in
/// the source are 0 here; that is distinct from a year missing from the
/// source entirely, which never produces a `CycloneYear` at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycloneYear {
    pub year: i64,
    pub cyclonic_disturbances: i64,
    pub cyclones: i64,
    pub severe_cyclones: i64,
}

pub fn parse_cyclone_table(table: &TabularFile) -> Result<Vec<CycloneYear>, IngestError> {
    let year_idx = table.require_column(YEAR_COLUMN)?;
    let disturbances_idx = table.require_column(DISTURBANCES_COLUMN)?;
    let cyclones_idx = table.require_column(CYCLONES_COLUMN)?;
    let severe_idx = table.require_column(SEVERE_COLUMN)?;

    let mut out = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        out.push(CycloneYear {
            year: parse_required_int(cell(row, year_idx), "cyclone year")?,
            cyclonic_disturbances: parse_count(cell(row, disturbances_idx), DISTURBANCES_COLUMN)?,
            cyclones: parse_count(cell(row, cyclones_idx), CYCLONES_COLUMN)?,
            severe_cyclones: parse_count(cell(row, severe_idx), SEVERE_COLUMN)?,
        });
    }
    Ok(out)
}

fn parse_count(raw: &str, column: &str) -> Result<i64, IngestError> {
    if raw.trim().is_empty() {
        return Ok(0);
    }
    parse_required_int(raw, column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tabular::parse_delimited;

    const HEADER: &str =
        "Year,Cyclonic Disturbances - TOTAL,Cyclones - TOTAL,Severe Cyclones - TOTAL\n";

    #[test]
    fn missing_counts_default_to_zero() {
        let table = parse_delimited(&format!("{HEADER}1996,8,,1\n")).expect("parse");
        let years = parse_cyclone_table(&table).expect("cyclone table");
        assert_eq!(
            years,
            vec![CycloneYear {
                year: 1996,
                cyclonic_disturbances: 8,
                cyclones: 0,
                severe_cyclones: 1,
            }]
        );
    }

    #[test]
    fn unparseable_count_is_fatal() {
        let table = parse_delimited(&format!("{HEADER}1996,8,n/a,1\n")).expect("parse");
        let err = parse_cyclone_table(&table).expect_err("must fail");
        assert!(
            err.0.contains("Cyclones - TOTAL"),
            "unexpected error: {}",
            err.0
        );
    }

    #[test]
    fn missing_column_is_fatal() {
        let table =
            parse_delimited("Year,Cyclones - TOTAL\n1996,3\n").expect("parse");
        let err = parse_cyclone_table(&table).expect_err("must fail");
        assert!(
            err.0.contains("missing expected column"),
            "unexpected error: {}",
            err.0
        );
    }
}
