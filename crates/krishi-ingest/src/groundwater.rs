use crate::tabular::{cell, optional_text, TabularFile};
use crate::IngestError;
use std::collections::{BTreeMap, BTreeSet};

pub const PRE_MONSOON_MARKER: &str = "Pre-monsoon";
pub const STATE_COLUMN: &str = "State_Name_With_LGD_Code";
pub const DISTRICT_COLUMN: &str = "District_Name_With_LGD_Code";

#[derive(Debug, Clone, PartialEq)]
pub struct GroundwaterObservation {
    pub state: Option<String>,
    pub district: Option<String>,
    pub year: i64,
    pub groundwater_level: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImputationStats {
    pub imputed: usize,
    pub unimputable_districts: usize,
}

/// Label grammar: a measurement column is any header containing the
/// pre-monsoon marker, and its year is the concatenation of the label's
/// ASCII digits. A marker column with no digits is malformed input.
pub fn year_from_label(label: &str) -> Result<i64, IngestError> {
    let digits: String = label.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Err(IngestError(format!(
            "pre-monsoon column label has no extractable year: {label}"
        )));
    }
    digits.parse::<i64>().map_err(|_| {
        IngestError(format!(
            "pre-monsoon column label year is out of range: {label}"
        ))
    })
}

/// Wide to long: one output row per source district per measurement year.
pub fn parse_groundwater_table(
    table: &TabularFile,
) -> Result<Vec<GroundwaterObservation>, IngestError> {
    let state_idx = table.require_column(STATE_COLUMN)?;
    let district_idx = table.require_column(DISTRICT_COLUMN)?;

    let mut measurement_cols: Vec<(usize, i64)> = Vec::new();
    for (idx, header) in table.headers.iter().enumerate() {
        if header.contains(PRE_MONSOON_MARKER) {
            measurement_cols.push((idx, year_from_label(header)?));
        }
    }
    if measurement_cols.is_empty() {
        return Err(IngestError(
            "groundwater source has no pre-monsoon measurement columns".to_string(),
        ));
    }

    let mut out = Vec::with_capacity(table.rows.len() * measurement_cols.len());
    for (col_idx, year) in &measurement_cols {
        for row in &table.rows {
            out.push(GroundwaterObservation {
                state: optional_text(row, state_idx),
                district: optional_text(row, district_idx),
                year: *year,
                groundwater_level: parse_level(cell(row, *col_idx)),
            });
        }
    }
    Ok(out)
}

fn parse_level(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Fill missing levels with the mean of the same district's observed values.
/// Districts with no observations at all stay null, and rows without a
/// district identifier belong to no group and are never touched.
pub fn impute_district_means(rows: &mut [GroundwaterObservation]) -> ImputationStats {
    let mut sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for row in rows.iter() {
        let (Some(district), Some(level)) = (&row.district, row.groundwater_level) else {
            continue;
        };
        let entry = sums.entry(district.clone()).or_insert((0.0, 0));
        entry.0 += level;
        entry.1 += 1;
    }

    let mut stats = ImputationStats::default();
    let mut unimputable: BTreeSet<String> = BTreeSet::new();
    for row in rows.iter_mut() {
        if row.groundwater_level.is_some() {
            continue;
        }
        let Some(district) = &row.district else {
            continue;
        };
        match sums.get(district) {
            Some((sum, count)) => {
                row.groundwater_level = Some(sum / *count as f64);
                stats.imputed += 1;
            }
            None => {
                unimputable.insert(district.clone());
            }
        }
    }
    stats.unimputable_districts = unimputable.len();
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tabular::parse_delimited;

    fn observation(district: &str, year: i64, level: Option<f64>) -> GroundwaterObservation {
        GroundwaterObservation {
            state: Some("Telangana (36)".to_string()),
            district: Some(district.to_string()),
            year,
            groundwater_level: level,
        }
    }

    #[test]
    fn year_extraction_follows_the_digit_grammar() {
        assert_eq!(year_from_label("Pre-monsoon_2019").expect("year"), 2019);
        assert_eq!(
            year_from_label("Pre-monsoon 2019 (mbgl)").expect("year"),
            2019
        );
        let err = year_from_label("Pre-monsoon (mbgl)").expect_err("must fail");
        assert!(
            err.0.contains("no extractable year"),
            "unexpected error: {}",
            err.0
        );
    }

    #[test]
    fn unpivot_emits_one_row_per_district_per_year() {
        let raw = "State_Name_With_LGD_Code,District_Name_With_LGD_Code,Pre-monsoon 1994 (mbgl),Pre-monsoon 1995 (mbgl)\n\
                   Telangana (36),Hyderabad (517),5.0,6.0\n\
                   Telangana (36),Warangal (520),7.0,abc\n";
        let table = parse_delimited(raw).expect("parse");
        let rows = parse_groundwater_table(&table).expect("groundwater table");
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].year, 1994);
        assert_eq!(rows[0].groundwater_level, Some(5.0));
        // Non-numeric entries coerce to missing, not to an error.
        let warangal_1995 = rows
            .iter()
            .find(|r| r.year == 1995 && r.district.as_deref() == Some("Warangal (520)"))
            .expect("warangal 1995");
        assert_eq!(warangal_1995.groundwater_level, None);
    }

    #[test]
    fn imputation_uses_the_district_mean() {
        let mut rows = vec![
            observation("Hyderabad", 1994, Some(5.0)),
            observation("Hyderabad", 1995, Some(6.0)),
            observation("Hyderabad", 1997, None),
        ];
        let stats = impute_district_means(&mut rows);
        assert_eq!(stats.imputed, 1);
        assert_eq!(stats.unimputable_districts, 0);
        assert_eq!(rows[2].groundwater_level, Some(5.5));
    }

    #[test]
    fn all_missing_districts_stay_null() {
        let mut rows = vec![
            observation("Guntur", 1994, None),
            observation("Guntur", 1995, None),
            observation("Hyderabad", 1994, Some(5.0)),
        ];
        let stats = impute_district_means(&mut rows);
        assert_eq!(stats.imputed, 0);
        assert_eq!(stats.unimputable_districts, 1);
        assert_eq!(rows[0].groundwater_level, None);
        assert_eq!(rows[1].groundwater_level, None);
    }

    #[test]
    fn rows_without_a_district_are_never_imputed() {
        let mut rows = vec![
            GroundwaterObservation {
                state: None,
                district: None,
                year: 1994,
                groundwater_level: None,
            },
            observation("Hyderabad", 1994, Some(5.0)),
        ];
        impute_district_means(&mut rows);
        assert_eq!(rows[0].groundwater_level, None);
    }
}
