// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use crate::advisory::parse_advisory_table;
use crate::cyclone::{parse_cyclone_table, CycloneYear};
use crate::encoding::{read_decoded, SourceEncoding};
use crate::groundwater::{
    impute_district_means, parse_groundwater_table, GroundwaterObservation, ImputationStats,
};
use crate::job::IngestJob;
use crate::tabular::parse_delimited;
use crate::IngestError;
use krishi_model::{AdvisoryRecord, ClimateRecord};

pub struct DecodedIngest {
    pub climate_rows: Vec<ClimateRecord>,
    pub advisory_rows: Vec<AdvisoryRecord>,
    pub cyclone_years: usize,
    pub imputation: ImputationStats,
}

pub fn decode_ingest_inputs(job: &IngestJob) -> Result<DecodedIngest, IngestError> {
    let cyclone_raw = read_decoded(&job.inputs.cyclone_path, SourceEncoding::Utf8)?;
    let cyclones = parse_cyclone_table(&parse_delimited(&cyclone_raw)?)?;

    let groundwater_raw = read_decoded(&job.inputs.groundwater_path, SourceEncoding::Latin1)?;
    let mut observations = parse_groundwater_table(&parse_delimited(&groundwater_raw)?)?;
    let imputation = impute_district_means(&mut observations);

    let advisory_raw = read_decoded(&job.inputs.advisory_path, SourceEncoding::Utf8)?;
    let advisory_rows = parse_advisory_table(&parse_delimited(&advisory_raw)?)?;

    let mut climate_rows = merge_cyclones_by_year(observations, &cyclones);
    apply_deterministic_ordering(&mut climate_rows);

    Ok(DecodedIngest {
        climate_rows,
        advisory_rows,
        cyclone_years: cyclones.len(),
        imputation,
    })
}

/// Left join on year alone: cyclone counts are national and annual, so every
/// district row of a year inherits the same counts. Years absent from the
/// cyclone source leave all three counts null.
fn merge_cyclones_by_year(
    observations: Vec<GroundwaterObservation>,
    cyclones: &[CycloneYear],
) -> Vec<ClimateRecord> {
    let by_year: BTreeMap<i64, &CycloneYear> = cyclones.iter().map(|c| (c.year, c)).collect();
    observations
        .into_iter()
        .map(|obs| {
            let counts = by_year.get(&obs.year);
            ClimateRecord {
                state: obs.state,
                district: obs.district,
                year: obs.year,
                groundwater_level: obs.groundwater_level,
                cyclonic_disturbances: counts.map(|c| c.cyclonic_disturbances),
                cyclones: counts.map(|c| c.cyclones),
                severe_cyclones: counts.map(|c| c.severe_cyclones),
            }
        })
        .collect()
}

fn apply_deterministic_ordering(rows: &mut [ClimateRecord]) {
    rows.sort_by(|a, b| {
        a.district
            .cmp(&b.district)
            .then(a.year.cmp(&b.year))
            .then(a.state.cmp(&b.state))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(district: &str, year: i64) -> GroundwaterObservation {
        GroundwaterObservation {
            state: Some("Telangana (36)".to_string()),
            district: Some(district.to_string()),
            year,
            groundwater_level: Some(5.0),
        }
    }

    #[test]
    fn merge_broadcasts_counts_to_every_district_of_a_year() {
        let cyclones = vec![CycloneYear {
            year: 1995,
            cyclonic_disturbances: 12,
            cyclones: 6,
            severe_cyclones: 3,
        }];
        let rows = merge_cyclones_by_year(
            vec![observation("Hyderabad", 1995), observation("Warangal", 1995)],
            &cyclones,
        );
        assert!(rows.iter().all(|r| r.cyclones == Some(6)));
        assert!(rows.iter().all(|r| r.cyclonic_disturbances == Some(12)));
    }

    #[test]
    fn years_absent_from_the_cyclone_source_stay_null() {
        let cyclones = vec![CycloneYear {
            year: 1995,
            cyclonic_disturbances: 12,
            cyclones: 6,
            severe_cyclones: 3,
        }];
        let rows = merge_cyclones_by_year(vec![observation("Hyderabad", 1997)], &cyclones);
        assert_eq!(rows[0].cyclonic_disturbances, None);
        assert_eq!(rows[0].cyclones, None);
        assert_eq!(rows[0].severe_cyclones, None);
    }
}
