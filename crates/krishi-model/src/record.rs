use serde::{Deserialize, Serialize};

/// One `climate_agri` row: a district-year groundwater observation joined
/// with that year's national cyclone counts.
///
/// The cyclone fields are `None` when the year is absent from the cyclone
/// source; a year that is present but had an empty count cell carries `0`.
/// The two cases are deliberately distinct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClimateRecord {
    pub state: Option<String>,
    pub district: Option<String>,
    pub year: i64,
    pub groundwater_level: Option<f64>,
    pub cyclonic_disturbances: Option<i64>,
    pub cyclones: Option<i64>,
    pub severe_cyclones: Option<i64>,
}

/// One `kcc_telangana` row. `query` and `response` are empty strings when
/// the source cell was missing, never null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdvisoryRecord {
    pub state: Option<String>,
    pub district: Option<String>,
    pub query: String,
    pub response: String,
    pub year: i64,
    pub month: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrendPoint {
    pub district: String,
    pub year: i64,
    pub groundwater_level: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn climate_record_round_trips_with_null_cyclone_fields() {
        let record = ClimateRecord {
            state: Some("Telangana".to_string()),
            district: Some("Hyderabad".to_string()),
            year: 1997,
            groundwater_level: Some(5.5),
            cyclonic_disturbances: None,
            cyclones: None,
            severe_cyclones: None,
        };
        let raw = serde_json::to_string(&record).expect("serialize");
        assert!(raw.contains("\"cyclones\":null"));
        let back: ClimateRecord = serde_json::from_str(&raw).expect("deserialize");
        assert_eq!(record, back);
    }

    #[test]
    fn advisory_record_preserves_empty_strings() {
        let record = AdvisoryRecord {
            state: Some("Telangana".to_string()),
            district: Some("Warangal".to_string()),
            query: String::new(),
            response: "Contact local officer".to_string(),
            year: 2020,
            month: Some("2".to_string()),
        };
        let raw = serde_json::to_string(&record).expect("serialize");
        assert!(raw.contains("\"query\":\"\""));
        let back: AdvisoryRecord = serde_json::from_str(&raw).expect("deserialize");
        assert_eq!(record, back);
    }
}
