#![forbid(unsafe_code)]
//! Krishi data model SSOT.
//!
//! The persisted store holds exactly two tables: `climate_agri` (one row per
//! district and year) and `kcc_telangana` (one row per farmer advisory
//! record). The types here are the row shapes of those tables; the ingest
//! pipeline produces them and the query layer returns them.

mod record;
mod years;

pub use record::{AdvisoryRecord, ClimateRecord, TrendPoint};
pub use years::{filter_year_labels, FILTER_YEAR_MAX, FILTER_YEAR_MIN};

pub const CRATE_NAME: &str = "krishi-model";
