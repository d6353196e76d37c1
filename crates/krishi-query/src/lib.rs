#![forbid(unsafe_code)]

mod advisory;
mod climate;
mod db;
mod lookups;

pub const CRATE_NAME: &str = "krishi-query";

pub use advisory::advisory_search;
pub use climate::{average_groundwater, cyclone_rows, groundwater_trend};
pub use krishi_model::filter_year_labels;
pub use lookups::{list_districts, list_keywords, list_states};

#[derive(Debug)]
pub struct QueryError(pub String);

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::error::Error for QueryError {}
