// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod advisory;
mod cyclone;
mod decode;
mod encoding;
mod groundwater;
mod hashing;
mod job;
mod logging;
mod sqlite;
mod tabular;

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const CRATE_NAME: &str = "krishi-ingest";

pub use encoding::SourceEncoding;
pub use groundwater::{year_from_label, PRE_MONSOON_MARKER};
pub use hashing::{compute_input_hashes, hash_file, InputHashes};
pub use job::{IngestInputs, IngestJob};
pub use logging::{IngestEvent, IngestLog, IngestStage};

#[derive(Debug)]
pub struct IngestError(pub String);
impl Display for IngestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::error::Error for IngestError {}

#[derive(Debug, Clone)]
pub struct IngestOptions {
    pub cyclone_path: PathBuf,
    pub groundwater_path: PathBuf,
    pub advisory_path: PathBuf,
    pub db_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IngestSummary {
    pub cyclone_years: usize,
    pub climate_rows: usize,
    pub advisory_rows: usize,
    pub imputed_levels: usize,
    pub districts_without_observations: usize,
    pub input_hashes: InputHashes,
}

#[derive(Debug, Clone)]
pub struct IngestResult {
    pub db_path: PathBuf,
    pub summary: IngestSummary,
    pub events: Vec<IngestEvent>,
}

pub fn ingest_sources(opts: &IngestOptions) -> Result<IngestResult, IngestError> {
    ingest_sources_with_events(opts).map(|(result, _)| result)
}

pub fn ingest_sources_with_events(
    opts: &IngestOptions,
) -> Result<(IngestResult, Vec<IngestEvent>), IngestError> {
    let mut log = logging::IngestLog::default();
    log.emit(logging::IngestStage::Prepare, "ingest.start", BTreeMap::new());

    let job = job::IngestJob::from_options(opts);
    let input_hashes = hashing::compute_input_hashes(&job.inputs)?;

    log.emit(
        logging::IngestStage::Decode,
        "ingest.decode.begin",
        BTreeMap::new(),
    );
    let decoded = decode::decode_ingest_inputs(&job)?;
    tracing::info!(
        climate_rows = decoded.climate_rows.len(),
        advisory_rows = decoded.advisory_rows.len(),
        imputed_levels = decoded.imputation.imputed,
        "sources decoded"
    );
    if decoded.imputation.unimputable_districts > 0 {
        tracing::warn!(
            districts = decoded.imputation.unimputable_districts,
            "districts with no observed groundwater level remain null"
        );
    }
    log.emit(
        logging::IngestStage::Decode,
        "ingest.decode.complete",
        BTreeMap::from([
            ("climate_rows".to_string(), decoded.climate_rows.len().to_string()),
            (
                "advisory_rows".to_string(),
                decoded.advisory_rows.len().to_string(),
            ),
            (
                "imputed_levels".to_string(),
                decoded.imputation.imputed.to_string(),
            ),
        ]),
    );

    log.emit(
        logging::IngestStage::Persist,
        "ingest.persist.begin",
        BTreeMap::new(),
    );
    sqlite::write_store(
        &job.options.db_path,
        &decoded.climate_rows,
        &decoded.advisory_rows,
    )?;
    tracing::info!(db = %job.options.db_path.display(), "store written");
    log.emit(
        logging::IngestStage::Finalize,
        "ingest.persist.complete",
        BTreeMap::from([(
            "db_path".to_string(),
            job.options.db_path.display().to_string(),
        )]),
    );

    let summary = IngestSummary {
        cyclone_years: decoded.cyclone_years,
        climate_rows: decoded.climate_rows.len(),
        advisory_rows: decoded.advisory_rows.len(),
        imputed_levels: decoded.imputation.imputed,
        districts_without_observations: decoded.imputation.unimputable_districts,
        input_hashes,
    };
    let result = IngestResult {
        db_path: job.options.db_path.clone(),
        summary,
        events: log.events().to_vec(),
    };
    Ok((result, log.events().to_vec()))
}
