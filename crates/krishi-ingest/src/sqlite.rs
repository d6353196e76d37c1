use crate::IngestError;
use krishi_model::{AdvisoryRecord, ClimateRecord};
use rusqlite::{params, Connection};
use std::path::Path;

/// Replace both tables inside one transaction. Callers parse every source
/// before this runs; a failed run never leaves a half-written store.
pub fn write_store(
    path: &Path,
    climate: &[ClimateRecord],
    advisory: &[AdvisoryRecord],
) -> Result<(), IngestError> {
    let mut conn = Connection::open(path).map_err(|e| IngestError(e.to_string()))?;
    conn.execute_batch(
        "
        PRAGMA journal_mode=WAL;
        PRAGMA synchronous=OFF;
        PRAGMA temp_store=MEMORY;
        ",
    )
    .map_err(|e| IngestError(e.to_string()))?;

    let tx = conn.transaction().map_err(|e| IngestError(e.to_string()))?;
    tx.execute_batch(
        "
        DROP TABLE IF EXISTS climate_agri;
        DROP TABLE IF EXISTS kcc_telangana;
        CREATE TABLE climate_agri (
          state TEXT,
          district TEXT,
          year INTEGER NOT NULL,
          groundwater_level REAL,
          cyclonic_disturbances INTEGER,
          cyclones INTEGER,
          severe_cyclones INTEGER
        );
        CREATE TABLE kcc_telangana (
          state TEXT,
          district TEXT,
          query TEXT NOT NULL,
          response TEXT NOT NULL,
          year INTEGER NOT NULL,
          month TEXT
        );
        CREATE INDEX idx_climate_agri_state ON climate_agri(state);
        CREATE INDEX idx_climate_agri_district ON climate_agri(district);
        CREATE INDEX idx_climate_agri_year ON climate_agri(year);
        CREATE INDEX idx_kcc_telangana_state ON kcc_telangana(state);
        CREATE INDEX idx_kcc_telangana_district ON kcc_telangana(district);
        ",
    )
    .map_err(|e| IngestError(e.to_string()))?;

    {
        let mut climate_stmt = tx
            .prepare(
                "INSERT INTO climate_agri (
                  state, district, year, groundwater_level,
                  cyclonic_disturbances, cyclones, severe_cyclones
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )
            .map_err(|e| IngestError(e.to_string()))?;
        for row in climate {
            climate_stmt
                .execute(params![
                    row.state,
                    row.district,
                    row.year,
                    row.groundwater_level,
                    row.cyclonic_disturbances,
                    row.cyclones,
                    row.severe_cyclones
                ])
                .map_err(|e| IngestError(e.to_string()))?;
        }

        let mut advisory_stmt = tx
            .prepare(
                "INSERT INTO kcc_telangana (
                  state, district, query, response, year, month
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )
            .map_err(|e| IngestError(e.to_string()))?;
        for row in advisory {
            advisory_stmt
                .execute(params![
                    row.state,
                    row.district,
                    row.query,
                    row.response,
                    row.year,
                    row.month
                ])
                .map_err(|e| IngestError(e.to_string()))?;
        }
    }

    tx.commit().map_err(|e| IngestError(e.to_string()))?;
    Ok(())
}
