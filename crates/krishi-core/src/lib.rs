#![forbid(unsafe_code)]

use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub const CRATE_NAME: &str = "krishi-core";

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    Usage = 2,
    Validation = 3,
    DependencyFailure = 4,
    Internal = 10,
}

pub const ENV_KRISHI_LOG_LEVEL: &str = "KRISHI_LOG_LEVEL";
pub const ENV_KRISHI_DB: &str = "KRISHI_DB";

pub const DEFAULT_DB_FILE: &str = "krishi.db";

#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

#[must_use]
pub fn resolve_krishi_db_path() -> PathBuf {
    if let Ok(explicit) = std::env::var(ENV_KRISHI_DB) {
        let trimmed = explicit.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    PathBuf::from(DEFAULT_DB_FILE)
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MachineError {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub details: BTreeMap<String, String>,
}

impl MachineError {
    #[must_use]
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            details: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_detail(mut self, key: &str, value: &str) -> Self {
        self.details.insert(key.to_string(), value.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_hex_matches_known_vector() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn machine_error_accumulates_details() {
        let err = MachineError::new("ingest_failed", "cyclone source missing")
            .with_detail("path", "/data/cyclones.csv");
        assert_eq!(err.code, "ingest_failed");
        assert_eq!(
            err.details.get("path").map(String::as_str),
            Some("/data/cyclones.csv")
        );
    }

    #[test]
    fn machine_error_round_trips_through_json() {
        let err = MachineError::new("usage_error", "bad flag");
        let raw = serde_json::to_string(&err).expect("serialize");
        let back: MachineError = serde_json::from_str(&raw).expect("deserialize");
        assert_eq!(err, back);
    }
}
