// SPDX-License-Identifier: Apache-2.0

use crate::job::IngestInputs;
use crate::IngestError;
use krishi_core::sha256_hex;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputHashes {
    pub cyclone_sha256: String,
    pub groundwater_sha256: String,
    pub advisory_sha256: String,
}

pub fn hash_file(path: &Path) -> Result<String, IngestError> {
    let bytes = fs::read(path)
        .map_err(|e| IngestError(format!("failed to read {}: {e}", path.display())))?;
    Ok(sha256_hex(&bytes))
}

pub fn compute_input_hashes(inputs: &IngestInputs) -> Result<InputHashes, IngestError> {
    Ok(InputHashes {
        cyclone_sha256: hash_file(&inputs.cyclone_path)?,
        groundwater_sha256: hash_file(&inputs.groundwater_path)?,
        advisory_sha256: hash_file(&inputs.advisory_path)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn hash_file_matches_content_hash() {
        let tmp = tempdir().expect("tempdir");
        let path = tmp.path().join("source.csv");
        fs::write(&path, b"Year\n1995\n").expect("write fixture");
        let digest = hash_file(&path).expect("hash");
        assert_eq!(digest, sha256_hex(b"Year\n1995\n"));
        assert_eq!(digest.len(), 64);
    }

    #[test]
    fn missing_file_reports_its_path() {
        let err = hash_file(Path::new("/nonexistent/cyclones.csv")).expect_err("must fail");
        assert!(
            err.0.contains("/nonexistent/cyclones.csv"),
            "unexpected error: {}",
            err.0
        );
    }
}
