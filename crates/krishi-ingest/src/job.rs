// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use crate::IngestOptions;

#[derive(Debug, Clone)]
pub struct IngestInputs {
    pub cyclone_path: PathBuf,
    pub groundwater_path: PathBuf,
    pub advisory_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct IngestJob {
    pub inputs: IngestInputs,
    pub options: IngestOptions,
}

impl IngestJob {
    #[must_use]
    pub fn from_options(options: &IngestOptions) -> Self {
        Self {
            inputs: IngestInputs {
                cyclone_path: options.cyclone_path.clone(),
                groundwater_path: options.groundwater_path.clone(),
                advisory_path: options.advisory_path.clone(),
            },
            options: options.clone(),
        }
    }
}
