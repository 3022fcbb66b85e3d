//! Bulk record exports.
//!
//! A `Dataset` is the JSON shape the backend exports: one array per
//! collection. Parsing is strict; a single malformed record (an unparseable
//! date, an unknown severity) rejects the whole export.

use std::path::Path;

use serde::{Deserialize, Serialize};

use healthwatch_contracts::{
    case::DiseaseCase,
    district::District,
    error::{HealthError, HealthResult},
    patient::Patient,
};

/// All three collections as exported from the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub patients: Vec<Patient>,
    #[serde(default)]
    pub disease_cases: Vec<DiseaseCase>,
    #[serde(default)]
    pub districts: Vec<District>,
}

impl Dataset {
    /// Parse a JSON export.
    ///
    /// Returns `HealthError::DataAccess` naming the export if any record is
    /// malformed.
    pub fn from_json_str(s: &str) -> HealthResult<Self> {
        serde_json::from_str(s).map_err(|e| {
            HealthError::data_access("dataset", format!("malformed export: {}", e))
        })
    }

    /// Read and parse the JSON export at `path`.
    pub fn from_file(path: &Path) -> HealthResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            HealthError::data_access(
                "dataset",
                format!("failed to read '{}': {}", path.display(), e),
            )
        })?;
        Self::from_json_str(&contents)
    }
}
