//! Disease case records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Clinical severity recorded at admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
    Critical,
}

impl Severity {
    /// All severities, mildest first.
    pub const ALL: [Severity; 4] = [
        Severity::Mild,
        Severity::Moderate,
        Severity::Severe,
        Severity::Critical,
    ];

    /// Display label, matching the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Mild => "Mild",
            Severity::Moderate => "Moderate",
            Severity::Severe => "Severe",
            Severity::Critical => "Critical",
        }
    }

    /// True for the two severities the dashboard counts as "severe cases".
    pub fn is_severe(&self) -> bool {
        matches!(self, Severity::Severe | Severity::Critical)
    }
}

/// Where a case currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Recovered,
    #[serde(rename = "Under Treatment")]
    UnderTreatment,
    Deceased,
    Transferred,
}

/// One admission for one disease.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseCase {
    pub id: String,
    pub case_id: String,
    /// Registry number of the patient (`Patient::patient_id`).
    pub patient_id: String,
    #[serde(default)]
    pub hospital_id: String,
    pub district: String,
    pub disease_name: String,
    #[serde(default)]
    pub disease_category: String,
    pub admission_date: DateTime<Utc>,
    #[serde(default)]
    pub is_migrant_patient: bool,
    pub severity: Severity,
    /// Absent while the case has not been triaged to an outcome yet.
    #[serde(default)]
    pub outcome: Option<Outcome>,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub treatment_plan: Option<String>,
}

impl DiseaseCase {
    /// True when the case is still being actively treated.
    pub fn is_under_treatment(&self) -> bool {
        self.outcome == Some(Outcome::UnderTreatment)
    }
}
