//! Patient records.
//!
//! A `Patient` is the registry entry a doctor maintains for a migrant or local
//! worker. The alert engine only reads these; writes go through the
//! `PatientRegistry` seam using `NewPatient` as the form payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Self-reported gender as captured on the patient form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// A registered patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    /// Store-assigned record identifier.
    pub id: String,
    /// Human-facing registry number, e.g. "KL12345678".
    pub patient_id: String,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    /// True for migrant workers, the high-risk screening category.
    pub migrant: bool,
    pub hospital_id: String,
    pub district: String,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    /// Most recent checkup. Absent for patients never seen since registration.
    #[serde(default)]
    pub last_checkup: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Profile id of the user who registered the patient.
    #[serde(default)]
    pub created_by: Option<String>,
}

/// The create/update payload submitted from the patient form.
///
/// Fields are raw form values; the registry trims and validates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPatient {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub migrant: bool,
    pub hospital_id: String,
    pub district: String,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub last_checkup: Option<DateTime<Utc>>,
}
