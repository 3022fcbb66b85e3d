//! Patient list search and filtering.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use healthwatch_contracts::{error::HealthError, patient::Patient};

/// Migrant-status selector on the patient list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MigrantFilter {
    #[default]
    All,
    Migrant,
    Local,
}

impl MigrantFilter {
    pub fn admits(&self, patient: &Patient) -> bool {
        match self {
            MigrantFilter::All => true,
            MigrantFilter::Migrant => patient.migrant,
            MigrantFilter::Local => !patient.migrant,
        }
    }
}

impl FromStr for MigrantFilter {
    type Err = HealthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(MigrantFilter::All),
            "migrant" => Ok(MigrantFilter::Migrant),
            "local" => Ok(MigrantFilter::Local),
            other => Err(HealthError::validation(
                "migrant_filter",
                format!("expected all, migrant, or local (got '{other}')"),
            )),
        }
    }
}

/// Search box plus migrant selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientQuery {
    /// Case-insensitive substring matched against name, registry number,
    /// and contact number. Blank matches everything.
    pub search: String,
    pub migrant: MigrantFilter,
}

impl PatientQuery {
    pub fn matches(&self, patient: &Patient) -> bool {
        self.matches_search(patient) && self.migrant.admits(patient)
    }

    fn matches_search(&self, patient: &Patient) -> bool {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        patient.name.to_lowercase().contains(&needle)
            || patient.patient_id.to_lowercase().contains(&needle)
            || patient
                .contact_number
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(&needle))
    }

    /// Apply the query, keeping the input order.
    pub fn apply<'a>(&self, patients: &'a [Patient]) -> PatientListing<'a> {
        PatientListing {
            shown: patients.iter().filter(|p| self.matches(p)).collect(),
            total: patients.len(),
        }
    }

    /// True when the user has narrowed the list in any way.
    pub fn is_narrowed(&self) -> bool {
        !self.search.trim().is_empty() || self.migrant != MigrantFilter::All
    }
}

/// The patients a query let through, out of how many.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientListing<'a> {
    pub shown: Vec<&'a Patient>,
    pub total: usize,
}

impl PatientListing<'_> {
    pub fn summary(&self) -> String {
        format!("Showing {} of {} patients", self.shown.len(), self.total)
    }
}
