//! Trait seams between HealthWatch and its backing services.
//!
//! - `RecordStore`: read contract for the three source collections
//! - `PatientRegistry`: patient CRUD behind the patients view
//! - `Clock`: the evaluation timestamp, injected so rules never
//!   read the wall clock themselves
//!
//! Implementations are expected to be cheap to share behind an `Arc` and to
//! be called from blocking worker threads.

use chrono::{DateTime, Utc};

use healthwatch_contracts::{
    case::DiseaseCase,
    district::{District, RecordFilter},
    error::HealthResult,
    patient::{NewPatient, Patient},
};

/// Read access to the patient, case, and district collections.
///
/// Each read is independent and may fail with `HealthError::DataAccess`.
/// Honoring `filter` server-side is an optimization; callers must not depend
/// on it.
pub trait RecordStore: Send + Sync {
    /// List patients, optionally restricted to one district.
    fn list_patients(&self, filter: &RecordFilter) -> HealthResult<Vec<Patient>>;

    /// List disease cases, optionally restricted to one district.
    fn list_disease_cases(&self, filter: &RecordFilter) -> HealthResult<Vec<DiseaseCase>>;

    /// List every district.
    fn list_districts(&self) -> HealthResult<Vec<District>>;
}

/// Create, update, and delete patient records.
pub trait PatientRegistry: Send + Sync {
    /// Look up a patient by record id.
    fn get_patient(&self, id: &str) -> HealthResult<Patient>;

    /// Validate `input` and register a new patient created by `created_by`.
    fn create_patient(
        &self,
        input: NewPatient,
        created_by: Option<&str>,
        now: DateTime<Utc>,
    ) -> HealthResult<Patient>;

    /// Validate `input` and overwrite the editable fields of patient `id`.
    fn update_patient(&self, id: &str, input: NewPatient, now: DateTime<Utc>)
        -> HealthResult<Patient>;

    /// Remove patient `id`.
    fn delete_patient(&self, id: &str) -> HealthResult<()>;
}

/// Source of the evaluation timestamp.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The process wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to one instant, for tests and reproducible reports.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
