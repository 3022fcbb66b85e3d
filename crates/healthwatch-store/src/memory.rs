//! In-memory implementation of `RecordStore` and `PatientRegistry`.
//!
//! `InMemoryRecordStore` keeps every collection in a `Vec` behind a `Mutex`,
//! so one instance can be shared across the blocking reads that
//! `load_snapshot` issues in parallel. It stands in for the hosted backend in
//! the CLI and in tests.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use healthwatch_contracts::{
    case::DiseaseCase,
    district::{is_known_district, District, RecordFilter},
    error::{HealthError, HealthResult},
    patient::{NewPatient, Patient},
};
use healthwatch_core::traits::{PatientRegistry, RecordStore};

use crate::dataset::Dataset;

/// Oldest age the patient form accepts.
const MAX_AGE: u32 = 150;

// ── Internal mutable state ────────────────────────────────────────────────────

#[derive(Default)]
pub(crate) struct StoreState {
    pub(crate) patients: Vec<Patient>,
    pub(crate) cases: Vec<DiseaseCase>,
    pub(crate) districts: Vec<District>,
}

// ── Public store ──────────────────────────────────────────────────────────────

/// A process-local record store.
///
/// Cloning is cheap and every clone observes the same records.
#[derive(Clone, Default)]
pub struct InMemoryRecordStore {
    pub(crate) state: Arc<Mutex<StoreState>>,
}

impl InMemoryRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-loaded with `dataset`.
    pub fn from_dataset(dataset: Dataset) -> Self {
        info!(
            patients = dataset.patients.len(),
            cases = dataset.disease_cases.len(),
            districts = dataset.districts.len(),
            "record store loaded"
        );
        let state = StoreState {
            patients: dataset.patients,
            cases: dataset.disease_cases,
            districts: dataset.districts,
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Append a disease case.
    pub fn insert_case(&self, case: DiseaseCase) -> HealthResult<()> {
        self.lock("disease_cases")?.cases.push(case);
        Ok(())
    }

    /// Append a district.
    pub fn insert_district(&self, district: District) -> HealthResult<()> {
        self.lock("districts")?.districts.push(district);
        Ok(())
    }

    /// Total number of registered patients, ignoring any scope.
    pub fn patient_count(&self) -> HealthResult<usize> {
        Ok(self.lock("patients")?.patients.len())
    }

    /// Total number of disease cases, ignoring any scope.
    pub fn case_count(&self) -> HealthResult<usize> {
        Ok(self.lock("disease_cases")?.cases.len())
    }

    /// Export every collection.
    pub fn export(&self) -> HealthResult<Dataset> {
        let state = self.lock("dataset")?;
        Ok(Dataset {
            patients: state.patients.clone(),
            disease_cases: state.cases.clone(),
            districts: state.districts.clone(),
        })
    }

    fn lock(&self, collection: &str) -> HealthResult<MutexGuard<'_, StoreState>> {
        self.state
            .lock()
            .map_err(|e| HealthError::data_access(collection, format!("store lock poisoned: {}", e)))
    }
}

// ── RecordStore impl ──────────────────────────────────────────────────────────

impl RecordStore for InMemoryRecordStore {
    /// Patients in `filter`, most recently registered first.
    fn list_patients(&self, filter: &RecordFilter) -> HealthResult<Vec<Patient>> {
        let state = self.lock("patients")?;
        let mut patients: Vec<Patient> = state
            .patients
            .iter()
            .filter(|p| filter.admits(&p.district))
            .cloned()
            .collect();
        patients.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(patients)
    }

    /// Cases in `filter`, most recent admission first.
    fn list_disease_cases(&self, filter: &RecordFilter) -> HealthResult<Vec<DiseaseCase>> {
        let state = self.lock("disease_cases")?;
        let mut cases: Vec<DiseaseCase> = state
            .cases
            .iter()
            .filter(|c| filter.admits(&c.district))
            .cloned()
            .collect();
        cases.sort_by(|a, b| b.admission_date.cmp(&a.admission_date));
        Ok(cases)
    }

    fn list_districts(&self) -> HealthResult<Vec<District>> {
        Ok(self.lock("districts")?.districts.clone())
    }
}

// ── PatientRegistry impl ──────────────────────────────────────────────────────

impl PatientRegistry for InMemoryRecordStore {
    fn get_patient(&self, id: &str) -> HealthResult<Patient> {
        self.lock("patients")?
            .patients
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    /// Register a patient with a fresh record id and registry number.
    fn create_patient(
        &self,
        input: NewPatient,
        created_by: Option<&str>,
        now: DateTime<Utc>,
    ) -> HealthResult<Patient> {
        let input = clean(input, now)?;
        let mut state = self.lock("patients")?;

        let mut millis = now.timestamp_millis();
        let mut patient_id = registry_number(millis);
        while state.patients.iter().any(|p| p.patient_id == patient_id) {
            millis += 1;
            patient_id = registry_number(millis);
        }

        let patient = Patient {
            id: Uuid::new_v4().to_string(),
            patient_id,
            name: input.name,
            age: input.age,
            gender: input.gender,
            migrant: input.migrant,
            hospital_id: input.hospital_id,
            district: input.district,
            contact_number: input.contact_number,
            address: input.address,
            last_checkup: input.last_checkup,
            created_at: now,
            updated_at: now,
            created_by: created_by.map(str::to_string),
        };

        info!(id = %patient.id, patient_id = %patient.patient_id, "patient registered");
        state.patients.push(patient.clone());
        Ok(patient)
    }

    fn update_patient(
        &self,
        id: &str,
        input: NewPatient,
        now: DateTime<Utc>,
    ) -> HealthResult<Patient> {
        let input = clean(input, now)?;
        let mut state = self.lock("patients")?;
        let patient = state
            .patients
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| not_found(id))?;

        patient.name = input.name;
        patient.age = input.age;
        patient.gender = input.gender;
        patient.migrant = input.migrant;
        patient.hospital_id = input.hospital_id;
        patient.district = input.district;
        patient.contact_number = input.contact_number;
        patient.address = input.address;
        patient.last_checkup = input.last_checkup;
        patient.updated_at = now;

        debug!(id = %id, "patient updated");
        Ok(patient.clone())
    }

    fn delete_patient(&self, id: &str) -> HealthResult<()> {
        let mut state = self.lock("patients")?;
        let before = state.patients.len();
        state.patients.retain(|p| p.id != id);
        if state.patients.len() == before {
            return Err(not_found(id));
        }
        info!(id = %id, "patient deleted");
        Ok(())
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn not_found(id: &str) -> HealthError {
    HealthError::NotFound {
        entity: "patient".to_string(),
        id: id.to_string(),
    }
}

/// `KL` followed by the last eight digits of a millisecond timestamp.
pub fn registry_number(timestamp_millis: i64) -> String {
    format!("KL{:08}", timestamp_millis.rem_euclid(100_000_000))
}

/// Trim form input, drop blank optionals, and validate.
fn clean(input: NewPatient, now: DateTime<Utc>) -> HealthResult<NewPatient> {
    let name = input.name.trim().to_string();
    if name.is_empty() {
        return Err(HealthError::validation("name", "must not be empty"));
    }

    if input.age > MAX_AGE {
        return Err(HealthError::validation(
            "age",
            format!("must be at most {MAX_AGE} (got {})", input.age),
        ));
    }

    if !is_known_district(&input.district) {
        return Err(HealthError::validation(
            "district",
            format!("unknown district '{}'", input.district),
        ));
    }

    let hospital_id = input.hospital_id.trim().to_string();
    if hospital_id.is_empty() {
        return Err(HealthError::validation("hospital_id", "must not be empty"));
    }

    if let Some(last_checkup) = input.last_checkup {
        if last_checkup > now {
            return Err(HealthError::validation(
                "last_checkup",
                "must not be in the future",
            ));
        }
    }

    Ok(NewPatient {
        name,
        hospital_id,
        contact_number: non_blank(input.contact_number),
        address: non_blank(input.address),
        ..input
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
