//! Concurrent snapshot loading.
//!
//! The three source collections are read in parallel on blocking worker
//! threads and joined before any rule runs. A failure in any one read fails
//! the whole load; no partial snapshot is ever returned.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error};

use healthwatch_contracts::{
    case::DiseaseCase,
    district::{District, RecordFilter},
    error::{HealthError, HealthResult},
    patient::Patient,
};

use crate::traits::RecordStore;

/// A point-in-time read of all three collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub patients: Vec<Patient>,
    pub cases: Vec<DiseaseCase>,
    pub districts: Vec<District>,
}

impl Snapshot {
    /// Return true if every collection is empty.
    pub fn is_empty(&self) -> bool {
        self.patients.is_empty() && self.cases.is_empty() && self.districts.is_empty()
    }
}

/// Read patients, cases, and districts concurrently from `store`.
///
/// When `scope` names a district, patients and cases are restricted to it.
/// The restriction is re-applied after the read so results are the same
/// whether or not the store filtered server-side. Districts are never scoped.
pub async fn load_snapshot(
    store: Arc<dyn RecordStore>,
    scope: Option<&str>,
) -> HealthResult<Snapshot> {
    let filter = RecordFilter::from_scope(scope);
    debug!(scope = ?filter.district, "loading record snapshot");

    let patients = {
        let store = Arc::clone(&store);
        let filter = filter.clone();
        tokio::task::spawn_blocking(move || store.list_patients(&filter))
    };
    let cases = {
        let store = Arc::clone(&store);
        let filter = filter.clone();
        tokio::task::spawn_blocking(move || store.list_disease_cases(&filter))
    };
    let districts = {
        let store = Arc::clone(&store);
        tokio::task::spawn_blocking(move || store.list_districts())
    };

    let joined = tokio::try_join!(
        join_read("patients", patients),
        join_read("disease_cases", cases),
        join_read("districts", districts),
    );

    let (patients, cases, districts) = match joined {
        Ok(collections) => collections,
        Err(e) => {
            error!(error = %e, "snapshot load failed");
            return Err(e);
        }
    };

    let snapshot = Snapshot {
        patients: patients
            .into_iter()
            .filter(|p| filter.admits(&p.district))
            .collect(),
        cases: cases
            .into_iter()
            .filter(|c| filter.admits(&c.district))
            .collect(),
        districts,
    };

    debug!(
        patients = snapshot.patients.len(),
        cases = snapshot.cases.len(),
        districts = snapshot.districts.len(),
        "record snapshot loaded"
    );

    Ok(snapshot)
}

/// Await one blocking read, folding a panicked or cancelled task into
/// `DataAccess` for the named collection.
async fn join_read<T>(
    collection: &'static str,
    handle: JoinHandle<HealthResult<T>>,
) -> HealthResult<T> {
    handle
        .await
        .map_err(|e| HealthError::data_access(collection, format!("read task aborted: {e}")))?
}
