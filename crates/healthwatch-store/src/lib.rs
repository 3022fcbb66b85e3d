//! # healthwatch-store
//!
//! Process-local record storage for HealthWatch.
//!
//! ## Overview
//!
//! `InMemoryRecordStore` implements both service seams from
//! `healthwatch-core`: `RecordStore` for the read-only views and
//! `PatientRegistry` for the doctor's patient form. It can be loaded from a
//! JSON export (`Dataset`) or from the built-in Kerala seed (`seed`).
//!
//! ## Usage
//!
//! ```rust,ignore
//! use healthwatch_store::{seed, InMemoryRecordStore};
//!
//! let store = InMemoryRecordStore::from_dataset(seed::demo_dataset(Utc::now()));
//! let patients = store.list_patients(&RecordFilter::district("Ernakulam"))?;
//! ```

pub mod dataset;
pub mod memory;
pub mod query;
pub mod seed;

pub use dataset::Dataset;
pub use memory::{registry_number, InMemoryRecordStore};
pub use query::{MigrantFilter, PatientListing, PatientQuery};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use healthwatch_contracts::{
        district::{is_known_district, RecordFilter},
        error::HealthError,
        patient::{Gender, NewPatient},
    };
    use healthwatch_core::traits::{PatientRegistry, RecordStore};

    use super::{registry_number, seed, Dataset, InMemoryRecordStore, MigrantFilter, PatientQuery};

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 15, 9, 30, 0).unwrap()
    }

    fn form(name: &str, district: &str) -> NewPatient {
        NewPatient {
            name: name.to_string(),
            age: 30,
            gender: Gender::Female,
            migrant: true,
            hospital_id: "H-ERN".to_string(),
            district: district.to_string(),
            contact_number: None,
            address: None,
            last_checkup: None,
        }
    }

    fn seeded() -> InMemoryRecordStore {
        InMemoryRecordStore::from_dataset(seed::demo_dataset(now()))
    }

    // ── Registry numbers ──────────────────────────────────────────────────────

    #[test]
    fn test_registry_number_uses_last_eight_digits() {
        assert_eq!(registry_number(1_781_515_800_123), "KL15800123");
        assert_eq!(registry_number(42), "KL00000042");
    }

    #[test]
    fn test_registry_number_collision_is_bumped() {
        let store = InMemoryRecordStore::new();
        let a = store.create_patient(form("Asha", "Ernakulam"), None, now()).unwrap();
        let b = store.create_patient(form("Binu", "Ernakulam"), None, now()).unwrap();

        assert_ne!(a.patient_id, b.patient_id);
        assert_eq!(b.patient_id, registry_number(now().timestamp_millis() + 1));
    }

    // ── Create / update / delete ──────────────────────────────────────────────

    #[test]
    fn test_create_trims_and_drops_blank_optionals() {
        let store = InMemoryRecordStore::new();
        let mut input = form("  Rekha Devi  ", "Kollam");
        input.hospital_id = " H-KOL ".to_string();
        input.contact_number = Some("   ".to_string());
        input.address = Some(" Ward 4, Chavara ".to_string());

        let patient = store.create_patient(input, Some("doc-1"), now()).unwrap();

        assert_eq!(patient.name, "Rekha Devi");
        assert_eq!(patient.hospital_id, "H-KOL");
        assert_eq!(patient.contact_number, None);
        assert_eq!(patient.address.as_deref(), Some("Ward 4, Chavara"));
        assert_eq!(patient.created_by.as_deref(), Some("doc-1"));
        assert_eq!(patient.created_at, now());
        assert_eq!(patient.updated_at, now());
        assert_eq!(store.patient_count().unwrap(), 1);
    }

    #[test]
    fn test_create_rejects_invalid_forms() {
        let store = InMemoryRecordStore::new();

        let blank = form("   ", "Kollam");
        let mut too_old = form("Old", "Kollam");
        too_old.age = 151;
        let unknown = form("Nowhere", "Chennai");
        let mut no_hospital = form("Nohosp", "Kollam");
        no_hospital.hospital_id = " ".to_string();
        let mut future = form("Future", "Kollam");
        future.last_checkup = Some(now() + Duration::days(1));

        for (input, field) in [
            (blank, "name"),
            (too_old, "age"),
            (unknown, "district"),
            (no_hospital, "hospital_id"),
            (future, "last_checkup"),
        ] {
            match store.create_patient(input, None, now()) {
                Err(HealthError::Validation { field: f, .. }) => assert_eq!(f, field),
                other => panic!("expected validation error on {field}, got {other:?}"),
            }
        }
        assert_eq!(store.patient_count().unwrap(), 0, "rejected forms must not be stored");
    }

    #[test]
    fn test_age_boundary_is_inclusive() {
        let store = InMemoryRecordStore::new();
        let mut input = form("Centenarian", "Idukki");
        input.age = 150;
        assert!(store.create_patient(input, None, now()).is_ok());
    }

    #[test]
    fn test_update_keeps_identity_and_bumps_timestamp() {
        let store = InMemoryRecordStore::new();
        let created = store.create_patient(form("Asha", "Ernakulam"), None, now()).unwrap();

        let later = now() + Duration::hours(2);
        let mut edit = form("Asha K", "Thrissur");
        edit.migrant = false;
        let updated = store.update_patient(&created.id, edit, later).unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.patient_id, created.patient_id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.updated_at, later);
        assert_eq!(updated.district, "Thrissur");
        assert!(!updated.migrant);
        assert_eq!(store.get_patient(&created.id).unwrap(), updated);
    }

    #[test]
    fn test_update_and_delete_unknown_id() {
        let store = InMemoryRecordStore::new();
        assert!(matches!(
            store.update_patient("missing", form("X", "Kollam"), now()),
            Err(HealthError::NotFound { .. })
        ));
        assert!(matches!(
            store.delete_patient("missing"),
            Err(HealthError::NotFound { .. })
        ));
    }

    #[test]
    fn test_delete_removes_patient() {
        let store = InMemoryRecordStore::new();
        let p = store.create_patient(form("Asha", "Ernakulam"), None, now()).unwrap();

        store.delete_patient(&p.id).unwrap();

        assert!(matches!(store.get_patient(&p.id), Err(HealthError::NotFound { .. })));
        assert_eq!(store.patient_count().unwrap(), 0);
    }

    // ── Listing ───────────────────────────────────────────────────────────────

    #[test]
    fn test_list_patients_newest_first_and_scoped() {
        let store = InMemoryRecordStore::new();
        store.create_patient(form("First", "Ernakulam"), None, now()).unwrap();
        store
            .create_patient(form("Second", "Kollam"), None, now() + Duration::minutes(1))
            .unwrap();
        store
            .create_patient(form("Third", "Ernakulam"), None, now() + Duration::minutes(2))
            .unwrap();

        let all: Vec<String> = store
            .list_patients(&RecordFilter::all())
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(all, vec!["Third", "Second", "First"]);

        let scoped = store.list_patients(&RecordFilter::district("Ernakulam")).unwrap();
        assert_eq!(scoped.len(), 2);
        assert!(scoped.iter().all(|p| p.district == "Ernakulam"));
    }

    #[test]
    fn test_list_cases_most_recent_admission_first() {
        let store = seeded();
        let cases = store.list_disease_cases(&RecordFilter::all()).unwrap();
        assert!(cases
            .windows(2)
            .all(|w| w[0].admission_date >= w[1].admission_date));
    }

    #[test]
    fn test_inserted_cases_and_districts_are_listed() {
        let store = InMemoryRecordStore::new();
        let seeded = seed::demo_dataset(now());

        for district in seeded.districts.iter().take(2).cloned() {
            store.insert_district(district).unwrap();
        }
        for case in seeded.disease_cases.iter().take(3).cloned() {
            store.insert_case(case).unwrap();
        }

        assert_eq!(store.case_count().unwrap(), 3);
        assert_eq!(store.list_districts().unwrap().len(), 2);
        let ernakulam = store
            .list_disease_cases(&RecordFilter::district("Ernakulam"))
            .unwrap();
        assert!(ernakulam.iter().all(|c| c.district == "Ernakulam"));
        assert_eq!(ernakulam.len(), 3);
    }

    // ── Search & filter ───────────────────────────────────────────────────────

    #[test]
    fn test_patient_query_search_and_migrant_filter() {
        let patients = seed::demo_patients(now());

        let everyone = PatientQuery::default().apply(&patients);
        assert_eq!(everyone.shown.len(), patients.len());
        assert_eq!(everyone.summary(), "Showing 10 of 10 patients");

        let by_name = PatientQuery {
            search: "  rahul ".to_string(),
            ..Default::default()
        };
        let listing = by_name.apply(&patients);
        assert_eq!(listing.shown.len(), 1);
        assert_eq!(listing.shown[0].name, "Rahul Das");
        assert!(by_name.is_narrowed());

        let by_registry = PatientQuery {
            search: patients[3].patient_id.to_lowercase(),
            ..Default::default()
        };
        assert_eq!(by_registry.apply(&patients).shown[0].id, patients[3].id);

        let locals = PatientQuery {
            migrant: MigrantFilter::Local,
            ..Default::default()
        };
        let listing = locals.apply(&patients);
        assert!(listing.shown.iter().all(|p| !p.migrant));
        assert_eq!(listing.summary(), format!("Showing {} of 10 patients", listing.shown.len()));
    }

    #[test]
    fn test_migrant_filter_parse() {
        assert_eq!("Migrant".parse::<MigrantFilter>().unwrap(), MigrantFilter::Migrant);
        assert_eq!("all".parse::<MigrantFilter>().unwrap(), MigrantFilter::All);
        assert!("visitors".parse::<MigrantFilter>().is_err());
    }

    // ── Datasets ──────────────────────────────────────────────────────────────

    #[test]
    fn test_malformed_dataset_is_data_access_error() {
        let json = r#"{
            "disease_cases": [{
                "id": "c1", "case_id": "DC-1", "patient_id": "KL1",
                "hospital_id": "H", "district": "Kollam",
                "disease_name": "Dengue", "disease_category": "Vector-borne",
                "admission_date": "not-a-date", "is_migrant_patient": true,
                "severity": "Mild"
            }]
        }"#;
        match Dataset::from_json_str(json) {
            Err(HealthError::DataAccess { collection, .. }) => assert_eq!(collection, "dataset"),
            other => panic!("expected DataAccess, got {other:?}"),
        }
    }

    #[test]
    fn test_dataset_export_round_trips_through_json() {
        let store = seeded();
        let exported = store.export().unwrap();
        let json = serde_json::to_string(&exported).unwrap();
        assert_eq!(Dataset::from_json_str(&json).unwrap(), exported);
    }

    #[test]
    fn test_missing_collections_default_to_empty() {
        let dataset = Dataset::from_json_str("{}").unwrap();
        assert!(dataset.patients.is_empty());
        assert!(dataset.disease_cases.is_empty());
        assert!(dataset.districts.is_empty());
    }

    // ── Seed ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_seed_covers_all_districts() {
        let districts = seed::kerala_districts();
        assert_eq!(districts.len(), 14);
        assert!(districts.iter().all(|d| is_known_district(&d.district_name)));
        assert!(districts.iter().all(|d| d.coordinates.is_some()));
    }

    #[test]
    fn test_seed_cases_reference_seed_patients() {
        let dataset = seed::demo_dataset(now());
        assert_eq!(dataset.disease_cases.len(), 16);
        for case in &dataset.disease_cases {
            let patient = dataset
                .patients
                .iter()
                .find(|p| p.patient_id == case.patient_id)
                .expect("case must reference a seeded patient");
            assert_eq!(patient.migrant, case.is_migrant_patient);
        }
    }

    #[test]
    fn test_seed_has_recent_cluster_in_high_risk_district() {
        let dataset = seed::demo_dataset(now());
        let malappuram = dataset
            .districts
            .iter()
            .find(|d| d.district_name == "Malappuram")
            .unwrap();
        assert!(malappuram.risk_ratings.overall_risk > 6.0);

        let recent = dataset
            .disease_cases
            .iter()
            .filter(|c| c.district == "Malappuram" && now() - c.admission_date < Duration::days(7))
            .count();
        assert!(recent > 5, "seed should trip the district activity rule");
    }
}
