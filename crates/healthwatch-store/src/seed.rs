//! Simulated Kerala records for demos and local runs.
//!
//! All data in this module is hardcoded and fictional. Dates are expressed
//! relative to a caller-supplied `now` so the same seed always triggers the
//! same alerts, whatever day it is loaded.

use chrono::{DateTime, Duration, Utc};

use healthwatch_contracts::{
    case::{DiseaseCase, Outcome, Severity},
    district::{district_centre, District, RiskRatings},
    patient::{Gender, Patient},
};

use crate::dataset::Dataset;

// ── Districts ─────────────────────────────────────────────────────────────────

/// (name, region, water, sanitation, crowding, overall)
const DISTRICT_TABLE: [(&str, &str, f64, f64, f64, f64); 14] = [
    ("Thiruvananthapuram", "South", 4.2, 3.8, 6.1, 4.9),
    ("Kollam", "South", 4.8, 4.1, 5.2, 4.7),
    ("Pathanamthitta", "South", 3.1, 2.9, 2.4, 2.8),
    ("Alappuzha", "Central", 7.4, 6.2, 5.5, 6.4),
    ("Kottayam", "Central", 3.9, 3.2, 3.0, 3.4),
    ("Idukki", "Central", 5.6, 5.9, 2.2, 4.6),
    ("Ernakulam", "Central", 5.1, 5.8, 8.9, 6.9),
    ("Thrissur", "Central", 4.6, 4.4, 5.8, 5.0),
    ("Palakkad", "North", 6.3, 5.7, 4.1, 5.4),
    ("Malappuram", "North", 7.9, 7.2, 8.3, 7.8),
    ("Kozhikode", "North", 5.5, 5.0, 7.0, 5.9),
    ("Wayanad", "North", 6.8, 6.6, 2.9, 5.5),
    ("Kannur", "North", 4.4, 4.0, 4.8, 4.4),
    ("Kasaragod", "North", 6.1, 6.4, 4.3, 5.6),
];

/// The fourteen Kerala districts with coordinates and risk ratings.
pub fn kerala_districts() -> Vec<District> {
    DISTRICT_TABLE
        .iter()
        .enumerate()
        .map(
            |(i, &(name, region, water, sanitation, crowding, overall))| District {
                id: format!("dist-{:02}", i + 1),
                district_name: name.to_string(),
                region: region.to_string(),
                coordinates: district_centre(name),
                risk_ratings: RiskRatings {
                    water_risk: water,
                    sanitation_risk: sanitation,
                    crowding_risk: crowding,
                    overall_risk: overall,
                },
            },
        )
        .collect()
}

// ── Patients ──────────────────────────────────────────────────────────────────

/// (name, age, gender, migrant, district, days since last checkup)
const PATIENT_TABLE: [(&str, u32, Gender, bool, &str, Option<i64>); 10] = [
    ("Rahul Das", 29, Gender::Male, true, "Ernakulam", None),
    ("Sunita Oraon", 34, Gender::Female, true, "Ernakulam", Some(210)),
    ("Anil Kumar", 52, Gender::Male, false, "Ernakulam", Some(400)),
    ("Meera Nair", 41, Gender::Female, false, "Thrissur", Some(320)),
    ("Bikash Mondal", 24, Gender::Male, true, "Malappuram", Some(30)),
    ("Farhan Ali", 31, Gender::Male, true, "Malappuram", Some(380)),
    ("Lakshmi Menon", 63, Gender::Female, false, "Kozhikode", Some(90)),
    ("Ravi Prasad", 45, Gender::Male, true, "Kozhikode", Some(150)),
    ("Priya Thomas", 27, Gender::Female, false, "Kottayam", None),
    ("Sanjay Yadav", 38, Gender::Male, true, "Palakkad", Some(190)),
];

fn hospital_for(district: &str) -> String {
    format!("H-{}", &district[..3].to_uppercase())
}

/// Ten registered patients, half of them migrant workers.
pub fn demo_patients(now: DateTime<Utc>) -> Vec<Patient> {
    PATIENT_TABLE
        .iter()
        .enumerate()
        .map(|(i, &(name, age, gender, migrant, district, checkup_days))| {
            let created_at = now - Duration::days(500 - i as i64 * 10);
            Patient {
                id: format!("pat-{:03}", i + 1),
                patient_id: format!("KL{:08}", 20_250_001 + i),
                name: name.to_string(),
                age,
                gender,
                migrant,
                hospital_id: hospital_for(district),
                district: district.to_string(),
                contact_number: Some(format!("+91 94470 {:05}", 10_000 + i * 37)),
                address: None,
                last_checkup: checkup_days.map(|d| now - Duration::days(d)),
                created_at,
                updated_at: created_at,
                created_by: Some("seed".to_string()),
            }
        })
        .collect()
}

// ── Disease Cases ─────────────────────────────────────────────────────────────

/// (patient index, district, disease, category, days since admission, severity, outcome)
const CASE_TABLE: [(usize, &str, &str, &str, i64, Severity, Option<Outcome>); 16] = [
    (0, "Ernakulam", "Tuberculosis", "Respiratory", 40, Severity::Severe, Some(Outcome::UnderTreatment)),
    (1, "Ernakulam", "Dengue", "Vector-borne", 3, Severity::Moderate, Some(Outcome::UnderTreatment)),
    (2, "Ernakulam", "Hepatitis A", "Water-borne", 25, Severity::Mild, Some(Outcome::Recovered)),
    (3, "Thrissur", "Leptospirosis", "Bacterial", 18, Severity::Critical, Some(Outcome::UnderTreatment)),
    (4, "Malappuram", "Malaria", "Vector-borne", 1, Severity::Moderate, Some(Outcome::UnderTreatment)),
    (5, "Malappuram", "Cholera", "Water-borne", 2, Severity::Severe, Some(Outcome::UnderTreatment)),
    (4, "Malappuram", "Dengue", "Vector-borne", 2, Severity::Mild, Some(Outcome::Recovered)),
    (5, "Malappuram", "Typhoid", "Water-borne", 4, Severity::Moderate, Some(Outcome::UnderTreatment)),
    (4, "Malappuram", "Malaria", "Vector-borne", 5, Severity::Critical, Some(Outcome::Transferred)),
    (5, "Malappuram", "Hepatitis A", "Water-borne", 6, Severity::Mild, None),
    (4, "Malappuram", "Dengue", "Vector-borne", 6, Severity::Mild, Some(Outcome::Recovered)),
    (6, "Kozhikode", "Chikungunya", "Vector-borne", 60, Severity::Moderate, Some(Outcome::Recovered)),
    (7, "Kozhikode", "Tuberculosis", "Respiratory", 21, Severity::Critical, Some(Outcome::UnderTreatment)),
    (8, "Kottayam", "Scrub Typhus", "Vector-borne", 12, Severity::Severe, Some(Outcome::UnderTreatment)),
    (9, "Palakkad", "Malaria", "Vector-borne", 15, Severity::Mild, Some(Outcome::UnderTreatment)),
    (9, "Palakkad", "Heat Stroke", "Environmental", 200, Severity::Critical, Some(Outcome::Deceased)),
];

/// Sixteen admissions, including a cluster in high-risk Malappuram.
pub fn demo_cases(now: DateTime<Utc>, patients: &[Patient]) -> Vec<DiseaseCase> {
    CASE_TABLE
        .iter()
        .enumerate()
        .filter_map(
            |(i, &(patient_idx, district, disease, category, days, severity, outcome))| {
                let patient = patients.get(patient_idx)?;
                Some(DiseaseCase {
                    id: format!("case-{:03}", i + 1),
                    case_id: format!("DC-2026-{:04}", i + 1),
                    patient_id: patient.patient_id.clone(),
                    hospital_id: patient.hospital_id.clone(),
                    district: district.to_string(),
                    disease_name: disease.to_string(),
                    disease_category: category.to_string(),
                    admission_date: now - Duration::days(days),
                    is_migrant_patient: patient.migrant,
                    severity,
                    outcome,
                    symptoms: vec![],
                    treatment_plan: None,
                })
            },
        )
        .collect()
}

/// The complete seed dataset as of `now`.
pub fn demo_dataset(now: DateTime<Utc>) -> Dataset {
    let patients = demo_patients(now);
    let disease_cases = demo_cases(now, &patients);
    Dataset {
        patients,
        disease_cases,
        districts: kerala_districts(),
    }
}
