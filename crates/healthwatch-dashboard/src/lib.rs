//! # healthwatch-dashboard
//!
//! Aggregate statistics and chart series for the HealthWatch dashboard view.
//!
//! `load_dashboard` reads every collection through `healthwatch-core`, picks
//! the newest `CASE_SAMPLE_LIMIT` cases in the viewer's scope, and derives
//! the stat tiles (`DashboardStats`) and chart series (`ChartData`) from that
//! sample. The pure functions `summarize` and `ChartData::build` are exposed
//! for callers that already hold the records.

pub mod charts;
pub mod summary;

pub use charts::{ChartData, DiseaseBar, DistrictBar, SeveritySlice, TrendPoint};
pub use summary::{case_sample, load_dashboard, summarize, Dashboard, DashboardStats};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

    use healthwatch_contracts::{
        case::{DiseaseCase, Severity},
        district::{District, RecordFilter},
        error::{HealthError, HealthResult},
        patient::Patient,
        profile::{Role, UserProfile},
    };
    use healthwatch_core::traits::RecordStore;

    use super::{
        case_sample, charts, load_dashboard, summarize, summary::CASE_SAMPLE_LIMIT, ChartData,
    };

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 15, 9, 30, 0).unwrap()
    }

    fn case(
        id: usize,
        district: &str,
        disease: &str,
        days_ago: i64,
        migrant: bool,
        severity: Severity,
    ) -> DiseaseCase {
        DiseaseCase {
            id: format!("c{id}"),
            case_id: format!("DC-{id:04}"),
            patient_id: format!("KL{id:08}"),
            hospital_id: "H-1".to_string(),
            district: district.to_string(),
            disease_name: disease.to_string(),
            disease_category: "Vector-borne".to_string(),
            admission_date: now() - Duration::days(days_ago),
            is_migrant_patient: migrant,
            severity,
            outcome: None,
            symptoms: vec![],
            treatment_plan: None,
        }
    }

    fn sample_cases() -> Vec<DiseaseCase> {
        vec![
            case(1, "Ernakulam", "Dengue", 1, true, Severity::Mild),
            case(2, "Ernakulam", "Dengue", 1, false, Severity::Severe),
            case(3, "Ernakulam", "Malaria", 3, true, Severity::Critical),
            case(4, "Kollam", "Dengue", 10, false, Severity::Moderate),
            case(5, "Kollam", "Typhoid", 45, true, Severity::Mild),
            case(6, "Wayanad", "Malaria", 8, true, Severity::Moderate),
        ]
    }

    fn profile(role: Role, district: Option<&str>) -> UserProfile {
        UserProfile {
            id: "u1".to_string(),
            email: "u1@example.org".to_string(),
            full_name: "Test User".to_string(),
            role,
            district: district.map(str::to_string),
            hospital_id: None,
        }
    }

    /// Serves fixed collections and counts nothing.
    struct FixedStore {
        patients: usize,
        cases: Vec<DiseaseCase>,
    }

    impl RecordStore for FixedStore {
        fn list_patients(&self, _filter: &RecordFilter) -> HealthResult<Vec<Patient>> {
            let created = now();
            Ok((0..self.patients)
                .map(|i| Patient {
                    id: format!("p{i}"),
                    patient_id: format!("KL{i:08}"),
                    name: format!("Patient {i}"),
                    age: 30,
                    gender: healthwatch_contracts::patient::Gender::Male,
                    migrant: i % 2 == 0,
                    hospital_id: "H-1".to_string(),
                    district: "Kollam".to_string(),
                    contact_number: None,
                    address: None,
                    last_checkup: None,
                    created_at: created,
                    updated_at: created,
                    created_by: None,
                })
                .collect())
        }

        fn list_disease_cases(&self, filter: &RecordFilter) -> HealthResult<Vec<DiseaseCase>> {
            Ok(self
                .cases
                .iter()
                .filter(|c| filter.admits(&c.district))
                .cloned()
                .collect())
        }

        fn list_districts(&self) -> HealthResult<Vec<District>> {
            Ok(vec![])
        }
    }

    struct FailingStore;

    impl RecordStore for FailingStore {
        fn list_patients(&self, _filter: &RecordFilter) -> HealthResult<Vec<Patient>> {
            Ok(vec![])
        }

        fn list_disease_cases(&self, _filter: &RecordFilter) -> HealthResult<Vec<DiseaseCase>> {
            Err(HealthError::data_access("disease_cases", "connection reset"))
        }

        fn list_districts(&self) -> HealthResult<Vec<District>> {
            Ok(vec![])
        }
    }

    // ── Stats ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_summarize_counts_sample() {
        let stats = summarize(40, 120, &sample_cases(), now());

        assert_eq!(stats.total_patients, 40);
        assert_eq!(stats.total_cases, 120);
        assert_eq!(stats.migrant_cases, 4);
        assert_eq!(stats.severe_cases, 2);
        assert_eq!(stats.recent_cases, 3);
        assert_eq!(stats.districts_affected, 3);
    }

    #[test]
    fn test_recent_window_boundary_is_inclusive() {
        let cases = vec![case(1, "Kollam", "Dengue", 7, false, Severity::Mild)];
        assert_eq!(summarize(0, 1, &cases, now()).recent_cases, 1);
    }

    #[test]
    fn test_case_sample_scopes_orders_and_caps() {
        let mut cases: Vec<DiseaseCase> = (0..CASE_SAMPLE_LIMIT + 5)
            .map(|i| case(i, "Kollam", "Dengue", (i % 60) as i64 + 1, false, Severity::Mild))
            .collect();
        cases.push(case(9999, "Idukki", "Dengue", 0, true, Severity::Mild));

        let all = case_sample(&cases, &RecordFilter::all());
        assert_eq!(all.len(), CASE_SAMPLE_LIMIT);
        assert_eq!(all[0].id, "c9999");
        assert!(all
            .windows(2)
            .all(|w| w[0].admission_date >= w[1].admission_date));

        let idukki = case_sample(&cases, &RecordFilter::district("Idukki"));
        assert_eq!(idukki.len(), 1);
    }

    // ── Charts ────────────────────────────────────────────────────────────────

    #[test]
    fn test_district_series_splits_and_ranks() {
        let bars = charts::district_series(&sample_cases());

        assert_eq!(bars[0].name, "Ernakulam");
        assert_eq!((bars[0].total, bars[0].migrant, bars[0].local), (3, 2, 1));
        assert_eq!(bars[1].name, "Kollam");
        assert_eq!(bars[2].name, "Wayanad");
    }

    #[test]
    fn test_district_series_keeps_top_ten() {
        let cases: Vec<DiseaseCase> = healthwatch_contracts::district::KERALA_DISTRICTS
            .iter()
            .enumerate()
            .flat_map(|(i, d)| {
                (0..=i).map(move |j| case(i * 100 + j, d, "Dengue", 1, false, Severity::Mild))
            })
            .collect();

        let bars = charts::district_series(&cases);
        assert_eq!(bars.len(), 10);
        assert_eq!(bars[0].total, 14);
        assert_eq!(bars[9].total, 5);
    }

    #[test]
    fn test_severity_series_fixed_order_and_colors() {
        let slices = charts::severity_series(&sample_cases());

        let order: Vec<Severity> = slices.iter().map(|s| s.severity).collect();
        assert_eq!(order, Severity::ALL.to_vec());
        let values: Vec<usize> = slices.iter().map(|s| s.value).collect();
        assert_eq!(values, vec![2, 2, 1, 1]);
        assert_eq!(slices[0].color, "#16a34a");
        assert_eq!(slices[3].color, "#dc2626");
    }

    #[test]
    fn test_trend_series_ascending_within_thirty_days() {
        let trend = charts::trend_series(&sample_cases(), now());

        let dates: Vec<NaiveDate> = trend.iter().map(|p| p.date).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2026, 6, 5).unwrap(),
                NaiveDate::from_ymd_opt(2026, 6, 7).unwrap(),
                NaiveDate::from_ymd_opt(2026, 6, 12).unwrap(),
                NaiveDate::from_ymd_opt(2026, 6, 14).unwrap(),
            ]
        );
        let last = trend.last().unwrap();
        assert_eq!((last.cases, last.migrant), (2, 1));
    }

    #[test]
    fn test_disease_series_ranked() {
        let bars = charts::disease_series(&sample_cases());
        assert_eq!(bars[0].name, "Dengue");
        assert_eq!(bars[0].cases, 3);
        assert_eq!(bars[1].name, "Malaria");
        assert_eq!(bars[2].name, "Typhoid");
    }

    #[test]
    fn test_empty_sample_yields_zero_severity_slices() {
        let charts = ChartData::build(&[], now());
        assert!(charts.district_cases.is_empty());
        assert!(charts.trend.is_empty());
        assert!(charts.diseases.is_empty());
        assert!(charts.severity.iter().all(|s| s.value == 0));
        assert_eq!(charts.severity.len(), 4);
    }

    // ── Loading ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_doctor_dashboard_is_scoped_but_totals_are_not() {
        let store = Arc::new(FixedStore {
            patients: 12,
            cases: sample_cases(),
        });
        let doctor = profile(Role::Doctor, Some("Ernakulam"));

        let dashboard = load_dashboard(store, &doctor, now()).await.unwrap();

        assert_eq!(dashboard.title, "Ernakulam District Health Overview");
        assert_eq!(dashboard.sample_size, 3);
        assert_eq!(dashboard.stats.total_patients, 12);
        assert_eq!(dashboard.stats.total_cases, 6);
        assert_eq!(dashboard.stats.districts_affected, 1);
        assert_eq!(dashboard.charts.district_cases.len(), 1);
    }

    #[tokio::test]
    async fn test_official_dashboard_sees_everything() {
        let store = Arc::new(FixedStore {
            patients: 3,
            cases: sample_cases(),
        });
        let official = profile(Role::GovernmentOfficial, Some("Kollam"));

        let dashboard = load_dashboard(store, &official, now()).await.unwrap();

        assert_eq!(dashboard.title, "Kerala Health System Overview");
        assert_eq!(dashboard.sample_size, 6);
        assert_eq!(dashboard.stats.districts_affected, 3);
    }

    #[tokio::test]
    async fn test_migrant_role_is_denied() {
        let store = Arc::new(FixedStore {
            patients: 0,
            cases: vec![],
        });
        let result = load_dashboard(store, &profile(Role::Migrant, None), now()).await;
        assert!(matches!(result, Err(HealthError::AccessDenied { .. })));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let result = load_dashboard(
            Arc::new(FailingStore),
            &profile(Role::GovernmentOfficial, None),
            now(),
        )
        .await;
        assert!(matches!(result, Err(HealthError::DataAccess { .. })));
    }

    #[test]
    fn test_dashboard_serializes() {
        let charts = ChartData::build(&sample_cases(), now());
        let json = serde_json::to_value(&charts).unwrap();
        assert_eq!(json["severity"][0]["severity"], "Mild");
        assert_eq!(json["trend"][0]["date"], "2026-06-05");
    }
}
