//! Headline statistics and dashboard loading.
//!
//! Totals count every record in the system. Everything else is derived from a
//! sample of the most recent cases, restricted to the viewer's district when
//! the viewer is a doctor.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{debug, error};

use healthwatch_contracts::{
    case::DiseaseCase,
    district::RecordFilter,
    error::HealthResult,
    profile::{UserProfile, View},
};
use healthwatch_core::{load_snapshot, traits::RecordStore};

use crate::charts::ChartData;

/// Most recent cases fed into the statistics and charts.
pub const CASE_SAMPLE_LIMIT: usize = 1000;

/// Window for the "recent cases" tile.
pub const RECENT_DAYS: i64 = 7;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_patients: usize,
    pub total_cases: usize,
    pub migrant_cases: usize,
    /// Severe or Critical.
    pub severe_cases: usize,
    pub recent_cases: usize,
    pub districts_affected: usize,
}

/// A fully computed dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    /// Number of cases the derived figures were computed from.
    pub sample_size: usize,
    pub stats: DashboardStats,
    pub charts: ChartData,
}

/// The newest `CASE_SAMPLE_LIMIT` cases admitted by `filter`.
pub fn case_sample(cases: &[DiseaseCase], filter: &RecordFilter) -> Vec<DiseaseCase> {
    let mut sample: Vec<DiseaseCase> = cases
        .iter()
        .filter(|c| filter.admits(&c.district))
        .cloned()
        .collect();
    sample.sort_by(|a, b| b.admission_date.cmp(&a.admission_date));
    sample.truncate(CASE_SAMPLE_LIMIT);
    sample
}

/// Compute the stat tiles from system totals and a case sample.
pub fn summarize(
    total_patients: usize,
    total_cases: usize,
    sample: &[DiseaseCase],
    now: DateTime<Utc>,
) -> DashboardStats {
    let week_ago = now - Duration::days(RECENT_DAYS);
    DashboardStats {
        total_patients,
        total_cases,
        migrant_cases: sample.iter().filter(|c| c.is_migrant_patient).count(),
        severe_cases: sample.iter().filter(|c| c.severity.is_severe()).count(),
        recent_cases: sample.iter().filter(|c| c.admission_date >= week_ago).count(),
        districts_affected: sample
            .iter()
            .map(|c| c.district.as_str())
            .collect::<HashSet<_>>()
            .len(),
    }
}

/// Load records from `store` and build the dashboard `profile` sees.
///
/// Fails with `AccessDenied` before touching the store if the role may not
/// open the dashboard.
pub async fn load_dashboard(
    store: Arc<dyn RecordStore>,
    profile: &UserProfile,
    now: DateTime<Utc>,
) -> HealthResult<Dashboard> {
    profile.authorize(View::Dashboard)?;

    let snapshot = load_snapshot(store, None).await.map_err(|e| {
        error!(error = %e, "dashboard load failed");
        e
    })?;

    let filter = RecordFilter::from_scope(profile.scope());
    let sample = case_sample(&snapshot.cases, &filter);
    debug!(
        scope = ?filter.district,
        sample = sample.len(),
        total_cases = snapshot.cases.len(),
        "dashboard sample selected"
    );

    Ok(Dashboard {
        title: profile.dashboard_title(),
        generated_at: now,
        sample_size: sample.len(),
        stats: summarize(snapshot.patients.len(), snapshot.cases.len(), &sample, now),
        charts: ChartData::build(&sample, now),
    })
}
