//! Chart series derived from a case sample.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use healthwatch_contracts::case::{DiseaseCase, Severity};

/// Bars shown on the district and disease charts.
pub const TOP_N: usize = 10;

/// Days covered by the admissions trend line.
pub const TREND_DAYS: i64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistrictBar {
    pub name: String,
    pub total: usize,
    pub migrant: usize,
    pub local: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeveritySlice {
    pub severity: Severity,
    pub value: usize,
    /// Hex colour used for the slice.
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub cases: usize,
    pub migrant: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiseaseBar {
    pub name: String,
    pub cases: usize,
}

/// Every series the dashboard draws.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartData {
    pub district_cases: Vec<DistrictBar>,
    pub severity: Vec<SeveritySlice>,
    pub trend: Vec<TrendPoint>,
    pub diseases: Vec<DiseaseBar>,
}

impl ChartData {
    pub fn build(cases: &[DiseaseCase], now: DateTime<Utc>) -> Self {
        Self {
            district_cases: district_series(cases),
            severity: severity_series(cases),
            trend: trend_series(cases, now),
            diseases: disease_series(cases),
        }
    }
}

pub fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Mild => "#16a34a",
        Severity::Moderate => "#eab308",
        Severity::Severe => "#ea580c",
        Severity::Critical => "#dc2626",
    }
}

/// Cases per district split by migrant status, busiest ten first.
///
/// Ties keep alphabetical order.
pub fn district_series(cases: &[DiseaseCase]) -> Vec<DistrictBar> {
    let mut by_district: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for case in cases {
        let entry = by_district.entry(case.district.as_str()).or_default();
        if case.is_migrant_patient {
            entry.0 += 1;
        } else {
            entry.1 += 1;
        }
    }

    let mut bars: Vec<DistrictBar> = by_district
        .into_iter()
        .map(|(name, (migrant, local))| DistrictBar {
            name: name.to_string(),
            total: migrant + local,
            migrant,
            local,
        })
        .collect();
    bars.sort_by(|a, b| b.total.cmp(&a.total));
    bars.truncate(TOP_N);
    bars
}

/// One slice per severity in escalating order, zero counts included.
pub fn severity_series(cases: &[DiseaseCase]) -> Vec<SeveritySlice> {
    Severity::ALL
        .iter()
        .map(|&severity| SeveritySlice {
            severity,
            value: cases.iter().filter(|c| c.severity == severity).count(),
            color: severity_color(severity),
        })
        .collect()
}

/// Daily admissions over the last thirty days, oldest first.
///
/// Days without admissions are omitted.
pub fn trend_series(cases: &[DiseaseCase], now: DateTime<Utc>) -> Vec<TrendPoint> {
    let since = now - Duration::days(TREND_DAYS);
    let mut by_day: BTreeMap<NaiveDate, (usize, usize)> = BTreeMap::new();
    for case in cases.iter().filter(|c| c.admission_date >= since) {
        let entry = by_day.entry(case.admission_date.date_naive()).or_default();
        entry.0 += 1;
        if case.is_migrant_patient {
            entry.1 += 1;
        }
    }

    by_day
        .into_iter()
        .map(|(date, (cases, migrant))| TrendPoint {
            date,
            cases,
            migrant,
        })
        .collect()
}

/// The ten most frequent diseases.
pub fn disease_series(cases: &[DiseaseCase]) -> Vec<DiseaseBar> {
    let mut by_disease: BTreeMap<&str, usize> = BTreeMap::new();
    for case in cases {
        *by_disease.entry(case.disease_name.as_str()).or_default() += 1;
    }

    let mut bars: Vec<DiseaseBar> = by_disease
        .into_iter()
        .map(|(name, cases)| DiseaseBar {
            name: name.to_string(),
            cases,
        })
        .collect();
    bars.sort_by(|a, b| b.cases.cmp(&a.cases));
    bars.truncate(TOP_N);
    bars
}
