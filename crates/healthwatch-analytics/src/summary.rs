//! Per-district disease summaries returned by the analytics service.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Who a disease mostly affects in a district.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MainlyAffected {
    #[serde(default)]
    pub age_group: String,
    #[serde(default)]
    pub gender: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DiseaseDetails {
    #[serde(default)]
    pub cases: u64,
    #[serde(default)]
    pub mainly_affected: MainlyAffected,
    #[serde(default)]
    pub possible_causes: Vec<String>,
}

/// Body of `GET /district_info`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DistrictInfo {
    #[serde(default)]
    pub disease_summary: BTreeMap<String, DiseaseDetails>,
}

impl DistrictInfo {
    /// Total reported cases, saturating at `u64::MAX`.
    pub fn total_cases(&self) -> u64 {
        self.disease_summary
            .values()
            .map(|d| d.cases)
            .fold(0, u64::saturating_add)
    }

    /// Diseases by case count, highest first. Ties keep name order.
    pub fn ranked(&self) -> Vec<(&str, &DiseaseDetails)> {
        let mut diseases: Vec<(&str, &DiseaseDetails)> = self
            .disease_summary
            .iter()
            .map(|(name, details)| (name.as_str(), details))
            .collect();
        diseases.sort_by(|a, b| b.1.cases.cmp(&a.1.cases));
        diseases
    }

    pub fn band(&self) -> SeverityBand {
        SeverityBand::from_total(self.total_cases())
    }
}

/// Marker colour band by total reported cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityBand {
    /// Fewer than 2500 cases.
    Low,
    /// 2500 to 4499 cases.
    Elevated,
    High,
}

impl SeverityBand {
    pub const ELEVATED_FROM: u64 = 2500;
    pub const HIGH_FROM: u64 = 4500;

    pub fn from_total(total_cases: u64) -> Self {
        if total_cases < Self::ELEVATED_FROM {
            SeverityBand::Low
        } else if total_cases < Self::HIGH_FROM {
            SeverityBand::Elevated
        } else {
            SeverityBand::High
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            SeverityBand::Low => "#2ecc71",
            SeverityBand::Elevated => "#f39c12",
            SeverityBand::High => "#e74c3c",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SeverityBand::Low => "low",
            SeverityBand::Elevated => "elevated",
            SeverityBand::High => "high",
        }
    }
}
