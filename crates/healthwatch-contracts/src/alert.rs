//! Alert view-model types.
//!
//! Alerts are derived from patient, case, and district snapshots on every
//! generation pass. They are never persisted; the deterministic `id` is the
//! only identity they carry between passes.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::HealthError;

/// What condition an alert reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    VaccineDue,
    MedicationReminder,
    FollowUp,
    TbScreening,
    HighRiskArea,
}

impl AlertType {
    /// Stable tag used in serialized form and as the alert id prefix.
    pub fn tag(&self) -> &'static str {
        match self {
            AlertType::VaccineDue => "vaccine_due",
            AlertType::MedicationReminder => "medication_reminder",
            AlertType::FollowUp => "follow_up",
            AlertType::TbScreening => "tb_screening",
            AlertType::HighRiskArea => "high_risk_area",
        }
    }

    /// Build the deterministic alert id for `entity_id`.
    ///
    /// At most one alert of a given type exists per source entity per pass.
    pub fn alert_id(&self, entity_id: &str) -> String {
        format!("{}_{}", self.tag(), entity_id)
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Alert urgency. Declaration order is the sort order, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// All priorities, most urgent first.
    pub const DESCENDING: [Priority; 4] =
        [Priority::Urgent, Priority::High, Priority::Medium, Priority::Low];

    /// Fixed sort rank: urgent=4, high=3, medium=2, low=1.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Urgent => 4,
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Urgent => "urgent",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = HealthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "urgent" => Ok(Priority::Urgent),
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(HealthError::validation(
                "priority",
                format!("unknown priority '{other}'"),
            )),
        }
    }
}

/// The priority selector on the alerts view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

impl PriorityFilter {
    /// Return true if an alert of `priority` passes this filter.
    pub fn admits(&self, priority: Priority) -> bool {
        match self {
            PriorityFilter::All => true,
            PriorityFilter::Only(wanted) => *wanted == priority,
        }
    }
}

impl FromStr for PriorityFilter {
    type Err = HealthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(PriorityFilter::All)
        } else {
            s.parse().map(PriorityFilter::Only)
        }
    }
}

/// One actionable notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// `"{type}_{entity id}"`, unique within one generation pass.
    pub id: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub priority: Priority,
    pub title: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    /// When the underlying condition becomes (or became) due.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    /// Evaluation time of the pass that produced this alert.
    pub created_at: DateTime<Utc>,
}
