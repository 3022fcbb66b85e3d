//! Alert thresholds and their TOML schema.
//!
//! Every rule in the engine compares a time span or a count against one of
//! these values. The defaults are the production settings; a deployment may
//! override any subset from TOML.
//!
//! Example:
//! ```toml
//! vaccine_due_days = 365
//! follow_up_days = 300
//! tb_screening_days = 180
//! medication_review_days = 14
//! district_risk_threshold = 6.0
//! recent_case_window_days = 7
//! recent_case_threshold = 5
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use healthwatch_contracts::error::{HealthError, HealthResult};

/// Upper bound for every day-valued threshold (one hundred years).
pub const MAX_THRESHOLD_DAYS: i64 = 36_500;

/// Thresholds for the four alert rules.
///
/// All comparisons are strict: a patient exactly `vaccine_due_days` days
/// past their checkup is not yet overdue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AlertThresholds {
    /// Whole days since last checkup after which vaccination is overdue.
    pub vaccine_due_days: i64,

    /// Whole days since last checkup after which a follow-up is suggested.
    /// Must be below `vaccine_due_days`.
    pub follow_up_days: i64,

    /// Span since last checkup after which a migrant needs TB screening.
    pub tb_screening_days: i64,

    /// Whole days since admission after which an active case needs a
    /// medication review.
    pub medication_review_days: i64,

    /// A district is high-risk when `overall_risk` exceeds this.
    pub district_risk_threshold: f64,

    /// Width of the "recent admissions" window, in days.
    pub recent_case_window_days: i64,

    /// A high-risk district alerts when recent admissions exceed this.
    pub recent_case_threshold: usize,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            vaccine_due_days: 365,
            follow_up_days: 300,
            tb_screening_days: 180,
            medication_review_days: 14,
            district_risk_threshold: 6.0,
            recent_case_window_days: 7,
            recent_case_threshold: 5,
        }
    }
}

impl AlertThresholds {
    /// Parse `s` as TOML and validate the result.
    ///
    /// Keys that are absent keep their default. Returns
    /// `HealthError::ConfigError` if the TOML is malformed, names an unknown
    /// key, or fails `validate`.
    pub fn from_toml_str(s: &str) -> HealthResult<Self> {
        let thresholds: AlertThresholds =
            toml::from_str(s).map_err(|e| HealthError::ConfigError {
                reason: format!("failed to parse alert thresholds TOML: {}", e),
            })?;
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Read the file at `path` and parse it as alert thresholds.
    pub fn from_file(path: &Path) -> HealthResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| HealthError::ConfigError {
            reason: format!("failed to read thresholds file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Reject threshold combinations that would make rules overlap or never
    /// fire.
    pub fn validate(&self) -> HealthResult<()> {
        let day_thresholds = [
            ("vaccine_due_days", self.vaccine_due_days),
            ("follow_up_days", self.follow_up_days),
            ("tb_screening_days", self.tb_screening_days),
            ("medication_review_days", self.medication_review_days),
            ("recent_case_window_days", self.recent_case_window_days),
        ];
        for (key, value) in day_thresholds {
            if !(0..=MAX_THRESHOLD_DAYS).contains(&value) {
                return Err(HealthError::ConfigError {
                    reason: format!(
                        "{key} must be between 0 and {MAX_THRESHOLD_DAYS} days (got {value})"
                    ),
                });
            }
        }

        if self.follow_up_days >= self.vaccine_due_days {
            return Err(HealthError::ConfigError {
                reason: format!(
                    "follow_up_days ({}) must be below vaccine_due_days ({})",
                    self.follow_up_days, self.vaccine_due_days
                ),
            });
        }

        if !(0.0..=10.0).contains(&self.district_risk_threshold) {
            return Err(HealthError::ConfigError {
                reason: format!(
                    "district_risk_threshold must be on the 0-10 scale (got {})",
                    self.district_risk_threshold
                ),
            });
        }

        Ok(())
    }
}
