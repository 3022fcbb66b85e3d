//! Alert rule engine.
//!
//! `AlertEngine` turns a snapshot of patients, cases, and districts into a
//! prioritized alert list. It is a pure function of its inputs and the
//! injected `now`; it never reads the wall clock and never mutates input.
//!
//! Evaluation algorithm:
//!
//! 1. Run each rule over the snapshot, in this order:
//!    a. checkup recency → `vaccine_due` (high) or `follow_up` (medium)
//!    b. migrant TB screening → `tb_screening` (high)
//!    c. active-case medication review → `medication_reminder`
//!       (urgent for critical cases, medium otherwise)
//!    d. high-risk district activity → `high_risk_area` (urgent)
//! 2. Drop any alert whose id was already emitted in this pass.
//! 3. Stable-sort by priority rank descending, then `created_at` descending.
//!
//! Missing checkup data is deliberately treated differently by rules (a) and
//! (b): an unknown checkup date never makes a vaccination overdue, but it
//! always makes a migrant due for TB screening.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use healthwatch_contracts::{
    alert::{Alert, AlertType, Priority},
    case::{DiseaseCase, Severity},
    district::District,
    patient::Patient,
};
use healthwatch_core::Snapshot;

use crate::rule::AlertThresholds;

/// Derives alerts from record snapshots using a fixed set of threshold rules.
#[derive(Debug, Clone, Default)]
pub struct AlertEngine {
    thresholds: AlertThresholds,
}

impl AlertEngine {
    /// Build an engine with the given thresholds.
    pub fn new(thresholds: AlertThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &AlertThresholds {
        &self.thresholds
    }

    /// Generate the ordered alert list for `snapshot` as of `now`.
    pub fn generate_from(&self, snapshot: &Snapshot, now: DateTime<Utc>) -> Vec<Alert> {
        self.generate(&snapshot.patients, &snapshot.cases, &snapshot.districts, now)
    }

    /// Generate the ordered alert list as of `now`.
    ///
    /// Inputs are trusted as given: if the caller scoped patients and cases
    /// to one district, the engine does not refilter. Empty inputs produce an
    /// empty list.
    pub fn generate(
        &self,
        patients: &[Patient],
        cases: &[DiseaseCase],
        districts: &[District],
        now: DateTime<Utc>,
    ) -> Vec<Alert> {
        let mut out = AlertSink::default();

        for patient in patients {
            self.checkup_rule(patient, now, &mut out);
        }
        let checkup_count = out.alerts.len();

        for patient in patients.iter().filter(|p| p.migrant) {
            self.tb_screening_rule(patient, now, &mut out);
        }
        let tb_count = out.alerts.len() - checkup_count;

        for case in cases.iter().filter(|c| c.is_under_treatment()) {
            self.medication_rule(case, now, &mut out);
        }
        let medication_count = out.alerts.len() - checkup_count - tb_count;

        for district in districts {
            self.district_activity_rule(district, cases, now, &mut out);
        }
        let district_count = out.alerts.len() - checkup_count - tb_count - medication_count;

        debug!(
            checkup = checkup_count,
            tb_screening = tb_count,
            medication = medication_count,
            high_risk_area = district_count,
            duplicates_dropped = out.duplicates,
            "alert rules evaluated"
        );

        let mut alerts = out.alerts;
        sort_alerts(&mut alerts);
        alerts
    }

    // ── Rules ────────────────────────────────────────────────────────────────

    /// Rule 1: annual vaccination / checkup recency.
    fn checkup_rule(&self, patient: &Patient, now: DateTime<Utc>, out: &mut AlertSink) {
        let Some(last_checkup) = patient.last_checkup else {
            return;
        };

        let days_since = (now - last_checkup).num_days();
        let due_date = Duration::try_days(self.thresholds.vaccine_due_days)
            .and_then(|d| last_checkup.checked_add_signed(d));

        let (alert_type, priority, title, message) = if days_since > self.thresholds.vaccine_due_days
        {
            (
                AlertType::VaccineDue,
                Priority::High,
                "Annual Vaccination Due",
                format!(
                    "Patient {} is due for annual vaccination (last checkup: {})",
                    patient.name,
                    last_checkup.format("%Y-%m-%d")
                ),
            )
        } else if days_since > self.thresholds.follow_up_days {
            (
                AlertType::FollowUp,
                Priority::Medium,
                "Annual Checkup Approaching",
                format!("Patient {} should schedule annual checkup soon", patient.name),
            )
        } else {
            return;
        };

        out.push(Alert {
            id: alert_type.alert_id(&patient.id),
            alert_type,
            priority,
            title: title.to_string(),
            message,
            patient_id: Some(patient.patient_id.clone()),
            patient_name: Some(patient.name.clone()),
            district: Some(patient.district.clone()),
            due_date,
            created_at: now,
        });
    }

    /// Rule 2: TB screening for migrant patients. Caller passes migrants only.
    fn tb_screening_rule(&self, patient: &Patient, now: DateTime<Utc>, out: &mut AlertSink) {
        let overdue = match patient.last_checkup {
            None => true,
            Some(last_checkup) => Duration::try_days(self.thresholds.tb_screening_days)
                .is_some_and(|limit| now - last_checkup > limit),
        };
        if !overdue {
            return;
        }

        out.push(Alert {
            id: AlertType::TbScreening.alert_id(&patient.id),
            alert_type: AlertType::TbScreening,
            priority: Priority::High,
            title: "TB Screening Required".to_string(),
            message: format!(
                "Migrant worker {} requires TB screening (high-risk category)",
                patient.name
            ),
            patient_id: Some(patient.patient_id.clone()),
            patient_name: Some(patient.name.clone()),
            district: Some(patient.district.clone()),
            due_date: Some(now),
            created_at: now,
        });
    }

    /// Rule 3: medication review for cases still under treatment.
    fn medication_rule(&self, case: &DiseaseCase, now: DateTime<Utc>, out: &mut AlertSink) {
        let days_since_admission = (now - case.admission_date).num_days();
        if days_since_admission <= self.thresholds.medication_review_days {
            return;
        }

        out.push(Alert {
            id: AlertType::MedicationReminder.alert_id(&case.id),
            alert_type: AlertType::MedicationReminder,
            priority: medication_priority(case.severity),
            title: "Medication Follow-up Required".to_string(),
            message: format!(
                "Patient with {} requires medication review ({} days since admission)",
                case.disease_name, days_since_admission
            ),
            patient_id: Some(case.patient_id.clone()),
            patient_name: None,
            district: Some(case.district.clone()),
            due_date: Some(now),
            created_at: now,
        });
    }

    /// Rule 4: surge of admissions in a high-risk district.
    ///
    /// Counts cases, not distinct patients: a readmitted patient counts once
    /// per admission.
    fn district_activity_rule(
        &self,
        district: &District,
        cases: &[DiseaseCase],
        now: DateTime<Utc>,
        out: &mut AlertSink,
    ) {
        if district.risk_ratings.overall_risk <= self.thresholds.district_risk_threshold {
            return;
        }

        let window = Duration::try_days(self.thresholds.recent_case_window_days)
            .unwrap_or(Duration::MAX);
        let recent_cases = cases
            .iter()
            .filter(|c| c.district == district.district_name && now - c.admission_date < window)
            .count();

        if recent_cases <= self.thresholds.recent_case_threshold {
            return;
        }

        out.push(Alert {
            id: AlertType::HighRiskArea.alert_id(&district.id),
            alert_type: AlertType::HighRiskArea,
            priority: Priority::Urgent,
            title: "High Risk Area Alert".to_string(),
            message: format!(
                "{} district showing increased disease activity ({} cases in last {} days)",
                district.district_name, recent_cases, self.thresholds.recent_case_window_days
            ),
            patient_id: None,
            patient_name: None,
            district: Some(district.district_name.clone()),
            due_date: Some(now),
            created_at: now,
        });
    }
}

/// Priority of a medication reminder for a case of the given severity.
pub fn medication_priority(severity: Severity) -> Priority {
    match severity {
        Severity::Critical => Priority::Urgent,
        Severity::Mild | Severity::Moderate | Severity::Severe => Priority::Medium,
    }
}

/// Order alerts by priority rank descending, newest first within a rank.
///
/// The sort is stable: alerts equal on both keys keep emission order.
pub fn sort_alerts(alerts: &mut [Alert]) {
    alerts.sort_by(|a, b| {
        b.priority
            .rank()
            .cmp(&a.priority.rank())
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}

// ── Emission ─────────────────────────────────────────────────────────────────

/// Collects alerts for one pass, keeping the first alert per id.
#[derive(Default)]
struct AlertSink {
    alerts: Vec<Alert>,
    seen: HashSet<String>,
    duplicates: usize,
}

impl AlertSink {
    fn push(&mut self, alert: Alert) {
        if self.seen.insert(alert.id.clone()) {
            self.alerts.push(alert);
        } else {
            // Only reachable when the snapshot itself repeats an entity id.
            warn!(alert_id = %alert.id, "duplicate alert id in one pass; keeping the first");
            self.duplicates += 1;
        }
    }
}
