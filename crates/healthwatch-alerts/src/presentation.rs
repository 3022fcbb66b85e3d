//! Display-side helpers for the alerts view: priority filtering and the
//! per-priority stats strip.

use serde::Serialize;

use healthwatch_contracts::alert::{Alert, Priority, PriorityFilter};

/// Return the alerts passing `filter`, preserving engine order.
pub fn filter_alerts(alerts: &[Alert], filter: PriorityFilter) -> Vec<&Alert> {
    alerts.iter().filter(|a| filter.admits(a.priority)).collect()
}

/// Count of alerts at each priority, computed over the unfiltered list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PrioritySummary {
    pub urgent: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl PrioritySummary {
    /// Tally `alerts` by priority.
    pub fn from_alerts(alerts: &[Alert]) -> Self {
        let mut summary = Self::default();
        for alert in alerts {
            match alert.priority {
                Priority::Urgent => summary.urgent += 1,
                Priority::High => summary.high += 1,
                Priority::Medium => summary.medium += 1,
                Priority::Low => summary.low += 1,
            }
        }
        summary
    }

    pub fn count(&self, priority: Priority) -> usize {
        match priority {
            Priority::Urgent => self.urgent,
            Priority::High => self.high,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
        }
    }

    pub fn total(&self) -> usize {
        self.urgent + self.high + self.medium + self.low
    }

    /// Per-priority counts, most urgent first.
    pub fn by_priority(&self) -> [(Priority, usize); 4] {
        Priority::DESCENDING.map(|p| (p, self.count(p)))
    }
}

/// Text shown when the filtered list is empty after a successful generation.
pub fn empty_message(filter: PriorityFilter) -> String {
    match filter {
        PriorityFilter::All => {
            "All health indicators are currently within normal ranges".to_string()
        }
        PriorityFilter::Only(priority) => format!("No {priority} priority alerts at this time"),
    }
}
