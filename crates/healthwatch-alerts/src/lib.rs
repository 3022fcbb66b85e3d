//! # healthwatch-alerts
//!
//! Derives prioritized health alerts from patient, case, and district
//! snapshots.
//!
//! ## Overview
//!
//! [`AlertEngine`] applies four threshold rules (vaccination recency, migrant
//! TB screening, medication review, high-risk district activity) and sorts
//! the result by priority. Thresholds come from [`AlertThresholds`], which
//! can be loaded from TOML. [`AlertFeed`] wraps the engine in a
//! fetch-and-generate cycle where only the newest refresh may publish.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use healthwatch_alerts::{AlertEngine, AlertThresholds};
//!
//! let engine = AlertEngine::new(AlertThresholds::from_file(path)?);
//! let alerts = engine.generate(&patients, &cases, &districts, now);
//! ```

pub mod engine;
pub mod feed;
pub mod presentation;
pub mod rule;

pub use engine::{medication_priority, sort_alerts, AlertEngine};
pub use feed::{AlertFeed, FeedState, RefreshOutcome};
pub use presentation::{empty_message, filter_alerts, PrioritySummary};
pub use rule::AlertThresholds;

// ── Tests ─────────────────────────────────────────────────────────────────────
