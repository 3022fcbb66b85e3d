//! The alert feed: fetch, generate, publish.
//!
//! `AlertFeed` backs the alerts view. Each `refresh` loads a fresh snapshot,
//! runs the engine, and publishes the result, unless a newer refresh started
//! in the meantime, in which case the stale result is dropped. A failed load
//! publishes `FeedState::Failed`, never an empty list, so "system down" is
//! not mistaken for "all clear".

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use tracing::{error, info};

use healthwatch_contracts::{alert::Alert, error::HealthResult};
use healthwatch_core::{
    load_snapshot,
    traits::{Clock, RecordStore},
    Generation, GenerationTracker,
};

use crate::engine::AlertEngine;

/// What the alerts view currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedState {
    /// No generation has completed yet.
    Idle,

    /// The latest generation succeeded. `alerts` may legitimately be empty.
    Ready {
        generation: Generation,
        generated_at: DateTime<Utc>,
        alerts: Vec<Alert>,
    },

    /// The latest generation could not load its snapshot.
    Failed {
        generation: Generation,
        reason: String,
    },
}

/// Result of one `refresh` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// This refresh was the latest and its alerts are now published.
    Applied {
        generation: Generation,
        alert_count: usize,
    },

    /// A newer refresh started first; this result was discarded.
    Superseded { generation: Generation },
}

/// Fetch-and-generate driver for the alerts view.
pub struct AlertFeed {
    store: Arc<dyn RecordStore>,
    engine: AlertEngine,
    clock: Arc<dyn Clock>,
    tracker: GenerationTracker,
    state: Mutex<FeedState>,
}

impl AlertFeed {
    pub fn new(store: Arc<dyn RecordStore>, engine: AlertEngine, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            engine,
            clock,
            tracker: GenerationTracker::new(),
            state: Mutex::new(FeedState::Idle),
        }
    }

    /// Run one fetch-and-generate cycle for `scope`.
    ///
    /// Returns `Err` with the data-access failure when the snapshot could not
    /// be loaded and this cycle is still the latest; the feed state becomes
    /// `Failed`. A cycle overtaken by a newer one returns `Superseded`
    /// whatever its own result was.
    pub async fn refresh(&self, scope: Option<&str>) -> HealthResult<RefreshOutcome> {
        let generation = self.tracker.begin();
        info!(%generation, scope = ?scope, "alert generation started");

        let snapshot = match load_snapshot(Arc::clone(&self.store), scope).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                let failed = FeedState::Failed {
                    generation,
                    reason: e.to_string(),
                };
                if !self.publish(generation, failed) {
                    info!(%generation, "superseded alert generation failed; discarding");
                    return Ok(RefreshOutcome::Superseded { generation });
                }
                error!(%generation, error = %e, "alert generation failed");
                return Err(e);
            }
        };

        let now = self.clock.now();
        let alerts = self.engine.generate_from(&snapshot, now);
        let alert_count = alerts.len();

        let ready = FeedState::Ready {
            generation,
            generated_at: now,
            alerts,
        };
        if !self.publish(generation, ready) {
            info!(%generation, "alert generation superseded; discarding result");
            return Ok(RefreshOutcome::Superseded { generation });
        }

        info!(%generation, alert_count, "alert generation published");
        Ok(RefreshOutcome::Applied {
            generation,
            alert_count,
        })
    }

    /// Discard the results of every in-flight refresh.
    pub fn cancel_pending(&self) {
        self.tracker.cancel_all();
    }

    /// A copy of the current feed state.
    pub fn state(&self) -> FeedState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the state if `generation` is still the latest.
    ///
    /// The currency check happens under the state lock so an older cycle can
    /// never overwrite a newer one.
    fn publish(&self, generation: Generation, next: FeedState) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if !self.tracker.is_current(generation) {
            return false;
        }
        *state = next;
        true
    }
}
