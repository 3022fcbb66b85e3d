//! Latest-wins generation tracking.
//!
//! Every fetch-and-generate cycle takes a `Generation` ticket when it starts.
//! Only the holder of the most recent ticket may publish its result; anything
//! older has been superseded (a refresh was requested, or the view went away)
//! and must be discarded.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Ticket identifying one fetch-and-generate cycle. Strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(pub u64);

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out generation tickets and answers "is this still the latest?".
#[derive(Debug, Default)]
pub struct GenerationTracker {
    latest: AtomicU64,
}

impl GenerationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new cycle, superseding every earlier ticket.
    pub fn begin(&self) -> Generation {
        Generation(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Supersede every outstanding ticket without starting a new cycle.
    ///
    /// Used when the consumer goes away and in-flight results have nowhere
    /// to land.
    pub fn cancel_all(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }

    /// Return true if `generation` is the most recently issued ticket.
    pub fn is_current(&self, generation: Generation) -> bool {
        self.latest.load(Ordering::SeqCst) == generation.0
    }
}
