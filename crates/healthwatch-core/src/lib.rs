//! # healthwatch-core
//!
//! Runtime plumbing shared by the HealthWatch views.
//!
//! This crate provides:
//! - The service seams (`RecordStore`, `PatientRegistry`, `Clock`)
//! - `load_snapshot`, which reads the three source collections concurrently
//! - `GenerationTracker`, which lets only the newest cycle publish results
//!
//! ## Usage
//!
//! ```rust,ignore
//! use healthwatch_core::{load_snapshot, traits::RecordStore};
//!
//! let snapshot = load_snapshot(store, profile.scope()).await?;
//! ```

pub mod generation;
pub mod snapshot;
pub mod traits;

pub use generation::{Generation, GenerationTracker};
pub use snapshot::{load_snapshot, Snapshot};

// ── Tests ────────────────────────────────────────────────────────────────────
