//! Error types shared by every HealthWatch crate.
//!
//! All fallible operations return `HealthResult<T>`. Variants carry enough
//! context for the presentation layer to tell "system down" apart from
//! "nothing to report".

use thiserror::Error;

/// The unified error type for HealthWatch.
#[derive(Debug, Error)]
pub enum HealthError {
    /// A read against the record store failed.
    ///
    /// Alert generation is all-or-nothing: any of these aborts the cycle.
    #[error("failed to load {collection}: {reason}")]
    DataAccess { collection: String, reason: String },

    /// The record addressed by a write or lookup does not exist.
    #[error("{entity} '{id}' not found")]
    NotFound { entity: String, id: String },

    /// Form input was rejected before it reached the store.
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    /// The signed-in role may not open the requested view.
    #[error("role '{role}' may not open the {view} view")]
    AccessDenied { role: String, view: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The external district analytics service could not be queried.
    #[error("district analytics for '{district}' unavailable: {reason}")]
    Analytics { district: String, reason: String },
}

impl HealthError {
    /// Shorthand for a `DataAccess` error on the named collection.
    pub fn data_access(collection: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DataAccess {
            collection: collection.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for a `Validation` error on the named field.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the HealthWatch crates.
pub type HealthResult<T> = Result<T, HealthError>;
