//! Connection settings for the analytics service.

use serde::{Deserialize, Serialize};

use healthwatch_contracts::error::{HealthError, HealthResult};

/// Public deployment of the district clustering service.
pub const DEFAULT_BASE_URL: &str = "https://kerala-migrant-health-data-clustering.onrender.com";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The `[analytics]` table of `healthwatch.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyticsConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl AnalyticsConfig {
    /// Replace the base URL when `url` is set and non-blank.
    pub fn with_base_url_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) {
            self.base_url = url;
        }
        self
    }

    pub fn validate(&self) -> HealthResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(HealthError::ConfigError {
                reason: format!("analytics base_url must be an http(s) URL (got '{}')", self.base_url),
            });
        }
        if self.timeout_secs == 0 {
            return Err(HealthError::ConfigError {
                reason: "analytics timeout_secs must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
