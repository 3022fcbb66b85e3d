//! `healthwatch.toml` loading.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use healthwatch_alerts::AlertThresholds;
use healthwatch_analytics::AnalyticsConfig;
use healthwatch_contracts::error::{HealthError, HealthResult};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "healthwatch.toml";

/// Overrides `analytics.base_url`.
pub const ANALYTICS_URL_ENV: &str = "HEALTHWATCH_ANALYTICS_URL";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub alerts: AlertThresholds,
    pub analytics: AnalyticsConfig,
}

impl AppConfig {
    pub fn from_toml_str(s: &str) -> HealthResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| HealthError::ConfigError {
            reason: format!("TOML parse error: {}", e),
        })?;
        config.alerts.validate()?;
        config.analytics.validate()?;
        Ok(config)
    }

    /// Load `path`, or `DEFAULT_CONFIG_FILE` if it exists, or the defaults.
    ///
    /// The analytics URL environment override is applied last.
    pub fn load(path: Option<&Path>) -> HealthResult<Self> {
        let path: Option<PathBuf> = match path {
            Some(p) => Some(p.to_path_buf()),
            None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.exists()),
        };

        let mut config = match path {
            Some(path) => {
                debug!(path = %path.display(), "loading configuration");
                let contents =
                    std::fs::read_to_string(&path).map_err(|e| HealthError::ConfigError {
                        reason: format!("failed to read '{}': {}", path.display(), e),
                    })?;
                Self::from_toml_str(&contents)?
            }
            None => Self::default(),
        };

        config.analytics = config
            .analytics
            .with_base_url_override(std::env::var(ANALYTICS_URL_ENV).ok());
        config.analytics.validate()?;
        Ok(config)
    }
}
