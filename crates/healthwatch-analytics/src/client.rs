//! HTTP client for the district analytics service.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, error};

use healthwatch_contracts::error::{HealthError, HealthResult};

use crate::config::AnalyticsConfig;
use crate::summary::DistrictInfo;

/// Anything that can answer a district disease summary query.
pub trait DistrictInfoSource: Send + Sync {
    fn district_info(
        &self,
        district: &str,
    ) -> impl Future<Output = HealthResult<DistrictInfo>> + Send;
}

/// `reqwest` client for `GET {base_url}/district_info?district=...`.
pub struct DistrictInfoClient {
    base_url: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl DistrictInfoClient {
    pub fn new(config: &AnalyticsConfig) -> HealthResult<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| HealthError::ConfigError {
                reason: format!("failed to build analytics HTTP client: {e}"),
            })?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}/district_info", self.base_url)
    }
}

impl DistrictInfoSource for DistrictInfoClient {
    async fn district_info(&self, district: &str) -> HealthResult<DistrictInfo> {
        let failed = |reason: String| HealthError::Analytics {
            district: district.to_string(),
            reason,
        };

        debug!(district = %district, "querying district analytics");
        let response = self
            .client
            .get(self.endpoint())
            .query(&[("district", district)])
            .send()
            .await
            .map_err(|e| {
                error!(district = %district, error = %e, "district analytics request failed");
                if e.is_timeout() {
                    failed(format!("request timed out after {}s", self.timeout_secs))
                } else if e.is_connect() {
                    failed(format!("cannot reach {}", self.base_url))
                } else {
                    failed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(failed(format!("HTTP {}: {}", status.as_u16(), body.trim())));
        }

        response
            .json::<DistrictInfo>()
            .await
            .map_err(|e| failed(format!("malformed response: {e}")))
    }
}
