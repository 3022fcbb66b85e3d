//! # healthwatch-analytics
//!
//! Read-only access to the external district analytics service, which
//! clusters reported disease data per Kerala district.
//!
//! - `DistrictInfoClient` queries `GET /district_info?district=<name>`
//! - `DistrictInfo::ranked` orders a district's diseases for the detail view
//! - `SeverityBand` colours a district by its total case count
//! - `fetch_markers` builds the fourteen health map markers concurrently
//!
//! ## Usage
//!
//! ```rust,ignore
//! let client = DistrictInfoClient::new(&AnalyticsConfig::default())?;
//! let info = client.district_info("Ernakulam").await?;
//! for (disease, details) in info.ranked() { /* ... */ }
//! ```

pub mod client;
pub mod config;
pub mod map;
pub mod summary;

pub use client::{DistrictInfoClient, DistrictInfoSource};
pub use config::AnalyticsConfig;
pub use map::{fetch_markers, DistrictMarker};
pub use summary::{DiseaseDetails, DistrictInfo, MainlyAffected, SeverityBand};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use healthwatch_contracts::error::{HealthError, HealthResult};

    use super::{
        fetch_markers, AnalyticsConfig, DiseaseDetails, DistrictInfo, DistrictInfoClient,
        DistrictInfoSource, SeverityBand,
    };

    // ── Helpers ───────────────────────────────────────────────────────────────

    const SAMPLE: &str = r#"{
        "disease_summary": {
            "Dengue": {
                "cases": 1200,
                "mainly_affected": { "age_group": "20-35", "gender": "Male" },
                "possible_causes": ["Stagnant water", "Monsoon"]
            },
            "Leptospirosis": {
                "cases": 1900,
                "mainly_affected": { "age_group": "35-50", "gender": "Male" },
                "possible_causes": ["Flood exposure"]
            },
            "Hepatitis A": { "cases": 300 }
        }
    }"#;

    fn info_with_total(cases: u64) -> DistrictInfo {
        let mut disease_summary = BTreeMap::new();
        disease_summary.insert(
            "Dengue".to_string(),
            DiseaseDetails {
                cases,
                ..Default::default()
            },
        );
        DistrictInfo { disease_summary }
    }

    /// Answers every district with a fixed total, except those listed as down.
    struct StubSource {
        cases: u64,
        down: Vec<&'static str>,
    }

    impl DistrictInfoSource for StubSource {
        async fn district_info(&self, district: &str) -> HealthResult<DistrictInfo> {
            if self.down.iter().any(|d| *d == district) {
                return Err(HealthError::Analytics {
                    district: district.to_string(),
                    reason: "HTTP 503".to_string(),
                });
            }
            Ok(info_with_total(self.cases))
        }
    }

    // ── Summaries ─────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_district_info() {
        let info: DistrictInfo = serde_json::from_str(SAMPLE).unwrap();

        assert_eq!(info.disease_summary.len(), 3);
        assert_eq!(info.total_cases(), 3400);
        let dengue = &info.disease_summary["Dengue"];
        assert_eq!(dengue.mainly_affected.age_group, "20-35");
        assert_eq!(dengue.possible_causes, vec!["Stagnant water", "Monsoon"]);

        let hep = &info.disease_summary["Hepatitis A"];
        assert!(hep.possible_causes.is_empty());
        assert_eq!(hep.mainly_affected.gender, "");
    }

    #[test]
    fn test_ranked_by_cases_descending() {
        let info: DistrictInfo = serde_json::from_str(SAMPLE).unwrap();
        let names: Vec<&str> = info.ranked().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Leptospirosis", "Dengue", "Hepatitis A"]);
    }

    #[test]
    fn test_missing_summary_is_empty_and_low() {
        let info: DistrictInfo = serde_json::from_str("{}").unwrap();
        assert_eq!(info.total_cases(), 0);
        assert_eq!(info.band(), SeverityBand::Low);
    }

    #[test]
    fn test_total_cases_saturates() {
        let mut info = info_with_total(u64::MAX);
        info.disease_summary.insert(
            "Malaria".to_string(),
            DiseaseDetails {
                cases: 10,
                ..Default::default()
            },
        );
        assert_eq!(info.total_cases(), u64::MAX);
        assert_eq!(info.band(), SeverityBand::High);
    }

    #[test]
    fn test_severity_band_thresholds() {
        assert_eq!(SeverityBand::from_total(0), SeverityBand::Low);
        assert_eq!(SeverityBand::from_total(2499), SeverityBand::Low);
        assert_eq!(SeverityBand::from_total(2500), SeverityBand::Elevated);
        assert_eq!(SeverityBand::from_total(4499), SeverityBand::Elevated);
        assert_eq!(SeverityBand::from_total(4500), SeverityBand::High);

        assert_eq!(SeverityBand::Low.color(), "#2ecc71");
        assert_eq!(SeverityBand::Elevated.color(), "#f39c12");
        assert_eq!(SeverityBand::High.color(), "#e74c3c");
    }

    // ── Config ────────────────────────────────────────────────────────────────

    #[test]
    fn test_config_defaults_and_toml() {
        let config = AnalyticsConfig::default();
        assert!(config.base_url.starts_with("https://kerala-migrant-health"));
        assert_eq!(config.timeout_secs, 30);

        let parsed: AnalyticsConfig = toml::from_str("timeout_secs = 5").unwrap();
        assert_eq!(parsed.timeout_secs, 5);
        assert_eq!(parsed.base_url, config.base_url);

        assert!(toml::from_str::<AnalyticsConfig>("retries = 3").is_err());
    }

    #[test]
    fn test_base_url_override() {
        let config = AnalyticsConfig::default()
            .with_base_url_override(Some("http://localhost:8000".to_string()));
        assert_eq!(config.base_url, "http://localhost:8000");

        let unchanged = AnalyticsConfig::default().with_base_url_override(Some("  ".to_string()));
        assert_eq!(unchanged, AnalyticsConfig::default());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let bad_url = AnalyticsConfig {
            base_url: "ftp://example.org".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            DistrictInfoClient::new(&bad_url),
            Err(HealthError::ConfigError { .. })
        ));

        let zero_timeout = AnalyticsConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(zero_timeout.validate().is_err());
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = DistrictInfoClient::new(&AnalyticsConfig {
            base_url: "http://localhost:8000/".to_string(),
            timeout_secs: 5,
        })
        .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_analytics_error() {
        let client = DistrictInfoClient::new(&AnalyticsConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            timeout_secs: 5,
        })
        .unwrap();

        match client.district_info("Kollam").await {
            Err(HealthError::Analytics { district, .. }) => assert_eq!(district, "Kollam"),
            other => panic!("expected Analytics error, got {other:?}"),
        }
    }

    // ── Map markers ───────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_markers_cover_every_district() {
        let markers = fetch_markers(&StubSource {
            cases: 5000,
            down: vec![],
        })
        .await;

        assert_eq!(markers.len(), 14);
        assert_eq!(markers[0].district, "Thiruvananthapuram");
        assert_eq!(markers[13].district, "Kasaragod");
        assert!(markers.iter().all(|m| m.available && m.band == SeverityBand::High));
        assert_eq!(markers[0].color(), "#e74c3c");
    }

    #[tokio::test]
    async fn test_failed_marker_degrades_to_empty_summary() {
        let markers = fetch_markers(&StubSource {
            cases: 3000,
            down: vec!["Wayanad"],
        })
        .await;

        assert_eq!(markers.len(), 14, "one failure must not drop the map");
        let wayanad = markers.iter().find(|m| m.district == "Wayanad").unwrap();
        assert!(!wayanad.available);
        assert!(wayanad.summary.disease_summary.is_empty());
        assert_eq!(wayanad.band, SeverityBand::Low);

        let kannur = markers.iter().find(|m| m.district == "Kannur").unwrap();
        assert!(kannur.available);
        assert_eq!(kannur.band, SeverityBand::Elevated);
    }
}
