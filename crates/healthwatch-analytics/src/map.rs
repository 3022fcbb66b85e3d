//! Health map markers.
//!
//! One marker per Kerala district, coloured by the district's total case
//! count. Summaries are fetched concurrently; a district whose fetch fails is
//! shown with an empty summary instead of failing the map.

use futures_util::future::join_all;
use serde::Serialize;
use tracing::{info, warn};

use healthwatch_contracts::district::{district_centre, Coordinates, KERALA_DISTRICTS};

use crate::client::DistrictInfoSource;
use crate::summary::{DistrictInfo, SeverityBand};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictMarker {
    pub district: String,
    pub coordinates: Coordinates,
    pub summary: DistrictInfo,
    pub band: SeverityBand,
    /// False when the summary could not be fetched.
    pub available: bool,
}

impl DistrictMarker {
    pub fn color(&self) -> &'static str {
        self.band.color()
    }
}

/// Fetch a marker for every district, in south-to-north order.
pub async fn fetch_markers<S: DistrictInfoSource>(source: &S) -> Vec<DistrictMarker> {
    let districts: Vec<(&str, Coordinates)> = KERALA_DISTRICTS
        .iter()
        .filter_map(|&name| district_centre(name).map(|c| (name, c)))
        .collect();

    let fetches = districts.iter().map(|&(name, coordinates)| async move {
        let (summary, available) = match source.district_info(name).await {
            Ok(summary) => (summary, true),
            Err(e) => {
                warn!(district = %name, error = %e, "district summary unavailable, showing empty marker");
                (DistrictInfo::default(), false)
            }
        };
        DistrictMarker {
            district: name.to_string(),
            coordinates,
            band: summary.band(),
            summary,
            available,
        }
    });

    let markers = join_all(fetches).await;
    info!(
        markers = markers.len(),
        unavailable = markers.iter().filter(|m| !m.available).count(),
        "health map markers loaded"
    );
    markers
}
