//! Districts and their risk profiles.

use serde::{Deserialize, Serialize};

/// The fourteen districts of Kerala, south to north.
pub const KERALA_DISTRICTS: [&str; 14] = [
    "Thiruvananthapuram",
    "Kollam",
    "Pathanamthitta",
    "Alappuzha",
    "Kottayam",
    "Idukki",
    "Ernakulam",
    "Thrissur",
    "Palakkad",
    "Malappuram",
    "Kozhikode",
    "Wayanad",
    "Kannur",
    "Kasaragod",
];

/// Return true if `name` is one of `KERALA_DISTRICTS` (exact match).
pub fn is_known_district(name: &str) -> bool {
    KERALA_DISTRICTS.contains(&name)
}

/// Geographic centre of a district, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Map centre of each district, in `KERALA_DISTRICTS` order.
const DISTRICT_CENTRES: [(f64, f64); 14] = [
    (8.5241, 76.9366),
    (8.8932, 76.6141),
    (9.2648, 76.7870),
    (9.4981, 76.3388),
    (9.5916, 76.5222),
    (9.9151, 76.9739),
    (9.9312, 76.2673),
    (10.5276, 76.2144),
    (10.7867, 76.6548),
    (11.0510, 76.0711),
    (11.2588, 75.7804),
    (11.6854, 76.1320),
    (11.8745, 75.3704),
    (12.4996, 75.0040),
];

/// Map centre of a known district.
pub fn district_centre(name: &str) -> Option<Coordinates> {
    KERALA_DISTRICTS
        .iter()
        .position(|d| *d == name)
        .map(|i| {
            let (lat, lon) = DISTRICT_CENTRES[i];
            Coordinates { lat, lon }
        })
}

/// Risk scores on a 0–10 scale. Only `overall_risk` drives alerting.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RiskRatings {
    #[serde(default)]
    pub water_risk: f64,
    #[serde(default)]
    pub sanitation_risk: f64,
    #[serde(default)]
    pub crowding_risk: f64,
    pub overall_risk: f64,
}

/// An administrative district.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct District {
    pub id: String,
    pub district_name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    pub risk_ratings: RiskRatings,
}

/// Optional server-side restriction applied to patient and case reads.
///
/// `None` reads every district.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFilter {
    pub district: Option<String>,
}

impl RecordFilter {
    /// A filter that reads every district.
    pub fn all() -> Self {
        Self::default()
    }

    /// A filter restricted to one district.
    pub fn district(name: impl Into<String>) -> Self {
        Self { district: Some(name.into()) }
    }

    /// Build a filter from an optional caller scope.
    pub fn from_scope(scope: Option<&str>) -> Self {
        Self { district: scope.map(str::to_string) }
    }

    /// Return true if a record in `district` passes this filter.
    pub fn admits(&self, district: &str) -> bool {
        match &self.district {
            Some(wanted) => wanted == district,
            None => true,
        }
    }
}
