//! Search profile configuration
//!
//! A YAML-described search profile for the CLI: where the API lives and
//! which filters to apply. The location/radius pair follows the same
//! both-or-neither rule the controller enforces.

use crate::error::Result;
use crate::filter::{GeoFilter, GeoPoint};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::warn;

fn default_timeout_secs() -> u64 {
    30
}

/// One search profile: endpoint plus filter fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchProfile {
    /// Base URL of the search API
    pub base_url: String,

    /// Search keyword
    #[serde(default)]
    pub keyword: String,

    /// Category identifiers
    #[serde(default)]
    pub categories: Vec<String>,

    /// City names, primary first
    #[serde(default)]
    pub cities: Vec<String>,

    /// Filter dates (ISO `YYYY-MM-DD`)
    #[serde(default)]
    pub dates: Vec<NaiveDate>,

    /// Search location
    #[serde(default)]
    pub location: Option<GeoPoint>,

    /// Search radius in miles
    #[serde(default)]
    pub radius_mi: Option<u32>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl SearchProfile {
    /// The effective location filter.
    ///
    /// A location without a radius (or vice versa) is treated as no
    /// location filter at all.
    pub fn geo(&self) -> Option<GeoFilter> {
        match (self.location, self.radius_mi) {
            (Some(point), Some(radius_mi)) => Some(GeoFilter::new(point, radius_mi)),
            (None, None) => None,
            _ => {
                warn!("profile sets only one of location/radius_mi, ignoring location filter");
                None
            }
        }
    }

    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Load a search profile from a YAML file
pub fn load_profile(path: impl AsRef<Path>) -> Result<SearchProfile> {
    let raw = std::fs::read_to_string(path)?;
    load_profile_from_str(&raw)
}

/// Load a search profile from a YAML string
pub fn load_profile_from_str(raw: &str) -> Result<SearchProfile> {
    let profile: SearchProfile = serde_yaml::from_str(raw)?;
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_minimal_profile() {
        let profile = load_profile_from_str("base_url: https://api.example.com\n").unwrap();
        assert_eq!(profile.base_url, "https://api.example.com");
        assert!(profile.categories.is_empty());
        assert!(profile.geo().is_none());
        assert_eq!(profile.timeout_secs, 30);
    }

    #[test]
    fn test_full_profile() {
        let yaml = r"
base_url: https://api.example.com
keyword: jazz
categories: [music, nightlife]
cities: [Boston, Cambridge]
dates: [2026-09-01, 2026-09-02]
location:
  latitude: 42.3601
  longitude: -71.0589
radius_mi: 25
timeout_secs: 10
";
        let profile = load_profile_from_str(yaml).unwrap();
        assert_eq!(profile.keyword, "jazz");
        assert_eq!(profile.cities, vec!["Boston", "Cambridge"]);
        assert_eq!(profile.dates.len(), 2);

        let geo = profile.geo().unwrap();
        assert_eq!(geo.radius_mi, 25);
        assert!((geo.point.latitude - 42.3601).abs() < 1e-9);
    }

    #[test]
    fn test_partial_location_pair_is_dropped() {
        let yaml = r"
base_url: https://api.example.com
location:
  latitude: 42.0
  longitude: -71.0
";
        let profile = load_profile_from_str(yaml).unwrap();
        assert!(profile.geo().is_none());

        let yaml = "base_url: https://api.example.com\nradius_mi: 25\n";
        let profile = load_profile_from_str(yaml).unwrap();
        assert!(profile.geo().is_none());
    }

    #[test]
    fn test_missing_base_url_fails() {
        assert!(load_profile_from_str("keyword: jazz\n").is_err());
    }
}
