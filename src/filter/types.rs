//! Filter criteria types
//!
//! Defines the value types that parameterize a single search request.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Mean earth radius in meters, for haversine distance
const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// A geographic coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a new point
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to another point, in meters (haversine)
    pub fn distance_meters(&self, other: &GeoPoint) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = (other.latitude - self.latitude).to_radians();
        let dlon = (other.longitude - self.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_METERS * c
    }

    /// Check whether another point lies within `threshold_meters`
    pub fn within_meters(&self, other: &GeoPoint, threshold_meters: f64) -> bool {
        self.distance_meters(other) <= threshold_meters
    }
}

/// A location-based filter: coordinate plus search radius.
///
/// Location and radius always travel together; a coordinate without a
/// radius (or vice versa) is not a location filter. Modeling them as one
/// value keeps that invariant out of reach of callers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoFilter {
    /// Center of the search area
    pub point: GeoPoint,
    /// Search radius in miles
    pub radius_mi: u32,
}

impl GeoFilter {
    /// Create a new location filter
    pub fn new(point: GeoPoint, radius_mi: u32) -> Self {
        Self { point, radius_mi }
    }

    /// Radius in the server's wire format, e.g. `"25mi"`
    pub fn within_param(&self) -> String {
        format!("{}mi", self.radius_mi)
    }
}

/// Immutable snapshot of search parameters for one request.
///
/// Constructed fresh for every fetch; the controller's mutable fields are
/// the long-lived source of truth that snapshots are taken from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterCriteria {
    keyword: String,
    categories: Vec<String>,
    cities: Vec<String>,
    dates: Vec<NaiveDate>,
    geo: Option<GeoFilter>,
    page: u32,
}

impl FilterCriteria {
    /// Create empty criteria for page 1
    pub fn new() -> Self {
        Self {
            page: 1,
            ..Self::default()
        }
    }

    /// Set the search keyword
    #[must_use]
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = keyword.into();
        self
    }

    /// Set category identifiers (opaque IDs, order irrelevant)
    #[must_use]
    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    /// Set city names. The first city is the "primary" city used when
    /// comparing a response against the current filter state.
    #[must_use]
    pub fn with_cities(mut self, cities: Vec<String>) -> Self {
        self.cities = cities;
        self
    }

    /// Set an explicit date list
    #[must_use]
    pub fn with_dates(mut self, dates: Vec<NaiveDate>) -> Self {
        self.dates = dates;
        self
    }

    /// Set dates from an inclusive range
    #[must_use]
    pub fn with_date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.dates = start.iter_days().take_while(|d| *d <= end).collect();
        self
    }

    /// Set the location filter
    #[must_use]
    pub fn with_geo(mut self, geo: GeoFilter) -> Self {
        self.geo = Some(geo);
        self
    }

    /// Set the page number (starts at 1)
    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// The search keyword
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Category identifiers
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// City names, primary first
    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    /// The primary city, if any
    pub fn primary_city(&self) -> Option<&str> {
        self.cities.first().map(String::as_str)
    }

    /// Filter dates
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// The location filter, if any
    pub fn geo(&self) -> Option<&GeoFilter> {
        self.geo.as_ref()
    }

    /// The requested page number
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Derive the transport parameter set for this snapshot.
    ///
    /// Categories and dates are comma-joined. When a location filter is
    /// set, the radius/longitude/latitude trio replaces the city list;
    /// otherwise cities are comma-joined under `city`.
    pub fn query_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("keyword".to_string(), self.keyword.clone())];

        if !self.categories.is_empty() {
            params.push(("category".to_string(), self.categories.join(",")));
        }

        if !self.dates.is_empty() {
            let dates = self
                .dates
                .iter()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .collect::<Vec<_>>()
                .join(",");
            params.push(("dates".to_string(), dates));
        }

        params.push(("page_number".to_string(), self.page.to_string()));

        if let Some(geo) = &self.geo {
            params.push(("within".to_string(), geo.within_param()));
            params.push(("longitude".to_string(), geo.point.longitude.to_string()));
            params.push(("latitude".to_string(), geo.point.latitude.to_string()));
        } else if !self.cities.is_empty() {
            params.push(("city".to_string(), self.cities.join(",")));
        }

        params
    }
}
