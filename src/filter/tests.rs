//! Tests for filter module

use super::*;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use test_case::test_case;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

// ============================================================================
// GeoPoint Tests
// ============================================================================

#[test]
fn test_distance_zero_for_same_point() {
    let p = GeoPoint::new(42.3601, -71.0589);
    assert!(p.distance_meters(&p) < 1e-6);
}

#[test]
fn test_distance_known_pair() {
    // Boston to New York City, roughly 306 km
    let boston = GeoPoint::new(42.3601, -71.0589);
    let nyc = GeoPoint::new(40.7128, -74.0060);
    let d = boston.distance_meters(&nyc);
    assert!((290_000.0..320_000.0).contains(&d), "distance was {d}");
}

#[test]
fn test_within_meters_threshold() {
    let p1 = GeoPoint::new(42.36010, -71.05890);
    // ~3.3 meters north
    let p2 = GeoPoint::new(42.36013, -71.05890);
    assert!(p1.within_meters(&p2, 5.0));

    // ~33 meters north
    let p3 = GeoPoint::new(42.36040, -71.05890);
    assert!(!p1.within_meters(&p3, 5.0));
}

#[test_case(1, "1mi")]
#[test_case(25, "25mi")]
#[test_case(100, "100mi")]
fn test_geo_filter_within_param(radius: u32, expected: &str) {
    let geo = GeoFilter::new(GeoPoint::new(0.0, 0.0), radius);
    assert_eq!(geo.within_param(), expected);
}

// ============================================================================
// FilterCriteria Tests
// ============================================================================

#[test]
fn test_criteria_defaults() {
    let criteria = FilterCriteria::new();
    assert_eq!(criteria.page(), 1);
    assert_eq!(criteria.keyword(), "");
    assert!(criteria.categories().is_empty());
    assert!(criteria.geo().is_none());
    assert_eq!(criteria.primary_city(), None);
}

#[test]
fn test_primary_city_is_first() {
    let criteria =
        FilterCriteria::new().with_cities(vec!["Boston".to_string(), "Cambridge".to_string()]);
    assert_eq!(criteria.primary_city(), Some("Boston"));
}

#[test]
fn test_date_range_expansion() {
    let criteria = FilterCriteria::new().with_date_range(date(2026, 8, 29), date(2026, 8, 31));
    assert_eq!(
        criteria.dates(),
        &[date(2026, 8, 29), date(2026, 8, 30), date(2026, 8, 31)]
    );
}

#[test]
fn test_date_range_single_day() {
    let criteria = FilterCriteria::new().with_date_range(date(2026, 8, 29), date(2026, 8, 29));
    assert_eq!(criteria.dates(), &[date(2026, 8, 29)]);
}

#[test]
fn test_query_params_city_mode() {
    let criteria = FilterCriteria::new()
        .with_keyword("jazz")
        .with_categories(vec!["music".to_string(), "nightlife".to_string()])
        .with_cities(vec!["Boston".to_string(), "Cambridge".to_string()])
        .with_dates(vec![date(2026, 9, 1), date(2026, 9, 2)])
        .with_page(2);

    let params = criteria.query_params();
    assert_eq!(param(&params, "keyword"), Some("jazz"));
    assert_eq!(param(&params, "category"), Some("music,nightlife"));
    assert_eq!(param(&params, "dates"), Some("2026-09-01,2026-09-02"));
    assert_eq!(param(&params, "page_number"), Some("2"));
    assert_eq!(param(&params, "city"), Some("Boston,Cambridge"));
    assert_eq!(param(&params, "within"), None);
    assert_eq!(param(&params, "latitude"), None);
}

#[test]
fn test_query_params_location_mode_omits_city() {
    let criteria = FilterCriteria::new()
        .with_cities(vec!["Boston".to_string()])
        .with_geo(GeoFilter::new(GeoPoint::new(42.3601, -71.0589), 25));

    let params = criteria.query_params();
    assert_eq!(param(&params, "within"), Some("25mi"));
    assert_eq!(param(&params, "latitude"), Some("42.3601"));
    assert_eq!(param(&params, "longitude"), Some("-71.0589"));
    // city list is not sent when a location filter is active
    assert_eq!(param(&params, "city"), None);
}

#[test]
fn test_query_params_empty_collections_omitted() {
    let params = FilterCriteria::new().query_params();
    assert_eq!(param(&params, "keyword"), Some(""));
    assert_eq!(param(&params, "page_number"), Some("1"));
    assert_eq!(param(&params, "category"), None);
    assert_eq!(param(&params, "dates"), None);
    assert_eq!(param(&params, "city"), None);
}
