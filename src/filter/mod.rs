//! Filter criteria
//!
//! Immutable snapshots of the search parameters that drive one request:
//! categories, cities, dates, optional geolocation + radius, and the page
//! cursor. A snapshot is taken from the controller's mutable fields at the
//! moment a request is issued and never mutated afterwards.

mod types;

pub use types::{FilterCriteria, GeoFilter, GeoPoint};

#[cfg(test)]
mod tests;
