//! Search transport
//!
//! The seam between the pagination controller and the network: a
//! `SearchTransport` accepts one filter criteria snapshot and returns one
//! parsed page of events, or an error. `HttpTransport` is the reqwest
//! implementation; tests substitute scripted transports.

mod client;

pub use client::{HttpTransport, TransportConfig, TransportConfigBuilder};

use crate::error::Result;
use crate::filter::FilterCriteria;
use crate::types::EventPage;
use async_trait::async_trait;

/// Issues a single search call for one filter criteria snapshot.
///
/// Implementations must be cancel-safe: the controller aborts in-flight
/// searches when a newer load supersedes them.
#[async_trait]
pub trait SearchTransport: Send + Sync {
    /// Fetch one page of events for `criteria`
    async fn search(&self, criteria: &FilterCriteria) -> Result<EventPage>;
}
