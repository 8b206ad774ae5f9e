//! # eventfeed
//!
//! A client-side controller for paginated, filterable event search APIs.
//! It keeps a local result set synchronized with the latest filter
//! criteria while tolerating in-flight request races: overlapping loads
//! are cancelled and superseded, stale responses are fingerprinted
//! against the current filter state and dropped, and observers hear about
//! each load step exactly once.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use eventfeed::controller::EventsController;
//! use eventfeed::transport::{HttpTransport, TransportConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> eventfeed::Result<()> {
//!     let config = TransportConfig::builder()
//!         .base_url("https://api.example.com")
//!         .build();
//!     let controller = EventsController::new(Arc::new(HttpTransport::new(config)?));
//!
//!     controller.set_cities(vec!["Boston".to_string()]);
//!     controller.reload().settled().await;
//!
//!     for page in controller.sections() {
//!         // render page
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    EventsController                      │
//! │  filter fields   reload() → will-load / did-load / error │
//! │  sections        sequential page loop, staleness checks  │
//! └──────────────────────────┬───────────────────────────────┘
//!                            │ one FetchRequest at a time
//! ┌──────────┬───────────────┴──────────┬────────────────────┐
//! │  Filter  │       FetchRequest       │     Transport      │
//! ├──────────┼──────────────────────────┼────────────────────┤
//! │ criteria │ abortable task           │ reqwest GET        │
//! │ snapshot │ success/failure/cancel   │ lenient parsing    │
//! └──────────┴──────────────────────────┴────────────────────┘
//! ```

#![warn(clippy::all)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Common types and type aliases
pub mod types;

/// Filter criteria snapshots
pub mod filter;

/// Fetch requests and cancellation
pub mod request;

/// Search transport over HTTP
pub mod transport;

/// The pagination controller
pub mod controller;

/// Category preference persistence
pub mod prefs;

/// Search profile configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use controller::{EventsController, LoadHandle, LoadListener};
pub use error::{Error, Result};
pub use filter::{FilterCriteria, GeoFilter, GeoPoint};
pub use types::{Event, EventPage};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
