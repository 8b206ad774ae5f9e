//! Controller types
//!
//! The listener interface, the handle returned by `reload`, and the
//! internal mutable state shared between the controller and its drive
//! loop.

use crate::error::Error;
use crate::filter::GeoPoint;
use crate::types::Event;
use chrono::NaiveDate;
use futures::future::AbortHandle;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Lifecycle callbacks for load operations.
///
/// `on_will_load` fires before each page fetch starts; exactly one of
/// `on_did_load`/`on_did_error` (or, for a superseded initial page,
/// nothing at all) follows after it settles.
pub trait LoadListener: Send + Sync {
    /// A page fetch is about to start
    fn on_will_load(&self) {}

    /// A page fetch settled; `items` holds the page's accepted events
    /// (empty for an empty or rejected continuation page)
    fn on_did_load(&self, items: &[Event]) {
        let _ = items;
    }

    /// The load cycle failed
    fn on_did_error(&self, error: &Error) {
        let _ = error;
    }
}

/// Handle for one reload cycle.
///
/// Dropping the handle detaches the cycle; it keeps running in the
/// background. Awaiting [`settled`](Self::settled) is a convenience for
/// tests and one-shot callers.
#[derive(Debug)]
pub struct LoadHandle {
    join: JoinHandle<()>,
}

impl LoadHandle {
    pub(crate) fn new(join: JoinHandle<()>) -> Self {
        Self { join }
    }

    /// Wait until the cycle has fully settled (all pages fetched, failed,
    /// or superseded)
    pub async fn settled(self) {
        // A superseding reload aborts nothing here; the drive task always
        // runs to a return.
        let _ = self.join.await;
    }
}

/// Mutable controller state, shared with the drive loop
pub(crate) struct ControllerState {
    pub keyword: String,
    pub categories: Vec<String>,
    pub cities: Vec<String>,
    pub dates: Vec<NaiveDate>,
    pub location: Option<GeoPoint>,
    pub radius_mi: Option<u32>,
    /// Page cursor, reset to 1 at the start of every reload
    pub page: u32,
    /// True from will-load until the initial page of a cycle settles
    pub loading: bool,
    /// Accumulated pages in fetch order; only validated responses land here
    pub sections: Vec<Vec<Event>>,
    /// Identity of the active reload cycle; completions carrying an older
    /// generation are ignored
    pub generation: u64,
    /// Cancellation handle of the single live fetch, if any
    pub in_flight: Option<AbortHandle>,
    pub listeners: Vec<Arc<dyn LoadListener>>,
}

impl ControllerState {
    pub(crate) fn new() -> Self {
        Self {
            keyword: String::new(),
            categories: Vec::new(),
            cities: Vec::new(),
            dates: Vec::new(),
            location: None,
            radius_mi: None,
            page: 1,
            loading: false,
            sections: Vec::new(),
            generation: 0,
            in_flight: None,
            listeners: Vec::new(),
        }
    }
}
