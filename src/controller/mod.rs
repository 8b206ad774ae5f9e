//! Pagination controller
//!
//! The stateful orchestrator that owns the fetch/continue loop: it issues
//! a request for a filtered page, keeps fetching subsequent pages until
//! the collection is exhausted, discards responses that belong to a stale
//! filter configuration, and notifies listeners of load lifecycle events.
//!
//! # Overview
//!
//! Correctness here does not rely on a request queue or a server-side
//! session. Every response is validated at arrival time against the
//! controller's *current* filter state, plus an explicit generation
//! counter that identifies which reload cycle a request belongs to.
//! Pages are fetched strictly sequentially so the accumulated sections
//! stay in page order.

mod types;

pub use types::{LoadHandle, LoadListener};

use crate::filter::{FilterCriteria, GeoFilter, GeoPoint};
use crate::request::{FetchRequest, Outcome};
use crate::transport::SearchTransport;
use crate::types::Event;
use chrono::NaiveDate;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tracing::{debug, warn};
use types::ControllerState;

/// How far the current location may drift from a request's location
/// before the response no longer counts as current, in meters.
const LOCATION_DRIFT_THRESHOLD_METERS: f64 = 5.0;

/// Client-side controller for a paginated, filterable event collection.
///
/// Callers mutate the filter fields, then call [`reload`](Self::reload)
/// to start a fresh load cycle. The controller holds at most one live
/// fetch; a new reload cancels the previous cycle's request and any
/// response it may still produce is ignored.
pub struct EventsController {
    state: Arc<Mutex<ControllerState>>,
    transport: Arc<dyn SearchTransport>,
}

impl EventsController {
    /// Create a controller over a transport
    pub fn new(transport: Arc<dyn SearchTransport>) -> Self {
        Self {
            state: Arc::new(Mutex::new(ControllerState::new())),
            transport,
        }
    }

    /// Register a lifecycle listener
    pub fn add_listener(&self, listener: Arc<dyn LoadListener>) {
        lock(&self.state).listeners.push(listener);
    }

    /// Set the search keyword
    pub fn set_keyword(&self, keyword: impl Into<String>) {
        lock(&self.state).keyword = keyword.into();
    }

    /// Set category identifiers
    pub fn set_categories(&self, categories: Vec<String>) {
        lock(&self.state).categories = categories;
    }

    /// Set city names; the first is the primary city
    pub fn set_cities(&self, cities: Vec<String>) {
        lock(&self.state).cities = cities;
    }

    /// Set the filter dates
    pub fn set_dates(&self, dates: Vec<NaiveDate>) {
        lock(&self.state).dates = dates;
    }

    /// Set or clear the search location.
    ///
    /// A location only takes effect together with a radius; until both
    /// are set the controller behaves as if no location filter existed.
    pub fn set_location(&self, location: Option<GeoPoint>) {
        lock(&self.state).location = location;
    }

    /// Set or clear the search radius in miles
    pub fn set_radius_mi(&self, radius_mi: Option<u32>) {
        lock(&self.state).radius_mi = radius_mi;
    }

    /// Whether the initial page of the current cycle is still loading
    pub fn is_loading(&self) -> bool {
        lock(&self.state).loading
    }

    /// The current page cursor
    pub fn page(&self) -> u32 {
        lock(&self.state).page
    }

    /// Accumulated pages, in fetch order. Empty pages are never stored.
    pub fn sections(&self) -> Vec<Vec<Event>> {
        lock(&self.state).sections.clone()
    }

    /// Start a fresh load cycle under the current filter fields.
    ///
    /// Safe to call while a previous load is in flight: the previous
    /// cycle's request is cancelled, its notifications are owed nothing,
    /// and accumulated sections are cleared before the new cycle begins.
    pub fn reload(&self) -> LoadHandle {
        let (generation, listeners) = {
            let mut state = lock(&self.state);
            if let Some(in_flight) = state.in_flight.take() {
                in_flight.abort();
            }
            state.generation += 1;
            state.sections.clear();
            state.page = 1;
            state.loading = true;
            (state.generation, state.listeners.clone())
        };

        debug!(generation, "reload started");
        for listener in &listeners {
            listener.on_will_load();
        }

        let join = tokio::spawn(drive(
            Arc::downgrade(&self.state),
            Arc::clone(&self.transport),
            generation,
        ));
        LoadHandle::new(join)
    }
}

impl std::fmt::Debug for EventsController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = lock(&self.state);
        f.debug_struct("EventsController")
            .field("page", &state.page)
            .field("loading", &state.loading)
            .field("sections", &state.sections.len())
            .field("generation", &state.generation)
            .finish_non_exhaustive()
    }
}

fn lock(state: &Mutex<ControllerState>) -> MutexGuard<'_, ControllerState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Drive one load cycle: fetch pages sequentially until the collection is
/// exhausted, the cycle is superseded, or the transport fails.
///
/// Holds only a weak reference to the controller state; once the
/// controller is dropped, any still-pending completion becomes a no-op.
async fn drive(
    state: Weak<Mutex<ControllerState>>,
    transport: Arc<dyn SearchTransport>,
    generation: u64,
) {
    let mut initial_page = true;

    loop {
        let criteria = {
            let Some(state) = state.upgrade() else { return };
            let guard = lock(&state);
            if guard.generation != generation {
                return;
            }
            guard.snapshot()
        };

        let request = FetchRequest::start(Arc::clone(&transport), criteria);
        {
            let Some(state) = state.upgrade() else {
                request.cancel();
                return;
            };
            let mut guard = lock(&state);
            if guard.generation != generation {
                request.cancel();
                return;
            }
            guard.in_flight = Some(request.abort_handle());
        }

        let (criteria, outcome) = request.resolve().await;

        let Some(state_arc) = state.upgrade() else {
            return;
        };

        let listeners;
        let mut loaded_items: Option<Vec<Event>> = None;
        let mut load_error = None;
        let mut continue_paging = false;
        {
            let mut guard = lock(&state_arc);
            if guard.generation != generation {
                // A newer reload owns all notifications from here on.
                return;
            }
            listeners = guard.listeners.clone();

            match outcome {
                Outcome::Cancelled => return,
                Outcome::Failed(error) => {
                    warn!(generation, %error, "page fetch failed");
                    guard.loading = false;
                    guard.in_flight = None;
                    load_error = Some(error);
                }
                Outcome::Success(page) => {
                    if !guard.accepts(&criteria) {
                        guard.in_flight = None;
                        if initial_page {
                            // The caller has moved on; the superseding
                            // reload already notified its own will-load.
                            debug!(generation, "stale initial page dropped");
                            return;
                        }
                        // Listeners saw earlier pages of this cycle, so
                        // the cycle still has to settle visibly.
                        debug!(generation, "stale continuation page, settling");
                        loaded_items = Some(Vec::new());
                    } else {
                        guard.loading = false;
                        if !page.events.is_empty() {
                            guard.sections.push(page.events.clone());
                        }
                        if page.page_count > guard.page {
                            guard.page += 1;
                            continue_paging = true;
                        } else {
                            guard.in_flight = None;
                        }
                        debug!(
                            generation,
                            page = page.page_number,
                            events = page.events.len(),
                            continue_paging,
                            "page accepted"
                        );
                        loaded_items = Some(page.events);
                    }
                }
            }
        }

        // Listener callbacks run outside the state lock so a listener may
        // call back into the controller (e.g. trigger another reload).
        if let Some(error) = load_error {
            for listener in &listeners {
                listener.on_did_error(&error);
            }
            return;
        }
        if let Some(items) = loaded_items {
            for listener in &listeners {
                listener.on_did_load(&items);
            }
        }
        if !continue_paging {
            return;
        }

        for listener in &listeners {
            listener.on_will_load();
        }
        initial_page = false;
    }
}

impl ControllerState {
    /// Build a criteria snapshot from the current filter fields.
    ///
    /// Location and radius only form a geo filter together; a partial
    /// pair degrades to a city-based search.
    fn snapshot(&self) -> FilterCriteria {
        let mut criteria = FilterCriteria::new()
            .with_keyword(self.keyword.clone())
            .with_categories(self.categories.clone())
            .with_cities(self.cities.clone())
            .with_dates(self.dates.clone())
            .with_page(self.page);
        if let (Some(point), Some(radius_mi)) = (self.location, self.radius_mi) {
            criteria = criteria.with_geo(GeoFilter::new(point, radius_mi));
        }
        criteria
    }

    /// Decide whether a just-arrived response still corresponds to the
    /// filter state the controller cares about right now.
    ///
    /// For a request that carried a location filter: invalid when the
    /// controller has since dropped location search entirely; otherwise
    /// valid while the current location stays within the drift threshold
    /// of the request's location, or the radius has changed. For a
    /// city-mode request: invalid when the controller has switched to
    /// location search, or the primary city differs.
    fn accepts(&self, criteria: &FilterCriteria) -> bool {
        if let Some(geo) = criteria.geo() {
            if self.location.is_none() && self.radius_mi.is_none() {
                return false;
            }
            let near = self
                .location
                .is_some_and(|current| {
                    current.within_meters(&geo.point, LOCATION_DRIFT_THRESHOLD_METERS)
                });
            let radius_changed = self.radius_mi != Some(geo.radius_mi);
            near || radius_changed
        } else {
            if self.location.is_some() && self.radius_mi.is_some() {
                return false;
            }
            self.cities.first().map(String::as_str) == criteria.primary_city()
        }
    }
}
