//! Common types used throughout eventfeed
//!
//! This module contains shared type definitions and type aliases
//! used across multiple modules.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// Event
// ============================================================================

/// A single remote item in the feed.
///
/// The feed layer treats events as opaque JSON payloads; domain modeling
/// beyond the few fields needed for display is up to the consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Event(pub JsonValue);

impl Event {
    /// Server-side identifier, when present
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(JsonValue::as_str)
    }

    /// Display name, when present
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(JsonValue::as_str)
    }

    /// Access to the raw payload
    pub fn as_json(&self) -> &JsonValue {
        &self.0
    }
}

impl From<JsonValue> for Event {
    fn from(value: JsonValue) -> Self {
        Self(value)
    }
}

// ============================================================================
// Event Page
// ============================================================================

/// One batch of events plus server-reported pagination metadata
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventPage {
    /// Events in this page, in server order
    pub events: Vec<Event>,
    /// Page number as reported by the server (may be corrected relative
    /// to the requested page)
    pub page_number: u32,
    /// Total number of pages on the server for this filter
    pub page_count: u32,
}

impl EventPage {
    /// Create a page from parsed parts
    pub fn new(events: Vec<Event>, page_number: u32, page_count: u32) -> Self {
        Self {
            events,
            page_number,
            page_count,
        }
    }

    /// Check whether the page carries no events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of events in this page
    pub fn len(&self) -> usize {
        self.events.len()
    }
}
