//! HTTP transport implementation
//!
//! A thin reqwest-based client: one GET per search, lenient response
//! parsing. Retries and rate limiting are deliberately absent; staleness
//! and supersession are handled above this layer by the controller.

use super::SearchTransport;
use crate::error::{Error, Result};
use crate::filter::FilterCriteria;
use crate::types::{Event, EventPage, JsonValue, StringMap};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Configuration for the HTTP transport
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Base URL for the search API
    pub base_url: String,
    /// Path of the search endpoint
    pub search_path: String,
    /// Request timeout
    pub timeout: Duration,
    /// Default headers for all requests
    pub default_headers: StringMap,
    /// User agent string
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            search_path: "/Search".to_string(),
            timeout: Duration::from_secs(30),
            default_headers: StringMap::new(),
            user_agent: format!("eventfeed/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl TransportConfig {
    /// Create a new config builder
    pub fn builder() -> TransportConfigBuilder {
        TransportConfigBuilder::default()
    }
}

/// Builder for transport config
#[derive(Default)]
pub struct TransportConfigBuilder {
    config: TransportConfig,
}

impl TransportConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the search endpoint path
    pub fn search_path(mut self, path: impl Into<String>) -> Self {
        self.config.search_path = path.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> TransportConfig {
        self.config
    }
}

/// reqwest-backed search transport
pub struct HttpTransport {
    client: Client,
    config: TransportConfig,
}

impl HttpTransport {
    /// Create a transport, validating the configured base URL
    pub fn new(config: TransportConfig) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(Error::missing_field("base_url"));
        }
        Url::parse(&config.base_url)?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(Error::Http)?;

        Ok(Self { client, config })
    }

    fn search_url(&self) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        let path = &self.config.search_path;
        format!("{base}{path}")
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl SearchTransport for HttpTransport {
    async fn search(&self, criteria: &FilterCriteria) -> Result<EventPage> {
        let url = self.search_url();
        let mut req = self.client.get(&url);

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }
        req = req.query(&criteria.query_params());

        debug!(page = criteria.page(), %url, "searching events");

        let response = req.send().await.map_err(Error::Http)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        let body = response.text().await.map_err(Error::Http)?;
        let page = parse_search_page(&body, criteria.page());
        debug!(
            page = page.page_number,
            page_count = page.page_count,
            events = page.len(),
            "page fetched"
        );
        Ok(page)
    }
}

/// Parse a search response body leniently.
///
/// Missing or malformed fields degrade to "zero events, page count
/// unknown" so a partial payload can never break the paging loop.
pub(crate) fn parse_search_page(body: &str, requested_page: u32) -> EventPage {
    let value: JsonValue = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(err) => {
            warn!(%err, "malformed search response, treating as empty page");
            JsonValue::Null
        }
    };

    let events = value
        .get("events")
        .and_then(JsonValue::as_array)
        .map(|items| {
            items
                .iter()
                .filter(|item| item.is_object())
                .cloned()
                .map(Event::from)
                .collect()
        })
        .unwrap_or_default();

    let pagination = value.get("pagination");
    let page_number = pagination
        .and_then(|p| p.get("page_number"))
        .and_then(JsonValue::as_u64)
        .map_or(requested_page, |n| n as u32);
    let page_count = pagination
        .and_then(|p| p.get("page_count"))
        .and_then(JsonValue::as_u64)
        .map_or(0, |n| n as u32);

    EventPage::new(events, page_number, page_count)
}
