//! Tests for fetch requests

use super::*;
use crate::types::Event;
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

/// Transport that responds with a fixed page after an optional delay
struct FixedTransport {
    delay: Duration,
    result_page: Option<EventPage>,
}

#[async_trait]
impl SearchTransport for FixedTransport {
    async fn search(&self, _criteria: &FilterCriteria) -> Result<EventPage> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.result_page {
            Some(page) => Ok(page.clone()),
            None => Err(Error::http_status(500, "boom")),
        }
    }
}

fn page_with(ids: &[&str]) -> EventPage {
    let events = ids
        .iter()
        .map(|id| Event::from(json!({ "id": id })))
        .collect();
    EventPage::new(events, 1, 1)
}

#[tokio::test]
async fn test_request_success() {
    let transport = Arc::new(FixedTransport {
        delay: Duration::ZERO,
        result_page: Some(page_with(&["e1", "e2"])),
    });

    let criteria = FilterCriteria::new().with_page(1);
    let request = FetchRequest::start(transport, criteria.clone());
    assert_eq!(request.criteria(), &criteria);

    let (resolved_criteria, outcome) = request.resolve().await;
    assert_eq!(resolved_criteria, criteria);
    match outcome {
        Outcome::Success(page) => assert_eq!(page.len(), 2),
        other => panic!("expected success, got {other:?}"),
    }
}

#[tokio::test]
async fn test_request_failure() {
    let transport = Arc::new(FixedTransport {
        delay: Duration::ZERO,
        result_page: None,
    });

    let request = FetchRequest::start(transport, FilterCriteria::new());
    let (_, outcome) = request.resolve().await;
    match outcome {
        Outcome::Failed(err) => assert!(err.to_string().contains("HTTP 500")),
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_request_cancel_resolves_cancelled() {
    let transport = Arc::new(FixedTransport {
        delay: Duration::from_secs(30),
        result_page: Some(page_with(&["e1"])),
    });

    let request = FetchRequest::start(transport, FilterCriteria::new());
    request.cancel();

    let (_, outcome) = request.resolve().await;
    assert!(outcome.is_cancelled());
    assert!(!outcome.is_success());
}

#[tokio::test]
async fn test_abort_handle_cancels_from_elsewhere() {
    let transport = Arc::new(FixedTransport {
        delay: Duration::from_secs(30),
        result_page: Some(page_with(&["e1"])),
    });

    let request = FetchRequest::start(transport, FilterCriteria::new());
    let handle = request.abort_handle();
    handle.abort();

    let (_, outcome) = request.resolve().await;
    assert!(outcome.is_cancelled());
}
