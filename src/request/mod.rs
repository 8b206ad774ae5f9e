//! Fetch requests
//!
//! A `FetchRequest` is one asynchronous search bound to one filter
//! criteria snapshot. It owns its cancellation handle and resolves to a
//! terminal outcome: success, failure, or cancelled.

use crate::error::{Error, Result};
use crate::filter::FilterCriteria;
use crate::transport::SearchTransport;
use crate::types::EventPage;
use futures::future::{AbortHandle, Abortable, Aborted};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Terminal outcome of a fetch request
#[derive(Debug)]
pub enum Outcome {
    /// The search completed and parsed into a page
    Success(EventPage),
    /// The transport reported an error
    Failed(Error),
    /// The request was cancelled before completing
    Cancelled,
}

impl Outcome {
    /// Check if this is a success outcome
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Check if this is a cancelled outcome
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// One in-flight search, bound to the criteria snapshot it was built with.
///
/// The transport future runs on a spawned task wrapped in an `Abortable`,
/// so `cancel` takes effect even while the transport is blocked on the
/// network. A cancelled request resolves to `Outcome::Cancelled`; its
/// result never reaches the result set.
pub struct FetchRequest {
    criteria: FilterCriteria,
    abort: AbortHandle,
    task: JoinHandle<std::result::Result<Result<EventPage>, Aborted>>,
}

impl FetchRequest {
    /// Issue the search for `criteria` on a background task
    pub fn start(transport: Arc<dyn SearchTransport>, criteria: FilterCriteria) -> Self {
        let (abort, registration) = AbortHandle::new_pair();
        let task_criteria = criteria.clone();
        let future = Abortable::new(
            async move { transport.search(&task_criteria).await },
            registration,
        );
        let task = tokio::spawn(future);

        debug!(page = criteria.page(), "fetch request started");
        Self {
            criteria,
            abort,
            task,
        }
    }

    /// The criteria snapshot this request was built with
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// A handle that can cancel this request from elsewhere
    pub fn abort_handle(&self) -> AbortHandle {
        self.abort.clone()
    }

    /// Abort the underlying transport operation
    pub fn cancel(&self) {
        self.abort.abort();
    }

    /// Wait for the request to settle, consuming it
    pub async fn resolve(self) -> (FilterCriteria, Outcome) {
        let outcome = match self.task.await {
            Ok(Ok(Ok(page))) => Outcome::Success(page),
            Ok(Ok(Err(err))) => Outcome::Failed(err),
            Ok(Err(Aborted)) => Outcome::Cancelled,
            Err(join_err) if join_err.is_cancelled() => Outcome::Cancelled,
            Err(join_err) => Outcome::Failed(Error::other(format!(
                "fetch task failed: {join_err}"
            ))),
        };
        (self.criteria, outcome)
    }
}

#[cfg(test)]
mod tests;
