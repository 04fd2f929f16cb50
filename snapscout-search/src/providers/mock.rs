//! Scripted provider for testing session behaviour.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use super::demo::demo_page;
use super::{MediaProvider, run_cancellable};
use crate::errors::SearchError;
use crate::raw::RawPage;
use crate::types::{MediaKind, SearchRequest};

/// Canned behaviour for one query.
#[derive(Debug, Clone)]
pub struct ScriptedResponse {
    /// Time before the call resolves
    pub delay: Duration,
    /// `None` serves the generated demo page for the request
    pub outcome: Option<Result<RawPage, SearchError>>,
}

impl ScriptedResponse {
    /// Serves the generated page after `delay`.
    pub fn after(delay: Duration) -> Self {
        Self {
            delay,
            outcome: None,
        }
    }

    /// Fails with `error` after `delay`.
    pub fn fail_after(delay: Duration, error: SearchError) -> Self {
        Self {
            delay,
            outcome: Some(Err(error)),
        }
    }

    /// Serves `page` after `delay`.
    pub fn page_after(delay: Duration, page: RawPage) -> Self {
        Self {
            delay,
            outcome: Some(Ok(page)),
        }
    }
}

/// Provider whose latency and outcome are scripted per query.
///
/// Unscripted queries answer immediately with the demo page. Every call is
/// recorded, and calls that end through cancellation are counted, so tests
/// can assert both what was issued and what was superseded.
#[derive(Debug, Clone)]
pub struct ScriptedProvider {
    kind: MediaKind,
    scripts: Arc<Mutex<HashMap<String, ScriptedResponse>>>,
    calls: Arc<Mutex<Vec<SearchRequest>>>,
    cancellations: Arc<AtomicUsize>,
}

impl ScriptedProvider {
    /// Creates a provider for `kind` with no scripts.
    pub fn new(kind: MediaKind) -> Self {
        Self {
            kind,
            scripts: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            cancellations: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Sets the behaviour for `query`, replacing any earlier script.
    pub fn script(&self, query: impl Into<String>, response: ScriptedResponse) -> &Self {
        self.scripts.lock().insert(query.into(), response);
        self
    }

    /// Requests received so far, in arrival order.
    pub fn calls(&self) -> Vec<SearchRequest> {
        self.calls.lock().clone()
    }

    /// Number of requests received so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Number of calls that ended because their token was cancelled.
    pub fn cancellation_count(&self) -> usize {
        self.cancellations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaProvider for ScriptedProvider {
    fn kind(&self) -> MediaKind {
        self.kind
    }

    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn search(
        &self,
        request: &SearchRequest,
        cancel: &CancellationToken,
    ) -> Result<RawPage, SearchError> {
        self.calls.lock().push(request.clone());

        let script = self
            .scripts
            .lock()
            .get(&request.query)
            .cloned()
            .unwrap_or_else(|| ScriptedResponse::after(Duration::ZERO));
        let delay = script.delay;
        let outcome = script
            .outcome
            .unwrap_or_else(|| Ok(demo_page(self.kind, request)));

        let result = run_cancellable(cancel, async move {
            tokio::time::sleep(delay).await;
            outcome
        })
        .await;

        if matches!(result, Err(SearchError::Cancelled)) {
            self.cancellations.fetch_add(1, Ordering::SeqCst);
        }

        result
    }
}
