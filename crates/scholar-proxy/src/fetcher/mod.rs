//! Client-side publication fetcher.
//!
//! Drives the proxy's `/api/publications` endpoint across a pagination
//! session and owns the display state presentational code renders from.
//! No other component writes that state.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use reqwest::Client;
use tokio::sync::RwLock;

use crate::filters::{PublicationFilters, filter_and_sort};
use crate::models::{PublicationRecord, PublicationsPage};

/// Display state owned by the fetcher.
///
/// `publications` is replaced wholesale on success and left untouched on
/// failure, so stale data can keep rendering during a reload.
#[derive(Debug, Clone, Default)]
pub struct PublicationsState {
    /// Current page of records, filtered and sorted.
    pub publications: Vec<PublicationRecord>,

    /// Offset of the current page.
    pub offset: u32,

    /// True while a fetch is in flight.
    pub loading: bool,

    /// Human-readable failure message from the last attempt, if any.
    pub error: Option<String>,

    /// Whether the server reported a further page.
    pub has_next: bool,

    /// Whether a previous page exists (`offset > 0`).
    pub has_prev: bool,

    /// Best-effort total result count from the server.
    pub total_results: u64,
}

/// Fetches publication pages from the proxy and maintains display state.
///
/// Concurrency: each `load_page` call takes a monotonically increasing
/// sequence number; a result is applied only if its number is still the
/// latest when it resolves. Rapid pagination therefore always settles on the
/// last-initiated request, regardless of completion order.
#[derive(Clone)]
pub struct PublicationFetcher {
    http: Client,
    endpoint: String,
    scholar_id: String,
    api_key: String,
    page_size: u32,
    state: Arc<RwLock<PublicationsState>>,
    latest: Arc<AtomicU64>,
}

impl PublicationFetcher {
    /// Create a fetcher against a proxy endpoint
    /// (e.g. `http://localhost:8000/api/publications`).
    #[must_use]
    pub fn new(
        endpoint: impl Into<String>,
        scholar_id: impl Into<String>,
        api_key: impl Into<String>,
        page_size: u32,
    ) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
            scholar_id: scholar_id.into(),
            api_key: api_key.into(),
            page_size,
            state: Arc::new(RwLock::new(PublicationsState::default())),
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Snapshot of the current display state.
    pub async fn state(&self) -> PublicationsState {
        self.state.read().await.clone()
    }

    /// Load the page at `offset`, applying `filters` to the result.
    ///
    /// Never returns an error: failures land in the state's `error` field so
    /// presentational consumers only branch on `loading`/`error`/records.
    pub async fn load_page(&self, offset: u32, filters: &PublicationFilters) {
        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
        }

        let outcome = self.fetch_page(offset).await;

        let mut state = self.state.write().await;

        // A newer request was issued while this one was in flight; its
        // outcome owns the state now. Discard ours entirely.
        if self.latest.load(Ordering::SeqCst) != seq {
            return;
        }
        match outcome {
            Ok(page) => {
                state.publications = filter_and_sort(&page.publications, filters);
                state.offset = page.start;
                state.has_next = page.has_next;
                state.has_prev = page.has_prev;
                state.total_results = page.total_results;
                state.error = None;
            }
            Err(message) => {
                tracing::warn!(offset, %message, "publication page fetch failed");
                state.error = Some(message);
            }
        }
        state.loading = false;
    }

    /// Advance one page. `has_next` only advises the UI; the step itself is
    /// unconditional.
    pub async fn next_page(&self, filters: &PublicationFilters) {
        let offset = self.state.read().await.offset + self.page_size;
        self.load_page(offset, filters).await;
    }

    /// Step back one page, clamped at offset 0.
    pub async fn prev_page(&self, filters: &PublicationFilters) {
        let offset = self.state.read().await.offset.saturating_sub(self.page_size);
        self.load_page(offset, filters).await;
    }

    /// One round-trip to the proxy. All failure shapes (transport, HTTP
    /// status, embedded `error` field) collapse into a message string.
    async fn fetch_page(&self, offset: u32) -> Result<PublicationsPage, String> {
        let start = offset.to_string();
        let limit = self.page_size.to_string();
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("scholarId", self.scholar_id.as_str()),
                ("serpApiKey", self.api_key.as_str()),
                ("start", start.as_str()),
                ("limit", limit.as_str()),
            ])
            .send()
            .await
            .map_err(|e| format!("Failed to reach publications API: {e}"))?;

        let status = response.status();
        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| format!("Invalid response from publications API: {e}"))?;

        // Error bodies carry an "error" field even when the status is
        // non-success, so check the field first for the richer message.
        if let Some(error) = payload.get("error").and_then(serde_json::Value::as_str) {
            return Err(error.to_string());
        }
        if !status.is_success() {
            return Err(format!("API error: {status}"));
        }

        serde_json::from_value(payload)
            .map_err(|e| format!("Invalid response from publications API: {e}"))
    }
}

impl std::fmt::Debug for PublicationFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicationFetcher")
            .field("endpoint", &self.endpoint)
            .field("scholar_id", &self.scholar_id)
            .field("page_size", &self.page_size)
            .finish()
    }
}
