//! SerpAPI client for Google Scholar author publications.
//!
//! Async HTTP client with:
//! - Connection pooling via reqwest
//! - Retry middleware with exponential backoff
//! - Explicit request/connect timeouts (a hung upstream becomes a failure)

use std::time::Duration;

use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use url::Url;

use crate::config::{Config, api};
use crate::error::{ProxyError, ProxyResult};
use crate::models::{PageRequest, PublicationRecord, PublicationsPage, ScholarAuthorResponse};

/// Client for the SerpAPI Google Scholar author endpoint.
///
/// Stateless: holds no cross-request data, so repeated calls with identical
/// inputs differ only if the upstream data changed.
#[derive(Clone)]
pub struct SerpApiClient {
    /// HTTP client with retry middleware.
    client: ClientWithMiddleware,

    /// SerpAPI base URL.
    base_url: String,
}

impl SerpApiClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .gzip(true)
            .build()?;

        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(Duration::from_secs(1), Duration::from_secs(30))
            .build_with_max_retries(3);

        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self { client, base_url: config.serpapi_base_url.clone() })
    }

    /// Fetch one page of an author's publications, sorted by publication
    /// date descending, mapped into the internal record shape.
    ///
    /// # Errors
    ///
    /// - [`ProxyError::InvalidRequest`] when the scholar id or credential is
    ///   empty (no upstream call is made).
    /// - [`ProxyError::Upstream`] when SerpAPI answers with a non-success
    ///   status or times out.
    /// - [`ProxyError::UpstreamSchema`] when the payload carries no usable
    ///   article list.
    /// - [`ProxyError::Unexpected`] for anything else.
    pub async fn get_publications_page(
        &self,
        request: &PageRequest,
    ) -> ProxyResult<PublicationsPage> {
        if !request.has_required_params() {
            return Err(ProxyError::InvalidRequest);
        }

        let url = self.search_url(request)?;

        tracing::debug!(
            scholar_id = %request.scholar_id,
            start = request.offset,
            num = request.page_size,
            "fetching publications page from SerpAPI"
        );

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "SerpAPI returned an error status");
            return Err(ProxyError::upstream(status.as_u16(), body));
        }

        let payload: serde_json::Value = response.json().await?;
        Self::map_page(&payload, request.offset, request.page_size)
    }

    /// Validate and reshape a raw SerpAPI payload into a page envelope.
    ///
    /// A page either fully succeeds (every article mapped) or fully fails:
    /// a missing article list, a non-array one, or an undecodable article
    /// all yield a schema error carrying the raw payload.
    fn map_page(
        payload: &serde_json::Value,
        offset: u32,
        page_size: u32,
    ) -> ProxyResult<PublicationsPage> {
        let Ok(parsed) = serde_json::from_value::<ScholarAuthorResponse>(payload.clone()) else {
            return Err(ProxyError::upstream_schema(payload.clone()));
        };
        let has_next = parsed.has_next();
        let total_citations = parsed.total_citations();

        let Some(articles) = parsed.articles else {
            return Err(ProxyError::upstream_schema(payload.clone()));
        };

        let publications: Vec<PublicationRecord> =
            articles.into_iter().map(PublicationRecord::from).collect();

        Ok(PublicationsPage {
            total_results: total_citations.unwrap_or(publications.len() as u64),
            start: offset,
            limit: page_size,
            has_next,
            has_prev: offset > 0,
            publications,
        })
    }

    /// Build the outbound search URL.
    ///
    /// The credential rides in the query string (that is SerpAPI's contract);
    /// the resulting URL must therefore never be logged.
    fn search_url(&self, request: &PageRequest) -> ProxyResult<Url> {
        let start = request.offset.to_string();
        let num = request.page_size.to_string();
        Url::parse_with_params(
            &format!("{}{}", self.base_url, api::SEARCH_PATH),
            &[
                ("engine", api::ENGINE),
                ("author_id", request.scholar_id.as_str()),
                ("api_key", request.api_key.as_str()),
                ("start", start.as_str()),
                ("num", num.as_str()),
                ("sort", api::SORT_BY_DATE),
            ],
        )
        .map_err(|e| ProxyError::unexpected(format!("invalid SerpAPI URL: {e}")))
    }
}

impl std::fmt::Debug for SerpApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerpApiClient").field("base_url", &self.base_url).finish()
    }
}
