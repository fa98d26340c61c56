//! Configuration for the publications proxy.

use std::time::Duration;

/// SerpAPI constants.
pub mod api {
    use std::time::Duration;

    /// Base URL for SerpAPI.
    pub const BASE_URL: &str = "https://serpapi.com";

    /// Search endpoint path.
    pub const SEARCH_PATH: &str = "/search.json";

    /// Engine identifier for Google Scholar author queries.
    pub const ENGINE: &str = "google_scholar_author";

    /// Sort directive: author publications by publication date, newest first.
    pub const SORT_BY_DATE: &str = "pubdate";

    /// Default number of publications per page.
    pub const DEFAULT_PAGE_SIZE: u32 = 10;

    /// Request timeout. A hung upstream maps to an upstream failure.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
}

/// Proxy configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL for SerpAPI (overridable for mock servers in tests).
    pub serpapi_base_url: String,

    /// Server-side SerpAPI credential, used when the request carries none.
    pub serpapi_key: Option<String>,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Page size used when the request does not specify one.
    pub default_page_size: u32,
}

impl Config {
    /// Create a configuration with an optional server-side credential.
    #[must_use]
    pub fn new(serpapi_key: Option<String>) -> Self {
        Self {
            serpapi_base_url: api::BASE_URL.to_string(),
            serpapi_key,
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            default_page_size: api::DEFAULT_PAGE_SIZE,
        }
    }

    /// Create a test configuration pointed at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            serpapi_base_url: base_url.to_string(),
            serpapi_key: None,
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            default_page_size: api::DEFAULT_PAGE_SIZE,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// `SERPAPI_KEY` supplies the server-side credential; `SERPAPI_BASE_URL`
    /// overrides the upstream endpoint.
    ///
    /// # Errors
    ///
    /// Returns error if environment variables are invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::new(std::env::var("SERPAPI_KEY").ok());
        if let Ok(base_url) = std::env::var("SERPAPI_BASE_URL") {
            config.serpapi_base_url = base_url;
        }
        Ok(config)
    }

    /// Check if a server-side credential is configured.
    #[must_use]
    pub const fn has_serpapi_key(&self) -> bool {
        self.serpapi_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}
