//! Scholar Publications Proxy
//!
//! A small service and client library for paginating a researcher's Google
//! Scholar publication list through SerpAPI without exposing the credential
//! or the upstream schema to presentational code.
//!
//! # Components
//!
//! - **Proxy** ([`client`] + [`server`]): `GET /api/publications` fetches one
//!   page from SerpAPI, validates the payload shape, and returns a normalized
//!   paginated envelope.
//! - **Fetcher** ([`fetcher`]): drives the proxy across user pagination with
//!   last-writer-wins sequencing, owning the `loading`/`error`/records state
//!   a UI renders from.
//! - **Filters** ([`filters`]): pure search/year filtering and year-descending
//!   sorting over a result set.
//!
//! # Example
//!
//! ```no_run
//! use scholar_proxy::{Config, SerpApiClient, models::PageRequest};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = SerpApiClient::new(&Config::default())?;
//!     let request = PageRequest::new("SCHOLAR_ID", "SERPAPI_KEY").with_page_size(10);
//!     let page = client.get_publications_page(&request).await?;
//!     println!("{} publications, next page: {}", page.publications.len(), page.has_next);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod filters;
pub mod models;
pub mod server;

pub use client::SerpApiClient;
pub use config::Config;
pub use error::{ProxyError, ProxyResult};
pub use fetcher::{PublicationFetcher, PublicationsState};
pub use filters::{PublicationFilters, filter_and_sort, unique_years};
pub use models::{PageRequest, PublicationRecord, PublicationsPage};
