//! Internal publication record and page envelope.

use serde::{Deserialize, Serialize};

/// One bibliographic entry in the internal shape.
///
/// Every field is independently defaulted; the only derived field is
/// `description`, which is always recomputed from venue and citation count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationRecord {
    /// Publication title. May be empty if the source omits it.
    #[serde(default)]
    pub title: String,

    /// Free-form author string (comma/and-separated, not decomposed).
    #[serde(default)]
    pub authors: String,

    /// Publication year, kept as a string. Source data is not always a
    /// clean 4-digit year.
    #[serde(default)]
    pub year: String,

    /// Journal or conference name.
    #[serde(default)]
    pub venue: String,

    /// Citation count. Zero when the source has no citation metric.
    #[serde(default)]
    pub citations: u64,

    /// Link to the publication. The key is omitted entirely when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Display string, always `"<venue> - <citations> citations"`.
    #[serde(default)]
    pub description: String,
}

impl PublicationRecord {
    /// Build the display description from a venue and citation count.
    #[must_use]
    pub fn describe(venue: &str, citations: u64) -> String {
        format!("{venue} - {citations} citations")
    }
}

/// One page request against the proxy. Ephemeral, never persisted.
#[derive(Clone)]
pub struct PageRequest {
    /// Opaque Google Scholar author identifier.
    pub scholar_id: String,

    /// SerpAPI credential. Never logged.
    pub api_key: String,

    /// Zero-based index into the author's full publication list.
    pub offset: u32,

    /// Number of records requested per page.
    pub page_size: u32,
}

impl PageRequest {
    /// Create a request for the first page with the default page size.
    #[must_use]
    pub fn new(scholar_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            scholar_id: scholar_id.into(),
            api_key: api_key.into(),
            offset: 0,
            page_size: crate::config::api::DEFAULT_PAGE_SIZE,
        }
    }

    /// Set the page offset.
    #[must_use]
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// Set the page size.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Check both required identifiers are present.
    #[must_use]
    pub fn has_required_params(&self) -> bool {
        !self.scholar_id.is_empty() && !self.api_key.is_empty()
    }
}

// The API credential must never reach logs, so Debug redacts it.
impl std::fmt::Debug for PageRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageRequest")
            .field("scholar_id", &self.scholar_id)
            .field("api_key", &"<redacted>")
            .field("offset", &self.offset)
            .field("page_size", &self.page_size)
            .finish()
    }
}

/// A paginated page of publications, as served to clients.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationsPage {
    /// Records in upstream order (most recent first).
    #[serde(default)]
    pub publications: Vec<PublicationRecord>,

    /// Offset this page starts at.
    #[serde(default)]
    pub start: u32,

    /// Page size that was requested.
    #[serde(default)]
    pub limit: u32,

    /// Whether the upstream reported a further page.
    #[serde(default)]
    pub has_next: bool,

    /// True iff `start > 0`.
    #[serde(default)]
    pub has_prev: bool,

    /// Best-effort total; falls back to the current page's record count
    /// when the upstream aggregate is unavailable.
    #[serde(default)]
    pub total_results: u64,
}
