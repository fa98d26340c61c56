//! Raw SerpAPI response schema for Google Scholar author queries.

use serde::Deserialize;

use super::PublicationRecord;

/// Top-level SerpAPI author response.
///
/// Only the fields the proxy consumes are modelled. `articles` stays an
/// `Option` so a missing list is distinguishable from an empty one (the
/// former is a schema failure, the latter a valid empty page).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScholarAuthorResponse {
    /// The author's publications for the requested page.
    pub articles: Option<Vec<RawArticle>>,

    /// Pagination metadata; `next` present means a further page exists.
    #[serde(default)]
    pub serpapi_pagination: Option<RawPagination>,

    /// Author-level citation aggregate table.
    #[serde(default)]
    pub cited_by: Option<RawCitedBy>,
}

impl ScholarAuthorResponse {
    /// Whether the upstream reported a next page.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.serpapi_pagination.as_ref().is_some_and(|p| p.next.is_some())
    }

    /// Authoritative total citation count, when the aggregate table carries one.
    #[must_use]
    pub fn total_citations(&self) -> Option<u64> {
        self.cited_by
            .as_ref()?
            .table
            .first()?
            .citations
            .as_ref()?
            .all
    }
}

/// One article as returned by SerpAPI.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawArticle {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub authors: String,

    #[serde(default)]
    pub year: String,

    /// Venue string; SerpAPI calls this `publication`.
    #[serde(default)]
    pub publication: String,

    /// Per-article citation metric.
    #[serde(default)]
    pub cited_by: Option<RawArticleCitedBy>,

    #[serde(default)]
    pub link: Option<String>,
}

/// Per-article `cited_by` structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawArticleCitedBy {
    #[serde(default)]
    pub value: Option<u64>,
}

/// Pagination block. Only the presence of `next` matters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPagination {
    #[serde(default)]
    pub next: Option<String>,
}

/// Author-level citation aggregate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCitedBy {
    #[serde(default)]
    pub table: Vec<RawCitedByRow>,
}

/// One row of the aggregate table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCitedByRow {
    #[serde(default)]
    pub citations: Option<RawCitationTotals>,
}

/// Citation totals within an aggregate row.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCitationTotals {
    #[serde(default)]
    pub all: Option<u64>,
}

impl From<RawArticle> for PublicationRecord {
    fn from(article: RawArticle) -> Self {
        let citations = article.cited_by.and_then(|c| c.value).unwrap_or(0);
        Self {
            description: Self::describe(&article.publication, citations),
            title: article.title,
            authors: article.authors,
            year: article.year,
            venue: article.publication,
            citations,
            // An empty link string means no link at all.
            url: article.link.filter(|link| !link.is_empty()),
        }
    }
}
