//! Data models for the publications proxy.
//!
//! All raw SerpAPI models use `#[serde(default)]` so missing fields fall back
//! to empty values instead of failing the whole page.

mod publication;
mod serpapi;

pub use publication::{PageRequest, PublicationRecord, PublicationsPage};
pub use serpapi::{
    RawArticle, RawArticleCitedBy, RawCitationTotals, RawCitedBy, RawCitedByRow, RawPagination,
    ScholarAuthorResponse,
};
