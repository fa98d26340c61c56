//! Pure filtering and sorting helpers over publication records.
//!
//! These are side-effect-free and usable on either side of the proxy
//! boundary; the fetcher applies them to each page before exposing it.

use std::cmp::Reverse;

use crate::models::PublicationRecord;

/// Sentinel year value meaning "no year filter".
pub const ALL_YEARS: &str = "all";

/// Optional filters applied to a result set.
#[derive(Debug, Clone, Default)]
pub struct PublicationFilters {
    /// Case-insensitive substring matched against title, authors, and venue.
    pub search_term: Option<String>,

    /// Exact year to retain, or the [`ALL_YEARS`] sentinel.
    pub selected_year: Option<String>,
}

impl PublicationFilters {
    /// Filter by search term.
    #[must_use]
    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    /// Filter by exact year.
    #[must_use]
    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.selected_year = Some(year.into());
        self
    }
}

/// Filter records by the given criteria, then sort descending by year.
///
/// The sort is stable: records with equal (or equally unparseable) years keep
/// the order the server returned them in. Years that do not parse as numbers
/// sort as 0 and sink to the end. Returns a new vector; the input is never
/// mutated.
#[must_use]
pub fn filter_and_sort(
    records: &[PublicationRecord],
    filters: &PublicationFilters,
) -> Vec<PublicationRecord> {
    let mut filtered: Vec<PublicationRecord> = records.to_vec();

    if let Some(term) = filters.search_term.as_deref() {
        let term = term.trim().to_lowercase();
        if !term.is_empty() {
            filtered.retain(|record| {
                record.title.to_lowercase().contains(&term)
                    || record.authors.to_lowercase().contains(&term)
                    || record.venue.to_lowercase().contains(&term)
            });
        }
    }

    if let Some(year) = filters.selected_year.as_deref() {
        if year != ALL_YEARS {
            filtered.retain(|record| record.year == year);
        }
    }

    filtered.sort_by_key(|record| Reverse(numeric_year(&record.year)));
    filtered
}

/// Distinct non-empty years present in the records, newest first.
///
/// Intended for populating a year-filter control. Blank years are excluded;
/// duplicates appear once.
#[must_use]
pub fn unique_years(records: &[PublicationRecord]) -> Vec<String> {
    let mut years: Vec<String> = Vec::new();
    for record in records {
        if record.year.trim().is_empty() {
            continue;
        }
        if !years.contains(&record.year) {
            years.push(record.year.clone());
        }
    }
    years.sort_by_key(|year| Reverse(numeric_year(year)));
    years
}

fn numeric_year(year: &str) -> i64 {
    year.trim().parse().unwrap_or(0)
}
