//! Search result envelopes.

use serde::{Deserialize, Serialize};

/// One page of search results as returned by the API.
///
/// The API omits `results` (and sometimes `total_pages`) when nothing
/// matches, so both default to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse<T> {
    /// Total matches for the query (across all pages).
    #[serde(default)]
    pub count: u64,
    /// Total number of pages at the requested page size.
    #[serde(default)]
    pub total_pages: u32,
    /// Records on this page.
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_page_url: Option<String>,
    /// Identifiers the API could not resolve, reported by batch fetches.
    #[serde(default, skip_serializing_if = "SearchErrors::is_empty")]
    pub errors: SearchErrors,
}

/// The `errors` member of a batch fetch envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchErrors {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub not_found: Vec<String>,
}

impl SearchErrors {
    pub fn is_empty(&self) -> bool {
        self.not_found.is_empty()
    }
}

impl<T> SearchResponse<T> {
    /// Builds an envelope from a fully materialized result list.
    pub fn collected(results: Vec<T>, count: u64) -> Self {
        Self {
            count,
            total_pages: 1,
            results,
            description: None,
            next_page_url: None,
            previous_page_url: None,
            errors: SearchErrors::default(),
        }
    }

    /// Records identifiers that matched nothing.
    pub fn with_not_found<I, S>(mut self, numbers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.errors.not_found.extend(numbers.into_iter().map(Into::into));
        self
    }
}

impl<T> Default for SearchResponse<T> {
    fn default() -> Self {
        Self {
            count: 0,
            total_pages: 0,
            results: Vec::new(),
            description: None,
            next_page_url: None,
            previous_page_url: None,
            errors: SearchErrors::default(),
        }
    }
}

/// One bucket of a `/documents/facets/{facet}` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetCount {
    pub count: u64,
    pub name: String,
}
