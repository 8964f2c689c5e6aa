//! Sequential page walker over a search operation.

use std::future::Future;

use fedreg_types::SearchResponse;
use tracing::debug;

use crate::query::SearchQuery;

/// Hard limits imposed by the Federal Register API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    /// Largest accepted `per_page`.
    pub max_per_page: u32,
    /// Matches reachable through paging for a single query.
    pub max_total_results: usize,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            max_per_page: 1000,
            max_total_results: 2000,
        }
    }
}

/// Collects up to `max_results` records across pages using the API's
/// default limits. See [`paginate_with_limits`].
pub async fn paginate<T, E, F, Fut>(
    search: F,
    query: SearchQuery,
    max_results: usize,
) -> Result<Vec<T>, E>
where
    F: FnMut(SearchQuery) -> Fut,
    Fut: Future<Output = Result<SearchResponse<T>, E>>,
{
    paginate_with_limits(search, query, max_results, PageLimits::default()).await
}

/// Requests pages 1, 2, ... of `query` one at a time and concatenates
/// their results.
///
/// Stops on the first empty page, once the page number reaches the
/// envelope's `total_pages`, or once `max_results` records are held
/// (the cap is clamped to `limits.max_total_results`). The page size is
/// the query's `per_page` clamped to `limits.max_per_page`, or the
/// ceiling when unset. A failing page aborts the walk.
pub async fn paginate_with_limits<T, E, F, Fut>(
    mut search: F,
    query: SearchQuery,
    max_results: usize,
    limits: PageLimits,
) -> Result<Vec<T>, E>
where
    F: FnMut(SearchQuery) -> Fut,
    Fut: Future<Output = Result<SearchResponse<T>, E>>,
{
    let max = max_results.min(limits.max_total_results);
    let per_page = query
        .per_page
        .filter(|n| *n > 0)
        .unwrap_or(limits.max_per_page)
        .min(limits.max_per_page);

    let mut collected = Vec::new();
    if max == 0 {
        return Ok(collected);
    }

    let mut page = 1;
    loop {
        let response = search(query.clone().with_page(page).with_per_page(per_page)).await?;
        debug!(
            page,
            per_page,
            received = response.results.len(),
            total_pages = response.total_pages,
            "fetched page"
        );

        if response.results.is_empty() {
            break;
        }
        collected.extend(response.results);

        if collected.len() >= max || page >= response.total_pages {
            break;
        }
        page += 1;
    }

    collected.truncate(max);
    Ok(collected)
}
