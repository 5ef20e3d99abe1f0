//! Keyword-driven product collection.
//!
//! Picks unattempted keywords at random, paginates the search endpoint for
//! each, and accumulates products until the target count is reached or the
//! keyword pool runs out. A keyword is abandoned on its first recoverable
//! error or empty page; there is no retry and no backoff. A shortfall is
//! logged, not returned as an error.

use std::collections::HashSet;
use std::future::Future;

use affpages_core::{KeywordPool, ProductRecord};
use rand::Rng;

use crate::client::PartnersClient;
use crate::error::{ClientError, Disposition};
use crate::types::SearchPage;

/// A source of paginated keyword search results.
pub trait ProductSearch {
    fn search_page(
        &self,
        keyword: &str,
        page: u32,
        page_size: u32,
    ) -> impl Future<Output = Result<SearchPage, ClientError>>;
}

impl ProductSearch for PartnersClient {
    async fn search_page(
        &self,
        keyword: &str,
        page: u32,
        page_size: u32,
    ) -> Result<SearchPage, ClientError> {
        PartnersClient::search_page(self, keyword, page, page_size).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectParams {
    /// Maximum pages fetched per keyword.
    pub page_limit: u32,
    pub page_size: u32,
    /// Stop once this many products are collected.
    pub target_count: usize,
}

#[derive(Debug, Default)]
pub struct CollectOutcome {
    /// At most `target_count` products, in the order they were returned.
    pub products: Vec<ProductRecord>,
    /// Keywords tried in this run, in pick order. Never contains duplicates.
    pub attempted: Vec<String>,
}

impl CollectOutcome {
    #[must_use]
    pub fn shortfall(&self, target_count: usize) -> usize {
        target_count.saturating_sub(self.products.len())
    }
}

/// How a single keyword's pagination ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeywordEnd {
    TargetReached,
    EmptyPage,
    ShortPage,
    PageLimit,
    Skipped,
}

/// Collects up to `params.target_count` products from `pool`.
///
/// The number of keyword picks is capped at `pool.len() * page_limit`, and
/// the loop also ends once every keyword has been attempted.
///
/// # Errors
///
/// Returns the first error whose [`ClientError::disposition`] is
/// [`Disposition::Abort`]. Recoverable errors only end the current keyword.
pub async fn collect<S, R>(
    search: &S,
    pool: &KeywordPool,
    params: &CollectParams,
    rng: &mut R,
) -> Result<CollectOutcome, ClientError>
where
    S: ProductSearch,
    R: Rng,
{
    let mut outcome = CollectOutcome::default();
    let mut attempted: HashSet<usize> = HashSet::new();

    let page_limit = usize::try_from(params.page_limit).unwrap_or(usize::MAX);
    let max_picks = pool.len().saturating_mul(page_limit);
    let mut picks = 0usize;

    while outcome.products.len() < params.target_count && picks < max_picks {
        let remaining: Vec<usize> = (0..pool.len())
            .filter(|i| !attempted.contains(i))
            .collect();
        if remaining.is_empty() {
            break;
        }

        let index = remaining[rng.random_range(0..remaining.len())];
        attempted.insert(index);
        picks += 1;

        let Some(keyword) = pool.get(index) else {
            continue;
        };
        outcome.attempted.push(keyword.to_owned());

        let before = outcome.products.len();
        let end = collect_keyword(search, keyword, params, &mut outcome.products).await?;
        tracing::info!(
            keyword,
            added = outcome.products.len() - before,
            total = outcome.products.len(),
            end = ?end,
            "keyword finished"
        );
    }

    let shortfall = outcome.shortfall(params.target_count);
    if shortfall > 0 {
        tracing::warn!(
            collected = outcome.products.len(),
            target = params.target_count,
            keywords_attempted = outcome.attempted.len(),
            "collection finished short of target"
        );
    }

    Ok(outcome)
}

/// Paginates one keyword into `products`, truncating at the target count.
async fn collect_keyword<S: ProductSearch>(
    search: &S,
    keyword: &str,
    params: &CollectParams,
    products: &mut Vec<ProductRecord>,
) -> Result<KeywordEnd, ClientError> {
    let page_size = usize::try_from(params.page_size).unwrap_or(usize::MAX);

    for page in 1..=params.page_limit {
        if products.len() >= params.target_count {
            return Ok(KeywordEnd::TargetReached);
        }

        let batch = match search.search_page(keyword, page, params.page_size).await {
            Ok(batch) => batch,
            Err(e) => match e.disposition() {
                Disposition::SkipKeyword => {
                    tracing::warn!(keyword, page, error = %e, "search failed, abandoning keyword");
                    return Ok(KeywordEnd::Skipped);
                }
                Disposition::Abort => return Err(e),
            },
        };

        // Page-end decisions use what the API returned, not what survived
        // normalization.
        if batch.raw_count == 0 {
            return Ok(KeywordEnd::EmptyPage);
        }

        let room = params.target_count.saturating_sub(products.len());
        products.extend(batch.products.into_iter().take(room));

        if products.len() >= params.target_count {
            return Ok(KeywordEnd::TargetReached);
        }
        if batch.raw_count < page_size {
            return Ok(KeywordEnd::ShortPage);
        }
    }

    Ok(KeywordEnd::PageLimit)
}

#[cfg(test)]
#[path = "collect_test.rs"]
mod tests;
