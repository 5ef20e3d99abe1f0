use affpages_core::ProductRecord;
use reqwest::Method;

use super::{PartnersClient, SEARCH_PATH};
use crate::error::ClientError;
use crate::parse::parse_search_page;
use crate::types::SearchPage;

impl PartnersClient {
    /// Fetches one page of keyword search results.
    ///
    /// Pages are 1-based; page `0` is treated as page `1`. The query is sent
    /// as `keyword`, `limit`, `offset` with `offset = (page - 1) * page_size`.
    /// A missing or empty product list is an empty page.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`PartnersClient::call`].
    pub async fn search_page(
        &self,
        keyword: &str,
        page: u32,
        page_size: u32,
    ) -> Result<SearchPage, ClientError> {
        let limit = page_size.to_string();
        let offset = search_offset(page, page_size).to_string();
        let query = [
            ("keyword", keyword),
            ("limit", limit.as_str()),
            ("offset", offset.as_str()),
        ];

        let body = self.call(Method::GET, SEARCH_PATH, &query, None).await?;
        let result = parse_search_page(&body, keyword);
        tracing::debug!(
            keyword,
            page,
            returned = result.raw_count,
            kept = result.products.len(),
            "search page fetched"
        );
        Ok(result)
    }

    /// Like [`PartnersClient::search_page`], keeping only the products.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`PartnersClient::call`].
    pub async fn search_products(
        &self,
        keyword: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<ProductRecord>, ClientError> {
        Ok(self.search_page(keyword, page, page_size).await?.products)
    }
}

pub(crate) fn search_offset(page: u32, page_size: u32) -> u64 {
    u64::from(page.max(1) - 1) * u64::from(page_size)
}
