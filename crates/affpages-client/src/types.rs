//! Partners API response types.
//!
//! ## Envelope
//! Every endpoint answers `{"rCode": "0", "rMessage": "", "data": ...}`.
//! `rCode` is `"0"` on success; anything else carries a vendor error in
//! `rMessage` even when the HTTP status is 200.
//!
//! ## Search `data`
//! Two shapes are observed in the wild:
//! - `data.productData: [ {...}, ... ]` (current),
//! - `data: [ {...}, ... ]` (older responses).
//!
//! Both are accepted; see [`crate::parse::product_items`].
//!
//! ## Search items
//! Every field is modeled as optional. `productPrice` arrives as a JSON
//! number that may carry a fractional part; `isRocket` / `isFreeShipping`
//! may be `null`.

use serde::{Deserialize, Serialize};

/// One raw product entry from the search endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchProductItem {
    #[serde(default)]
    pub product_id: Option<i64>,

    #[serde(default)]
    pub product_name: Option<String>,

    #[serde(default)]
    pub product_url: Option<String>,

    #[serde(default)]
    pub product_image: Option<String>,

    #[serde(default)]
    pub product_price: Option<serde_json::Number>,

    #[serde(default)]
    pub category_name: Option<String>,

    #[serde(default)]
    pub rank: Option<i64>,

    #[serde(default)]
    pub review_count: Option<i64>,

    #[serde(default)]
    pub is_rocket: Option<bool>,

    #[serde(default)]
    pub is_free_shipping: Option<bool>,
}

/// Request body for the deeplink endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeeplinkRequest<'a> {
    pub coupang_urls: &'a [String],
}

/// A shortened affiliate tracking URL for one original product URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deeplink {
    pub original_url: String,
    pub shorten_url: String,
    #[serde(default)]
    pub landing_url: Option<String>,
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPage {
    /// Items that normalized cleanly, in response order.
    pub products: Vec<affpages_core::ProductRecord>,
    /// Items the API returned before any were dropped. Pagination decisions
    /// use this count.
    pub raw_count: usize,
}
