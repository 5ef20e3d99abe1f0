use serde::{Deserialize, Serialize};

/// A product returned by the Partners search endpoint, normalized for page
/// generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Vendor product ID, when the response carries one.
    pub product_id: Option<i64>,
    pub name: String,
    /// Product page URL as returned by search. Usually already a tracking URL.
    pub product_url: String,
    pub image_url: String,
    /// Sale price in won.
    pub price: i64,
    pub category: Option<String>,
    /// Position in the search ranking, 1-based.
    pub rank: Option<i64>,
    pub review_count: Option<i64>,
    pub is_rocket: bool,
    pub is_free_shipping: bool,
    /// Search term that produced this record.
    pub keyword: String,
}

impl ProductRecord {
    /// Returns `true` when the product ships through Rocket delivery or for free.
    #[must_use]
    pub fn has_shipping_perk(&self) -> bool {
        self.is_rocket || self.is_free_shipping
    }
}
