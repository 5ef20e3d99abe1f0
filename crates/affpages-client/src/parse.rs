//! Tolerant extraction of typed records from Partners JSON envelopes.
//!
//! Items are decoded one at a time; a malformed item is logged and skipped so
//! that one bad entry does not cost the whole page.

use affpages_core::ProductRecord;
use serde_json::Value;

use crate::normalize::normalize_product;
use crate::types::{Deeplink, SearchPage, SearchProductItem};

/// Returns the raw product entries of a search response.
///
/// Accepts `data.productData` as an array and, for older responses, `data`
/// itself as an array. Anything else (missing, `null`, an object without
/// `productData`) yields an empty slice.
#[must_use]
pub fn product_items(body: &Value) -> &[Value] {
    match body.get("data") {
        Some(Value::Array(items)) => items.as_slice(),
        Some(Value::Object(data)) => match data.get("productData") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        },
        _ => &[],
    }
}

/// Decodes and normalizes the products of a search response.
#[must_use]
pub fn parse_search_products(body: &Value, keyword: &str) -> Vec<ProductRecord> {
    product_items(body)
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| {
            if !raw.is_object() {
                tracing::warn!(keyword, index, "skipping search item, not a JSON object");
                return None;
            }
            let item = match serde_json::from_value::<SearchProductItem>(raw.clone()) {
                Ok(item) => item,
                Err(e) => {
                    tracing::warn!(keyword, index, error = %e, "skipping search item, decode failed");
                    return None;
                }
            };
            match normalize_product(item, keyword) {
                Ok(product) => Some(product),
                Err(e) => {
                    tracing::warn!(keyword, index, error = %e, "skipping search item, normalization failed");
                    None
                }
            }
        })
        .collect()
}

/// Decodes a search response into a [`SearchPage`], keeping the raw item
/// count alongside the products that survived normalization.
#[must_use]
pub fn parse_search_page(body: &Value, keyword: &str) -> SearchPage {
    SearchPage {
        products: parse_search_products(body, keyword),
        raw_count: product_items(body).len(),
    }
}

/// Decodes the `data` array of a deeplink response, skipping malformed entries.
#[must_use]
pub fn parse_deeplinks(body: &Value) -> Vec<Deeplink> {
    let Some(Value::Array(items)) = body.get("data") else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(
            |raw| match serde_json::from_value::<Deeplink>(raw.clone()) {
                Ok(link) => Some(link),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping deeplink entry, decode failed");
                    None
                }
            },
        )
        .collect()
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
