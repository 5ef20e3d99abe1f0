//! Conversion from raw search items to [`affpages_core::ProductRecord`].

use affpages_core::ProductRecord;

use crate::error::ClientError;
use crate::types::SearchProductItem;

/// Normalizes one search item, tagging it with the keyword that found it.
///
/// Blank optional strings become `None`. A fractional price is rounded to
/// the nearest won.
///
/// # Errors
///
/// Returns [`ClientError::Normalization`] if the name, URL, or price is
/// missing.
pub fn normalize_product(
    item: SearchProductItem,
    keyword: &str,
) -> Result<ProductRecord, ClientError> {
    let context = match item.product_id {
        Some(id) => format!("product {id}"),
        None => format!("unnamed product for keyword '{keyword}'"),
    };

    let name = non_blank(item.product_name).ok_or_else(|| ClientError::Normalization {
        context: context.clone(),
        reason: "missing productName".into(),
    })?;

    let product_url = non_blank(item.product_url).ok_or_else(|| ClientError::Normalization {
        context: context.clone(),
        reason: "missing productUrl".into(),
    })?;

    let price = item
        .product_price
        .as_ref()
        .and_then(price_to_won)
        .ok_or_else(|| ClientError::Normalization {
            context,
            reason: "missing or non-numeric productPrice".into(),
        })?;

    Ok(ProductRecord {
        product_id: item.product_id,
        name,
        product_url,
        image_url: non_blank(item.product_image).unwrap_or_default(),
        price,
        category: non_blank(item.category_name),
        rank: item.rank,
        review_count: item.review_count,
        is_rocket: item.is_rocket.unwrap_or(false),
        is_free_shipping: item.is_free_shipping.unwrap_or(false),
        keyword: keyword.to_owned(),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}

#[allow(clippy::cast_possible_truncation)]
fn price_to_won(n: &serde_json::Number) -> Option<i64> {
    n.as_i64().or_else(|| {
        n.as_f64()
            .filter(|f| f.is_finite())
            .map(|f| f.round() as i64)
    })
}
