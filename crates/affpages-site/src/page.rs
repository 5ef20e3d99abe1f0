//! Static HTML rendering for one product.

use affpages_core::ProductRecord;
use chrono::NaiveDate;
use html_escape::{encode_double_quoted_attribute, encode_text};

/// Sponsorship notice required on every page that carries a Partners link.
pub const DISCLOSURE: &str =
    "이 포스팅은 쿠팡 파트너스 활동의 일환으로, 이에 따른 일정액의 수수료를 제공받습니다.";

const STYLE: &str = r"
body { margin: 0; background: #f4f5f7; font-family: 'Noto Sans KR', 'Apple SD Gothic Neo', sans-serif; color: #222; }
.card { max-width: 640px; margin: 32px auto; padding: 24px; background: #fff; border-radius: 16px; box-shadow: 0 4px 18px rgba(0, 0, 0, 0.08); }
.product-image { display: block; width: 100%; max-width: 480px; margin: 0 auto 20px; border-radius: 12px; }
h1 { font-size: 1.4rem; line-height: 1.4; margin: 0 0 12px; }
.price { font-size: 1.6rem; font-weight: 700; color: #e52528; margin: 0 0 12px; }
.badges { list-style: none; padding: 0; margin: 0 0 12px; display: flex; gap: 8px; }
.badges li { font-size: 0.8rem; padding: 4px 10px; border-radius: 999px; background: #eaf2ff; color: #346aff; }
.meta { font-size: 0.9rem; color: #666; margin: 0 0 20px; padding-left: 18px; }
.cta { display: block; text-align: center; padding: 14px; border-radius: 10px; background: #346aff; color: #fff; font-weight: 700; text-decoration: none; }
.disclosure { font-size: 0.8rem; color: #888; background: #fafafa; border: 1px solid #eee; border-radius: 8px; padding: 10px; }
footer { text-align: center; font-size: 0.75rem; color: #999; margin-bottom: 32px; }
";

/// Everything needed to render one page.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub product: &'a ProductRecord,
    /// Link target of the call-to-action. A shortened deeplink when one was
    /// created, otherwise the product URL from search.
    pub affiliate_url: &'a str,
    pub generated_on: NaiveDate,
}

/// Renders a self-contained HTML5 page. All product text is escaped.
#[must_use]
pub fn render_product_page(ctx: &PageContext<'_>) -> String {
    let product = ctx.product;
    let name = encode_text(&product.name);
    let name_attr = encode_double_quoted_attribute(&product.name);
    let price = format_won(product.price);
    let link = encode_double_quoted_attribute(ctx.affiliate_url);
    let image_attr = encode_double_quoted_attribute(&product.image_url);
    let description = encode_double_quoted_attribute(&format!(
        "{} {} 가격 정보와 구매 링크",
        product.name, price
    ))
    .into_owned();
    let date = ctx.generated_on.format("%Y-%m-%d");

    let image = if product.image_url.is_empty() {
        String::new()
    } else {
        format!(r#"<img class="product-image" src="{image_attr}" alt="{name_attr}" loading="lazy">"#)
    };
    let badges = render_badges(product);
    let meta = render_meta(product);

    format!(
        r#"<!DOCTYPE html>
<html lang="ko">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{name} | {price}</title>
<meta name="description" content="{description}">
<meta property="og:type" content="product">
<meta property="og:title" content="{name_attr}">
<meta property="og:image" content="{image_attr}">
<style>{STYLE}</style>
</head>
<body>
<main class="card">
<p class="disclosure">{DISCLOSURE}</p>
{image}
<h1>{name}</h1>
<p class="price">{price}</p>
{badges}
{meta}
<a class="cta" href="{link}" target="_blank" rel="sponsored nofollow noopener">쿠팡에서 최저가 확인하기</a>
</main>
<footer>최종 업데이트 {date} · 가격은 변동될 수 있습니다.</footer>
</body>
</html>
"#
    )
}

fn render_badges(product: &ProductRecord) -> String {
    if !product.has_shipping_perk() {
        return String::new();
    }
    let mut items = Vec::new();
    if product.is_rocket {
        items.push("<li>로켓배송</li>");
    }
    if product.is_free_shipping {
        items.push("<li>무료배송</li>");
    }
    format!(r#"<ul class="badges">{}</ul>"#, items.concat())
}

fn render_meta(product: &ProductRecord) -> String {
    let mut items = Vec::new();
    if let Some(category) = &product.category {
        items.push(format!("<li>카테고리: {}</li>", encode_text(category)));
    }
    if let Some(rank) = product.rank {
        items.push(format!("<li>검색 순위: {rank}위</li>"));
    }
    if let Some(reviews) = product.review_count {
        items.push(format!("<li>리뷰 {reviews}개</li>"));
    }
    if items.is_empty() {
        return String::new();
    }
    format!(r#"<ul class="meta">{}</ul>"#, items.concat())
}

/// Formats a won amount with thousands separators, e.g. `1,290,000원`.
#[must_use]
pub fn format_won(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}{grouped}원")
}
