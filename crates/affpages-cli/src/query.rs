//! Read-only commands: `search` and `keywords`.

use affpages_client::PartnersClient;
use affpages_core::AppConfig;

/// Runs one search request and prints the normalized products as JSON.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the request fails.
pub(crate) async fn run_search(
    config: &AppConfig,
    keyword: &str,
    page: u32,
    page_size: Option<u32>,
) -> anyhow::Result<()> {
    let page_size = page_size.unwrap_or(config.page_size);
    anyhow::ensure!(page_size > 0, "--page-size must be at least 1");

    let client = PartnersClient::new(config)
        .map_err(|e| anyhow::anyhow!("failed to build Partners client: {e}"))?;
    let products = client.search_products(keyword, page, page_size).await?;

    tracing::info!(keyword, page, count = products.len(), "search complete");
    println!("{}", serde_json::to_string_pretty(&products)?);
    Ok(())
}

/// Prints the keyword pool a `generate` run would draw from.
///
/// # Errors
///
/// Returns an error if the configured keywords file is unreadable or invalid.
pub(crate) fn run_keywords(config: &AppConfig) -> anyhow::Result<()> {
    let pool = crate::resolve_pool(config, &[])?;
    let source = config
        .keywords_path
        .as_ref()
        .map_or_else(|| "built-in".to_owned(), |p| p.display().to_string());

    println!("{} keywords ({source}):", pool.len());
    for keyword in pool.iter() {
        println!("  {keyword}");
    }
    Ok(())
}
