//! `generate` command: collect products, shorten links, write pages, and
//! update the sitemap.
//!
//! Only an empty collection fails the run. Deeplink failures fall back to the
//! search URLs, and a page that cannot be written is logged and skipped.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::Args;

use affpages_client::{collect, CollectParams, PartnersClient};
use affpages_core::{AppConfig, ProductRecord};
use affpages_site::{
    page_url, render_product_page, sanitize_filename, write_page, PageContext, Sitemap,
    WriteOutcome,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub(crate) struct GenerateArgs {
    /// Number of products to collect; defaults to AFFPAGES_TARGET_COUNT
    #[arg(long)]
    pub target: Option<usize>,

    /// Results per search page; defaults to AFFPAGES_PAGE_SIZE
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Pages fetched per keyword; defaults to AFFPAGES_PAGE_LIMIT
    #[arg(long)]
    pub page_limit: Option<u32>,

    /// Search only these keywords instead of the configured pool (repeatable)
    #[arg(long = "keyword", value_name = "KEYWORD")]
    pub keywords: Vec<String>,

    /// Convert product URLs into shortened affiliate deeplinks
    #[arg(long)]
    pub deeplinks: bool,

    /// Replace pages that already exist
    #[arg(long)]
    pub overwrite: bool,

    /// Collect and report, but write nothing to disk
    #[arg(long)]
    pub dry_run: bool,
}

/// Merges command-line overrides over the configured collection settings.
fn collect_params(config: &AppConfig, args: &GenerateArgs) -> anyhow::Result<CollectParams> {
    let params = CollectParams {
        page_limit: args.page_limit.unwrap_or(config.page_limit),
        page_size: args.page_size.unwrap_or(config.page_size),
        target_count: args.target.unwrap_or(config.target_count),
    };
    anyhow::ensure!(params.target_count > 0, "--target must be at least 1");
    anyhow::ensure!(params.page_size > 0, "--page-size must be at least 1");
    anyhow::ensure!(params.page_limit > 0, "--page-limit must be at least 1");
    Ok(params)
}

/// Runs the full generation pipeline.
///
/// # Errors
///
/// Returns an error if the keyword pool or client cannot be built, collection
/// aborts, no products are collected, or the sitemap cannot be saved.
pub(crate) async fn run_generate(config: &AppConfig, args: &GenerateArgs) -> anyhow::Result<()> {
    let pool = crate::resolve_pool(config, &args.keywords)?;
    let params = collect_params(config, args)?;

    let client = PartnersClient::new(config)
        .map_err(|e| anyhow::anyhow!("failed to build Partners client: {e}"))?;

    tracing::info!(
        keywords = pool.len(),
        target = params.target_count,
        page_size = params.page_size,
        page_limit = params.page_limit,
        "starting collection"
    );

    let mut rng = rand::rng();
    let outcome = collect(&client, &pool, &params, &mut rng).await?;

    if outcome.products.is_empty() {
        anyhow::bail!(
            "no products collected after trying {} keywords",
            outcome.attempted.len()
        );
    }

    let links = if args.deeplinks {
        shorten_links(&client, &outcome.products).await
    } else {
        HashMap::new()
    };

    if args.dry_run {
        let stems = unique_stems(&outcome.products);
        println!(
            "dry-run: would write {} pages to {}: [{}]",
            stems.len(),
            config.output_dir.display(),
            stems.join(", ")
        );
        return Ok(());
    }

    let today = chrono::Local::now().date_naive();
    let summary = publish_pages(
        &config.output_dir,
        &outcome.products,
        &links,
        today,
        args.overwrite,
    );

    if let Some(base_url) = &config.site_base_url {
        let added = update_sitemap(&config.sitemap_path, base_url, &summary.pages, today)?;
        tracing::info!(
            path = %config.sitemap_path.display(),
            added,
            "sitemap updated"
        );
    }

    println!(
        "generated {} pages ({} skipped, {} failed) from {} keywords; {} of {} products collected",
        summary.written,
        summary.skipped,
        summary.failed,
        outcome.attempted.len(),
        outcome.products.len(),
        params.target_count
    );

    Ok(())
}

/// Maps each product URL to its shortened deeplink.
///
/// Any failure yields an empty map, so every page links to the URL returned
/// by search.
async fn shorten_links(
    client: &PartnersClient,
    products: &[ProductRecord],
) -> HashMap<String, String> {
    let urls: Vec<String> = products.iter().map(|p| p.product_url.clone()).collect();
    match client.create_deeplinks(&urls).await {
        Ok(links) => {
            tracing::info!(requested = urls.len(), created = links.len(), "deeplinks created");
            links
                .into_iter()
                .map(|l| (l.original_url, l.shorten_url))
                .collect()
        }
        Err(e) => {
            tracing::warn!(error = %e, "deeplink creation failed, using search URLs");
            HashMap::new()
        }
    }
}

/// File stems for `products`, disambiguated within the batch.
///
/// A repeated stem gets the product id (or its position) appended, then a
/// counter until it no longer collides with any stem already handed out.
fn unique_stems(products: &[ProductRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    products
        .iter()
        .enumerate()
        .map(|(i, product)| {
            let base = sanitize_filename(&product.name);
            let mut stem = base.clone();
            if seen.contains(&stem) {
                let suffix = product
                    .product_id
                    .map_or_else(|| (i + 1).to_string(), |id| id.to_string());
                stem = format!("{base}_{suffix}");
                let mut n = 2;
                while seen.contains(&stem) {
                    stem = format!("{base}_{suffix}_{n}");
                    n += 1;
                }
            }
            seen.insert(stem.clone());
            stem
        })
        .collect()
}

#[derive(Debug, Default, PartialEq, Eq)]
struct PublishSummary {
    written: usize,
    skipped: usize,
    failed: usize,
    /// Every page on disk for this batch, written now or earlier.
    pages: Vec<PathBuf>,
}

fn publish_pages(
    dir: &Path,
    products: &[ProductRecord],
    links: &HashMap<String, String>,
    generated_on: NaiveDate,
    overwrite: bool,
) -> PublishSummary {
    let mut summary = PublishSummary::default();

    for (product, stem) in products.iter().zip(unique_stems(products)) {
        let affiliate_url = links
            .get(&product.product_url)
            .map_or(product.product_url.as_str(), String::as_str);
        let html = render_product_page(&PageContext {
            product,
            affiliate_url,
            generated_on,
        });

        match write_page(dir, &stem, &html, overwrite) {
            Ok(WriteOutcome::Written(path)) => {
                tracing::debug!(path = %path.display(), keyword = %product.keyword, "page written");
                summary.written += 1;
                summary.pages.push(path);
            }
            Ok(WriteOutcome::Skipped(path)) => {
                summary.skipped += 1;
                summary.pages.push(path);
            }
            Err(e) => {
                tracing::warn!(name = %product.name, error = %e, "failed to write page");
                summary.failed += 1;
            }
        }
    }

    summary
}

/// Adds every page to the sitemap and saves it when anything was added.
/// Returns the number of new entries.
fn update_sitemap(
    sitemap_path: &Path,
    base_url: &str,
    pages: &[PathBuf],
    lastmod: NaiveDate,
) -> anyhow::Result<usize> {
    let mut sitemap = Sitemap::load(sitemap_path)?;
    let mut added = 0;
    for page in pages {
        let Some(file_name) = page.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if sitemap.add_url(&page_url(base_url, file_name), lastmod) {
            added += 1;
        }
    }
    if added > 0 {
        sitemap.save(sitemap_path)?;
    }
    Ok(added)
}

#[cfg(test)]
#[path = "generate_test.rs"]
mod tests;
