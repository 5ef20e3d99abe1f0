mod generate;
mod query;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use affpages_core::{AppConfig, KeywordPool};

use crate::generate::GenerateArgs;

#[derive(Debug, Parser)]
#[command(name = "affpages")]
#[command(about = "Generate Coupang Partners product pages from keyword searches")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Collect products for random keywords and write one HTML page per product
    Generate(GenerateArgs),
    /// Run a single search and print the parsed products as JSON
    Search {
        keyword: String,

        /// 1-based result page
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Results per page; defaults to AFFPAGES_PAGE_SIZE
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Print the active keyword pool
    Keywords,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = affpages_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Commands::Generate(args) => generate::run_generate(&config, &args).await,
        Commands::Search {
            keyword,
            page,
            page_size,
        } => query::run_search(&config, &keyword, page, page_size).await,
        Commands::Keywords => query::run_keywords(&config),
    }
}

/// Resolves the keyword pool for a run.
///
/// Explicit `--keyword` values win, then `AFFPAGES_KEYWORDS_PATH`, then the
/// built-in pool.
pub(crate) fn resolve_pool(config: &AppConfig, overrides: &[String]) -> anyhow::Result<KeywordPool> {
    if !overrides.is_empty() {
        return Ok(KeywordPool::new(overrides)?);
    }
    match &config.keywords_path {
        Some(path) => Ok(affpages_core::load_keywords(path)?),
        None => Ok(KeywordPool::builtin()),
    }
}

#[cfg(test)]
mod tests;
