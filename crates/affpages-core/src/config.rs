use std::path::PathBuf;

use crate::app_config::{AppConfig, Credentials};
use crate::ConfigError;

/// Partners API gateway used when `AFFPAGES_API_DOMAIN` is unset.
pub const DEFAULT_API_DOMAIN: &str = "https://api-gateway.coupang.com";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing and validation are decoupled from the real environment so tests can
/// drive this with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let access_key = require("ACCESS_KEY")?;
    let secret_key = require("SECRET_KEY")?;
    let credentials = Credentials::new(&access_key, &secret_key)?;

    let api_domain = or_default("AFFPAGES_API_DOMAIN", DEFAULT_API_DOMAIN)
        .trim_end_matches('/')
        .to_string();
    let log_level = or_default("AFFPAGES_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("AFFPAGES_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("AFFPAGES_USER_AGENT", "affpages/0.1 (partners-pages)");

    let output_dir = PathBuf::from(or_default("AFFPAGES_OUTPUT_DIR", "./products"));
    let site_base_url =
        optional("AFFPAGES_SITE_BASE_URL").map(|u| u.trim_end_matches('/').to_string());
    let sitemap_path = PathBuf::from(or_default("AFFPAGES_SITEMAP_PATH", "./sitemap.xml"));
    let keywords_path = optional("AFFPAGES_KEYWORDS_PATH").map(PathBuf::from);

    let target_count = parse_usize("AFFPAGES_TARGET_COUNT", "10")?;
    let page_size = parse_u32("AFFPAGES_PAGE_SIZE", "10")?;
    let page_limit = parse_u32("AFFPAGES_PAGE_LIMIT", "3")?;

    for (var, value) in [
        ("AFFPAGES_TARGET_COUNT", u64::try_from(target_count).unwrap_or(u64::MAX)),
        ("AFFPAGES_PAGE_SIZE", u64::from(page_size)),
        ("AFFPAGES_PAGE_LIMIT", u64::from(page_limit)),
    ] {
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
    }

    Ok(AppConfig {
        credentials,
        api_domain,
        log_level,
        request_timeout_secs,
        user_agent,
        output_dir,
        site_base_url,
        sitemap_path,
        keywords_path,
        target_count,
        page_size,
        page_limit,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
