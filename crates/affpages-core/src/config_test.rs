use std::collections::HashMap;
use std::env::VarError;
use std::path::Path;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated with valid defaults.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("ACCESS_KEY", "test-access-key");
    m.insert("SECRET_KEY", "test-secret-key");
    m
}

#[test]
fn build_app_config_fails_without_access_key() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "ACCESS_KEY"),
        "expected MissingEnvVar(ACCESS_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_without_secret_key() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("ACCESS_KEY", "test-access-key");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "SECRET_KEY"),
        "expected MissingEnvVar(SECRET_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_secret_as_missing() {
    let mut map = full_env();
    map.insert("SECRET_KEY", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "SECRET_KEY"),
        "expected MissingEnvVar(SECRET_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_succeeds_with_all_required_vars() {
    let map = full_env();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.credentials.access_key(), "test-access-key");
    assert_eq!(cfg.credentials.secret_key(), "test-secret-key");
    assert_eq!(cfg.api_domain, DEFAULT_API_DOMAIN);
    assert_eq!(DEFAULT_API_DOMAIN, "https://api-gateway.coupang.com");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "affpages/0.1 (partners-pages)");
    assert_eq!(cfg.output_dir, Path::new("./products"));
    assert!(cfg.site_base_url.is_none());
    assert_eq!(cfg.sitemap_path, Path::new("./sitemap.xml"));
    assert!(cfg.keywords_path.is_none());
    assert_eq!(cfg.target_count, 10);
    assert_eq!(cfg.page_size, 10);
    assert_eq!(cfg.page_limit, 3);
}

#[test]
fn api_domain_trailing_slash_is_trimmed() {
    let mut map = full_env();
    map.insert("AFFPAGES_API_DOMAIN", "http://127.0.0.1:8080/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_domain, "http://127.0.0.1:8080");
}

#[test]
fn site_base_url_override() {
    let mut map = full_env();
    map.insert("AFFPAGES_SITE_BASE_URL", "https://deals.example.com/products/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.site_base_url.as_deref(),
        Some("https://deals.example.com/products")
    );
}

#[test]
fn blank_site_base_url_disables_sitemap() {
    let mut map = full_env();
    map.insert("AFFPAGES_SITE_BASE_URL", "  ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.site_base_url.is_none());
}

#[test]
fn keywords_path_override() {
    let mut map = full_env();
    map.insert("AFFPAGES_KEYWORDS_PATH", "./config/keywords.yaml");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.keywords_path.as_deref(),
        Some(Path::new("./config/keywords.yaml"))
    );
}

#[test]
fn request_timeout_secs_invalid() {
    let mut map = full_env();
    map.insert("AFFPAGES_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "AFFPAGES_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(AFFPAGES_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn collection_limits_override() {
    let mut map = full_env();
    map.insert("AFFPAGES_TARGET_COUNT", "25");
    map.insert("AFFPAGES_PAGE_SIZE", "20");
    map.insert("AFFPAGES_PAGE_LIMIT", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.target_count, 25);
    assert_eq!(cfg.page_size, 20);
    assert_eq!(cfg.page_limit, 5);
}

#[test]
fn page_size_invalid() {
    let mut map = full_env();
    map.insert("AFFPAGES_PAGE_SIZE", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "AFFPAGES_PAGE_SIZE"),
        "expected InvalidEnvVar(AFFPAGES_PAGE_SIZE), got: {result:?}"
    );
}

#[test]
fn zero_target_count_is_rejected() {
    let mut map = full_env();
    map.insert("AFFPAGES_TARGET_COUNT", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "AFFPAGES_TARGET_COUNT"),
        "expected InvalidEnvVar(AFFPAGES_TARGET_COUNT), got: {result:?}"
    );
}

#[test]
fn zero_page_limit_is_rejected() {
    let mut map = full_env();
    map.insert("AFFPAGES_PAGE_LIMIT", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "AFFPAGES_PAGE_LIMIT"),
        "expected InvalidEnvVar(AFFPAGES_PAGE_LIMIT), got: {result:?}"
    );
}

#[test]
fn debug_output_redacts_credentials() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("test-secret-key"));
    assert!(!rendered.contains("test-access-key"));
}
