use std::path::PathBuf;

use crate::ConfigError;

/// Partners API key pair. Both halves are validated non-empty at construction
/// and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_key: String,
    secret_key: String,
}

impl Credentials {
    /// Builds a key pair, trimming surrounding whitespace from both halves.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] naming `ACCESS_KEY` or
    /// `SECRET_KEY` when the corresponding value is empty.
    pub fn new(access_key: &str, secret_key: &str) -> Result<Self, ConfigError> {
        let access_key = access_key.trim();
        let secret_key = secret_key.trim();
        if access_key.is_empty() {
            return Err(ConfigError::MissingEnvVar("ACCESS_KEY".to_string()));
        }
        if secret_key.is_empty() {
            return Err(ConfigError::MissingEnvVar("SECRET_KEY".to_string()));
        }
        Ok(Self {
            access_key: access_key.to_owned(),
            secret_key: secret_key.to_owned(),
        })
    }

    #[must_use]
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    #[must_use]
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &"[redacted]")
            .field("secret_key", &"[redacted]")
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub credentials: Credentials,
    pub api_domain: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub output_dir: PathBuf,
    /// Public URL prefix of the generated pages. `None` disables the sitemap.
    pub site_base_url: Option<String>,
    pub sitemap_path: PathBuf,
    /// YAML keyword pool. `None` selects the built-in pool.
    pub keywords_path: Option<PathBuf>,
    pub target_count: usize,
    pub page_size: u32,
    pub page_limit: u32,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("credentials", &self.credentials)
            .field("api_domain", &self.api_domain)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("output_dir", &self.output_dir)
            .field("site_base_url", &self.site_base_url)
            .field("sitemap_path", &self.sitemap_path)
            .field("keywords_path", &self.keywords_path)
            .field("target_count", &self.target_count)
            .field("page_size", &self.page_size)
            .field("page_limit", &self.page_limit)
            .finish()
    }
}
