//! HTTP call executor for the Coupang Partners open API.

mod deeplink;
mod search;

pub use deeplink::DEEPLINK_BATCH_SIZE;

use std::time::Duration;

use affpages_core::{AppConfig, Credentials};
use reqwest::{Client, Method, Url};
use serde_json::Value;

use crate::error::ClientError;
use crate::signing;

pub(crate) const SEARCH_PATH: &str =
    "/v2/providers/affiliate_open_api/apis/openapi/products/search";
pub(crate) const DEEPLINK_PATH: &str = "/v2/providers/affiliate_open_api/apis/openapi/v1/deeplink";

/// Client for the Partners API gateway.
///
/// Every call is signed with a fresh CEA header, sent once, and decoded as
/// JSON. Non-2xx responses and non-zero `rCode` envelopes are typed errors;
/// nothing is retried here. Use [`PartnersClient::new`] for production or
/// [`PartnersClient::with_base_url`] to point at a mock server in tests.
pub struct PartnersClient {
    client: Client,
    credentials: Credentials,
    base_url: String,
}

impl PartnersClient {
    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if the
    /// configured API domain is not an absolute http(s) URL.
    pub fn new(config: &AppConfig) -> Result<Self, ClientError> {
        Self::with_base_url(
            config.credentials.clone(),
            config.request_timeout_secs,
            &config.user_agent,
            &config.api_domain,
        )
    }

    /// Creates a client with an explicit base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` is not an absolute http(s) URL.
    pub fn with_base_url(
        credentials: Credentials,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, ClientError> {
        let parsed = Url::parse(base_url).map_err(|e| ClientError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(ClientError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "expected an absolute http(s) URL".to_owned(),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            credentials,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Sends one signed request and returns the decoded JSON body.
    ///
    /// `path` and `query` are unencoded. The query is encoded once, in the
    /// given order, and that exact string is both signed and sent. `body` is
    /// only attached to non-GET requests.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Signing`] if the authorization header cannot be built.
    /// - [`ClientError::Transport`] on network or TLS failure.
    /// - [`ClientError::Remote`] for any non-2xx status.
    /// - [`ClientError::Deserialize`] if the body is not JSON.
    /// - [`ClientError::Api`] if the envelope carries a non-zero `rCode`.
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<Value, ClientError> {
        let authorization = signing::sign(&self.credentials, method.as_str(), path, query)?;
        let url = self.request_url(path, query);

        tracing::debug!(%method, path, "calling Partners API");

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .header(reqwest::header::CONTENT_TYPE, "application/json");

        if method != Method::GET {
            if let Some(payload) = body {
                request = request.json(payload);
            }
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::Remote {
                status: status.as_u16(),
                url,
                body: text,
            });
        }

        let parsed: Value = serde_json::from_str(&text).map_err(|e| ClientError::Deserialize {
            context: format!("{method} {path}"),
            source: e,
        })?;

        Self::check_api_error(&parsed)?;
        Ok(parsed)
    }

    /// Builds `base + path` plus the encoded query, if any.
    fn request_url(&self, path: &str, query: &[(&str, &str)]) -> String {
        format!("{}{}", self.base_url, signing::sign_target(path, query))
    }

    /// Surfaces a non-zero `rCode` as [`ClientError::Api`].
    ///
    /// A missing `rCode` is accepted; some gateway responses omit it.
    fn check_api_error(body: &Value) -> Result<(), ClientError> {
        let code = match body.get("rCode") {
            None | Some(Value::Null) => return Ok(()),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };
        if code == "0" {
            return Ok(());
        }

        let message = body
            .get("rMessage")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_owned();
        Err(ClientError::Api { code, message })
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
