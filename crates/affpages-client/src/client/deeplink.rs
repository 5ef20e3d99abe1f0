use reqwest::Method;

use super::{PartnersClient, DEEPLINK_PATH};
use crate::error::ClientError;
use crate::parse::parse_deeplinks;
use crate::types::{Deeplink, DeeplinkRequest};

/// Maximum number of URLs accepted by one deeplink request.
pub const DEEPLINK_BATCH_SIZE: usize = 20;

impl PartnersClient {
    /// Converts product URLs into shortened affiliate deeplinks.
    ///
    /// URLs are sent in batches of [`DEEPLINK_BATCH_SIZE`]. An empty input
    /// returns an empty list without a network call.
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`PartnersClient::call`]; links from
    /// earlier batches are discarded.
    pub async fn create_deeplinks(&self, urls: &[String]) -> Result<Vec<Deeplink>, ClientError> {
        let mut links = Vec::with_capacity(urls.len());

        for batch in urls.chunks(DEEPLINK_BATCH_SIZE) {
            let payload = serde_json::to_value(DeeplinkRequest {
                coupang_urls: batch,
            })
            .map_err(|e| ClientError::Deserialize {
                context: "deeplink request body".to_owned(),
                source: e,
            })?;

            let body = self
                .call(Method::POST, DEEPLINK_PATH, &[], Some(&payload))
                .await?;
            links.extend(parse_deeplinks(&body));
        }

        Ok(links)
    }
}
