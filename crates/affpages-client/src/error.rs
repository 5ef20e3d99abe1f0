use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}: {body}")]
    Remote {
        status: u16,
        url: String,
        body: String,
    },

    #[error("Partners API error {code}: {message}")]
    Api { code: String, message: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("normalization error for {context}: {reason}")]
    Normalization { context: String, reason: String },

    #[error("request signing failed: {0}")]
    Signing(String),

    #[error("invalid API base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

/// What the collection loop should do after a failed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Give up on the current keyword and pick another.
    SkipKeyword,
    /// Stop the run; retrying with another keyword cannot help.
    Abort,
}

impl ClientError {
    /// Classifies this error for the collection loop.
    ///
    /// Failures scoped to one request (network, non-2xx, vendor result code,
    /// bad payload) are recoverable by moving on. Signing and base-URL errors
    /// would fail identically for every keyword.
    #[must_use]
    pub fn disposition(&self) -> Disposition {
        match self {
            ClientError::Transport(_)
            | ClientError::Remote { .. }
            | ClientError::Api { .. }
            | ClientError::Deserialize { .. }
            | ClientError::Normalization { .. } => Disposition::SkipKeyword,
            ClientError::Signing(_) | ClientError::InvalidBaseUrl { .. } => Disposition::Abort,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_skips_keyword() {
        let err = ClientError::Remote {
            status: 503,
            url: "https://api.example.com/search".to_owned(),
            body: "unavailable".to_owned(),
        };
        assert_eq!(err.disposition(), Disposition::SkipKeyword);
    }

    #[test]
    fn api_error_skips_keyword() {
        let err = ClientError::Api {
            code: "ERROR".to_owned(),
            message: "keyword blocked".to_owned(),
        };
        assert_eq!(err.disposition(), Disposition::SkipKeyword);
    }

    #[test]
    fn deserialize_error_skips_keyword() {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = ClientError::Deserialize {
            context: "search".to_owned(),
            source,
        };
        assert_eq!(err.disposition(), Disposition::SkipKeyword);
    }

    #[test]
    fn signing_error_aborts() {
        let err = ClientError::Signing("bad key".to_owned());
        assert_eq!(err.disposition(), Disposition::Abort);
    }

    #[test]
    fn invalid_base_url_aborts() {
        let err = ClientError::InvalidBaseUrl {
            base_url: "nope".to_owned(),
            reason: "relative URL without a base".to_owned(),
        };
        assert_eq!(err.disposition(), Disposition::Abort);
    }
}
