//! CEA request signing for the Coupang Partners API.
//!
//! Every call carries an `Authorization` header of the form
//!
//! ```text
//! CEA algorithm=HmacSHA256, access-key=<key>, signed-date=<yyMMddTHHmmssZ>, signature=<hex>
//! ```
//!
//! where the signature is the lowercase hex HMAC-SHA256 (keyed by the secret)
//! of `signed-date + method + path + query`. The query term is the exact
//! encoded string sent on the wire, without the leading `?`, or the empty
//! string when there is no query. Any divergence here surfaces as a 401 from
//! the gateway, not as a local error.

use affpages_core::Credentials;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sha2::Sha256;

use crate::error::ClientError;

type HmacSha256 = Hmac<Sha256>;

/// `strftime` pattern for the `signed-date` field, always rendered in GMT.
pub const SIGNED_DATE_FORMAT: &str = "%y%m%dT%H%M%SZ";

/// Bytes left unescaped in query keys and values: ASCII alphanumerics plus
/// `_ . - ~`. Space is handled separately and becomes `+`.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~');

/// Form-encodes one query key or value: unreserved bytes pass through, space
/// becomes `+`, everything else is `%XX` over its UTF-8 bytes.
#[must_use]
pub fn quote_plus(value: &str) -> String {
    value
        .split(' ')
        .map(|part| utf8_percent_encode(part, QUERY_VALUE).to_string())
        .collect::<Vec<_>>()
        .join("+")
}

/// Encodes `query` as `k1=v1&k2=v2` in the order given.
#[must_use]
pub fn encode_query(query: &[(&str, &str)]) -> String {
    query
        .iter()
        .map(|(k, v)| format!("{}={}", quote_plus(k), quote_plus(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Returns `path` alone for an empty query, otherwise `path?encoded`.
#[must_use]
pub fn sign_target(path: &str, query: &[(&str, &str)]) -> String {
    if query.is_empty() {
        path.to_owned()
    } else {
        format!("{path}?{}", encode_query(query))
    }
}

#[must_use]
pub fn format_signed_date(at: DateTime<Utc>) -> String {
    at.format(SIGNED_DATE_FORMAT).to_string()
}

/// Builds the canonical message for a signing target: the signed date, the
/// method, the path, then the query without its `?`.
#[must_use]
pub fn canonical_message(signed_date: &str, method: &str, target: &str) -> String {
    let (path, query) = target.split_once('?').unwrap_or((target, ""));
    format!("{signed_date}{method}{path}{query}")
}

/// Lowercase hex HMAC-SHA256 of `message` keyed by `secret_key`.
///
/// # Errors
///
/// Returns [`ClientError::Signing`] if the MAC cannot be keyed.
pub fn hmac_sha256_hex(secret_key: &str, message: &str) -> Result<String, ClientError> {
    let mut mac = HmacSha256::new_from_slice(secret_key.as_bytes())
        .map_err(|e| ClientError::Signing(format!("invalid secret key: {e}")))?;
    mac.update(message.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Signs a request with the current GMT time.
///
/// `path` and `query` are unencoded; encoding happens here so the signed
/// string and the request URL come from the same [`sign_target`].
///
/// # Errors
///
/// Returns [`ClientError::Signing`] if the MAC cannot be keyed.
pub fn sign(
    credentials: &Credentials,
    method: &str,
    path: &str,
    query: &[(&str, &str)],
) -> Result<String, ClientError> {
    sign_at(credentials, method, path, query, Utc::now())
}

/// Signs a request as of `at`. Deterministic for a fixed `at`.
///
/// # Errors
///
/// Returns [`ClientError::Signing`] if the MAC cannot be keyed.
pub fn sign_at(
    credentials: &Credentials,
    method: &str,
    path: &str,
    query: &[(&str, &str)],
    at: DateTime<Utc>,
) -> Result<String, ClientError> {
    let signed_date = format_signed_date(at);
    let target = sign_target(path, query);
    let message = canonical_message(&signed_date, method, &target);
    let signature = hmac_sha256_hex(credentials.secret_key(), &message)?;

    Ok(format!(
        "CEA algorithm=HmacSHA256, access-key={}, signed-date={signed_date}, signature={signature}",
        credentials.access_key()
    ))
}
