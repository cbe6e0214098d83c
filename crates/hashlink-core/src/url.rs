//! Syntactic validation for URLs submitted for shortening.

use crate::error::ShortenerError;

/// Validates that `url` has an http(s) scheme and a host.
///
/// The URL is not normalized: the exact input string is what gets stored
/// and hashed, so `https://a.com` and `https://a.com/` are different URLs.
pub fn validate_url(url: &str) -> Result<(), ShortenerError> {
    if url.trim().is_empty() {
        return Err(ShortenerError::InvalidInput(
            "URL cannot be empty".to_string(),
        ));
    }

    let parsed = ::url::Url::parse(url)
        .map_err(|e| ShortenerError::InvalidInput(format!("malformed URL '{url}': {e}")))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ShortenerError::InvalidInput(format!(
                "URL scheme must be http or https: {other}"
            )))
        }
    }

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(ShortenerError::InvalidInput(format!(
            "URL must have a host: {url}"
        ))),
    }
}
