use crate::error::Result;
use crate::repository::{UrlMapping, UrlRecord};
use crate::shortcode::ShortCode;
use async_trait::async_trait;

/// Result of a successful [`Shortener::shorten`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenOutcome {
    /// The code the URL is stored under.
    pub code: ShortCode,
    /// `true` if this call created the mapping, `false` if it already existed.
    pub created: bool,
}

/// The transport-agnostic boundary of the shortening engine.
///
/// Each operation maps onto one verb of a create/read/list/delete surface.
#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Shortens a URL, returning the same code for the same URL on every call.
    async fn shorten(&self, original_url: &str) -> Result<ShortenOutcome>;

    /// Resolves a short code to its stored URL record.
    /// Returns `None` if the code does not exist or is malformed.
    async fn resolve(&self, code: &str) -> Result<Option<UrlRecord>>;

    /// Deletes a shortened URL by its short code.
    /// Returns `true` if the record existed and was removed.
    async fn delete(&self, code: &str) -> Result<bool>;

    /// Lists every stored mapping, newest first.
    async fn list(&self) -> Result<Vec<UrlMapping>>;
}
