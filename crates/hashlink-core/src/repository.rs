use crate::error::StorageError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A stored URL record in the repository.
///
/// Together with its [`ShortCode`] key this forms one URL mapping. Records
/// are immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRecord {
    /// The original URL that was shortened.
    pub original_url: String,
    /// When the mapping was first inserted.
    pub created_at: Timestamp,
}

impl UrlRecord {
    /// Creates a record for `original_url` stamped with the current time.
    pub fn new(original_url: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            created_at: Timestamp::now(),
        }
    }
}

/// A short code together with the record stored under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMapping {
    pub code: ShortCode,
    pub record: UrlRecord,
}

/// Outcome of [`Repository::insert_if_absent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The record was stored under the code.
    Inserted,
    /// Another record already owns the code; it is returned unchanged.
    AlreadyExists(UrlRecord),
}

/// The durable mapping from short code to URL.
///
/// Uniqueness of short codes is enforced here and nowhere else: concurrent
/// callers racing on [`insert_if_absent`](Repository::insert_if_absent) for
/// the same code must observe exactly one `Inserted`.
#[async_trait]
pub trait Repository: Send + Sync + 'static {
    /// Atomically inserts `record` under `code` unless the code is taken.
    async fn insert_if_absent(&self, code: &ShortCode, record: UrlRecord)
        -> Result<InsertOutcome>;

    /// Retrieves the URL record for a given short code.
    /// Returns `None` if the code does not exist.
    async fn get(&self, code: &ShortCode) -> Result<Option<UrlRecord>>;

    /// Finds the code an exact URL is stored under, if any.
    async fn get_by_url(&self, original_url: &str) -> Result<Option<ShortCode>>;

    /// Deletes the URL record for a given short code.
    /// Returns `true` if the record existed and was removed.
    async fn delete(&self, code: &ShortCode) -> Result<bool>;

    /// Every stored mapping, newest first; ties are ordered by code.
    async fn list_all(&self) -> Result<Vec<UrlMapping>>;
}

#[async_trait]
impl<T: Repository + ?Sized> Repository for Arc<T> {
    async fn insert_if_absent(
        &self,
        code: &ShortCode,
        record: UrlRecord,
    ) -> Result<InsertOutcome> {
        (**self).insert_if_absent(code, record).await
    }

    async fn get(&self, code: &ShortCode) -> Result<Option<UrlRecord>> {
        (**self).get(code).await
    }

    async fn get_by_url(&self, original_url: &str) -> Result<Option<ShortCode>> {
        (**self).get_by_url(original_url).await
    }

    async fn delete(&self, code: &ShortCode) -> Result<bool> {
        (**self).delete(code).await
    }

    async fn list_all(&self) -> Result<Vec<UrlMapping>> {
        (**self).list_all().await
    }
}
