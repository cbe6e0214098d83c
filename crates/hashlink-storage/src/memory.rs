use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use hashlink_core::repository::{InsertOutcome, Repository, Result, UrlMapping, UrlRecord};
use hashlink_core::ShortCode;

/// In-memory implementation of the Repository trait using DashMap.
///
/// Insert-if-absent runs under the shard lock of the code's bucket, so
/// racing inserts for one code see exactly one winner.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    storage: DashMap<String, UrlRecord>,
    /// original_url -> short_code, first insertion wins.
    by_url: DashMap<String, String>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
            by_url: DashMap::with_capacity(capacity),
        }
    }

    /// Number of stored mappings.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert_if_absent(
        &self,
        code: &ShortCode,
        record: UrlRecord,
    ) -> Result<InsertOutcome> {
        match self.storage.entry(code.as_str().to_owned()) {
            Entry::Occupied(existing) => Ok(InsertOutcome::AlreadyExists(existing.get().clone())),
            Entry::Vacant(slot) => {
                self.by_url
                    .entry(record.original_url.clone())
                    .or_insert_with(|| code.as_str().to_owned());
                slot.insert(record);
                Ok(InsertOutcome::Inserted)
            }
        }
    }

    async fn get(&self, code: &ShortCode) -> Result<Option<UrlRecord>> {
        Ok(self.storage.get(code.as_str()).map(|entry| entry.clone()))
    }

    async fn get_by_url(&self, original_url: &str) -> Result<Option<ShortCode>> {
        Ok(self
            .by_url
            .get(original_url)
            .map(|entry| ShortCode::new_unchecked(entry.value().clone())))
    }

    async fn delete(&self, code: &ShortCode) -> Result<bool> {
        let Some((_, record)) = self.storage.remove(code.as_str()) else {
            return Ok(false);
        };
        self.by_url
            .remove_if(&record.original_url, |_, owner| owner == code.as_str());
        Ok(true)
    }

    async fn list_all(&self) -> Result<Vec<UrlMapping>> {
        let mut mappings: Vec<UrlMapping> = self
            .storage
            .iter()
            .map(|entry| UrlMapping {
                code: ShortCode::new_unchecked(entry.key().clone()),
                record: entry.value().clone(),
            })
            .collect();
        mappings.sort_by(|a, b| {
            b.record
                .created_at
                .cmp(&a.record.created_at)
                .then_with(|| a.code.as_str().cmp(b.code.as_str()))
        });
        Ok(mappings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn code(s: &str) -> ShortCode {
        ShortCode::new_unchecked(s)
    }

    fn record(url: &str) -> UrlRecord {
        UrlRecord::new(url)
    }

    #[tokio::test]
    async fn insert_and_get() {
        let repo = InMemoryRepository::new();

        let outcome = repo
            .insert_if_absent(&code("abc123"), record("https://example.com"))
            .await
            .unwrap();
        assert_eq!(outcome, InsertOutcome::Inserted);

        let result = repo.get(&code("abc123")).await.unwrap().unwrap();
        assert_eq!(result.original_url, "https://example.com");
    }

    #[tokio::test]
    async fn get_nonexistent() {
        let repo = InMemoryRepository::new();

        let result = repo.get(&code("nope00")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn insert_reports_existing_owner() {
        let repo = InMemoryRepository::new();
        let first = record("https://example.com");

        repo.insert_if_absent(&code("abc123"), first.clone())
            .await
            .unwrap();

        let outcome = repo
            .insert_if_absent(&code("abc123"), record("https://other.com"))
            .await
            .unwrap();

        assert_eq!(outcome, InsertOutcome::AlreadyExists(first));
        let stored = repo.get(&code("abc123")).await.unwrap().unwrap();
        assert_eq!(stored.original_url, "https://example.com");
    }

    #[tokio::test]
    async fn get_by_url_finds_code() {
        let repo = InMemoryRepository::new();

        repo.insert_if_absent(&code("abc123"), record("https://example.com"))
            .await
            .unwrap();

        assert_eq!(
            repo.get_by_url("https://example.com").await.unwrap(),
            Some(code("abc123"))
        );
        assert_eq!(repo.get_by_url("https://other.com").await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_existing() {
        let repo = InMemoryRepository::new();

        repo.insert_if_absent(&code("abc123"), record("https://example.com"))
            .await
            .unwrap();

        assert!(repo.delete(&code("abc123")).await.unwrap());
        assert!(repo.get(&code("abc123")).await.unwrap().is_none());
        assert!(repo.get_by_url("https://example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_nonexistent() {
        let repo = InMemoryRepository::new();

        assert!(!repo.delete(&code("nope00")).await.unwrap());
    }

    #[tokio::test]
    async fn recreate_after_delete() {
        let repo = InMemoryRepository::new();

        repo.insert_if_absent(&code("abc123"), record("https://old.com"))
            .await
            .unwrap();
        repo.delete(&code("abc123")).await.unwrap();

        let outcome = repo
            .insert_if_absent(&code("abc123"), record("https://new.com"))
            .await
            .unwrap();
        assert_eq!(outcome, InsertOutcome::Inserted);

        let result = repo.get(&code("abc123")).await.unwrap().unwrap();
        assert_eq!(result.original_url, "https://new.com");
        assert_eq!(
            repo.get_by_url("https://new.com").await.unwrap(),
            Some(code("abc123"))
        );
    }

    #[tokio::test]
    async fn list_all_is_newest_first() {
        let repo = InMemoryRepository::new();
        let older = UrlRecord {
            original_url: "https://old.com".to_string(),
            created_at: "2024-01-01T00:00:00Z".parse().unwrap(),
        };
        let newer = UrlRecord {
            original_url: "https://new.com".to_string(),
            created_at: "2024-06-01T00:00:00Z".parse().unwrap(),
        };

        assert!(repo.list_all().await.unwrap().is_empty());

        repo.insert_if_absent(&code("old001"), older.clone())
            .await
            .unwrap();
        repo.insert_if_absent(&code("new001"), newer.clone())
            .await
            .unwrap();

        let listed = repo.list_all().await.unwrap();
        assert_eq!(
            listed,
            vec![
                UrlMapping {
                    code: code("new001"),
                    record: newer,
                },
                UrlMapping {
                    code: code("old001"),
                    record: older,
                },
            ]
        );

        repo.delete(&code("new001")).await.unwrap();
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn concurrent_inserts_have_one_winner() {
        let repo = Arc::new(InMemoryRepository::new());
        let mut handles = vec![];

        for i in 0..16u64 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.insert_if_absent(&code("race00"), record(&format!("https://r{i}.com")))
                    .await
                    .unwrap()
            }));
        }

        let mut inserted = 0;
        for handle in handles {
            if handle.await.unwrap() == InsertOutcome::Inserted {
                inserted += 1;
            }
        }

        assert_eq!(inserted, 1);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn concurrent_access() {
        let repo = Arc::new(InMemoryRepository::new());
        let mut handles = vec![];

        for i in 0..10u64 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                let c = ShortCode::new_unchecked(format!("code-{:03}", i));
                repo.insert_if_absent(&c, record(&format!("https://example{}.com", i)))
                    .await
                    .unwrap();
            }));
        }

        for i in 0..10u64 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                let c = ShortCode::new_unchecked(format!("code-{:03}", i));
                let _ = repo.get(&c).await;
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        for i in 0..10u64 {
            let c = ShortCode::new_unchecked(format!("code-{:03}", i));
            let result = repo.get(&c).await.unwrap().unwrap();
            assert_eq!(result.original_url, format!("https://example{}.com", i));
        }
    }
}
