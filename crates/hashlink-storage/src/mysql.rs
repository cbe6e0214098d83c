use async_trait::async_trait;
use hashlink_core::error::StorageError;
use hashlink_core::repository::{InsertOutcome, Repository, Result, UrlMapping, UrlRecord};
use hashlink_core::shortcode::ShortCode;
use jiff::Timestamp;
use sqlx::{MySqlPool, Row};
use tracing::{debug, trace};

/// Schema for the `short_urls` table.
///
/// `original_url` is `MEDIUMTEXT`: any URL that passes validation and fits in
/// a request body fits in the column.
pub const SCHEMA: &str = include_str!("../ddl/mysql/short_urls.sql");

/// How many times an insert is retried when the conflicting row disappears
/// before it can be read.
const INSERT_ATTEMPTS: usize = 3;

/// MySQL implementation of the repository contract.
///
/// `short_code` is the primary key, so insert-if-absent is a plain INSERT
/// whose unique violation is turned into a read of the row that won. The
/// table uses a binary collation: codes are case sensitive.
///
/// Each statement borrows a connection from the pool and returns it when the
/// statement completes or fails.
#[derive(Debug, Clone)]
pub struct MySqlRepository {
    pool: MySqlPool,
}

impl MySqlRepository {
    /// Creates a repository from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Creates a repository by opening a new MySQL connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Creates the `short_urls` table if it does not exist.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }
}

fn parse_created_at(micros: i64) -> Result<Timestamp> {
    Timestamp::from_microsecond(micros).map_err(|e| {
        StorageError::InvalidData(format!("invalid created_at timestamp '{}': {e}", micros))
    })
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl Repository for MySqlRepository {
    async fn insert_if_absent(
        &self,
        code: &ShortCode,
        record: UrlRecord,
    ) -> Result<InsertOutcome> {
        let created_at = record.created_at.as_microsecond();

        for attempt in 1..=INSERT_ATTEMPTS {
            let result = sqlx::query(
                r#"
                INSERT INTO short_urls (short_code, original_url, created_at)
                VALUES (?, ?, ?)
                "#,
            )
            .bind(code.as_str())
            .bind(record.original_url.as_str())
            .bind(created_at)
            .execute(&self.pool)
            .await;

            match result {
                Ok(_) => {
                    debug!(code = %code, "Inserted URL record");
                    return Ok(InsertOutcome::Inserted);
                }
                Err(err) if is_unique_violation(&err) => {
                    trace!(code = %code, attempt, "Short code already taken");
                }
                Err(err) => return Err(map_sqlx_error(err)),
            }

            if let Some(existing) = self.get(code).await? {
                return Ok(InsertOutcome::AlreadyExists(existing));
            }
            debug!(code = %code, attempt, "Conflicting row vanished before read, retrying insert");
        }

        Err(StorageError::Conflict(code.to_string()))
    }

    async fn get(&self, code: &ShortCode) -> Result<Option<UrlRecord>> {
        let row = sqlx::query(
            r#"
            SELECT original_url, created_at
            FROM short_urls
            WHERE short_code = ?
            LIMIT 1
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let original_url: String = row.try_get("original_url").map_err(map_sqlx_error)?;
        let created_at_raw: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;

        Ok(Some(UrlRecord {
            original_url,
            created_at: parse_created_at(created_at_raw)?,
        }))
    }

    async fn get_by_url(&self, original_url: &str) -> Result<Option<ShortCode>> {
        let row = sqlx::query(
            r#"
            SELECT short_code
            FROM short_urls
            WHERE original_url = ?
            ORDER BY created_at
            LIMIT 1
            "#,
        )
        .bind(original_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let short_code: String = row.try_get("short_code").map_err(map_sqlx_error)?;
        Ok(Some(ShortCode::new_unchecked(short_code)))
    }

    async fn delete(&self, code: &ShortCode) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM short_urls
            WHERE short_code = ?
            "#,
        )
        .bind(code.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_all(&self) -> Result<Vec<UrlMapping>> {
        let rows = sqlx::query(
            r#"
            SELECT short_code, original_url, created_at
            FROM short_urls
            ORDER BY created_at DESC, short_code
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter()
            .map(|row| {
                let short_code: String = row.try_get("short_code").map_err(map_sqlx_error)?;
                let original_url: String = row.try_get("original_url").map_err(map_sqlx_error)?;
                let created_at_raw: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;
                Ok(UrlMapping {
                    code: ShortCode::new_unchecked(short_code),
                    record: UrlRecord {
                        original_url,
                        created_at: parse_created_at(created_at_raw)?,
                    },
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_at_round_trips_through_micros() {
        let now = Timestamp::now();
        let micros = now.as_microsecond();
        assert_eq!(parse_created_at(micros).unwrap().as_microsecond(), micros);
    }

    #[test]
    fn created_at_out_of_range_is_invalid_data() {
        let err = parse_created_at(i64::MAX).unwrap_err();
        assert!(matches!(err, StorageError::InvalidData(_)));
    }

    #[test]
    fn pool_timeout_maps_to_timeout() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolTimedOut),
            StorageError::Timeout(_)
        ));
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolClosed),
            StorageError::Unavailable(_)
        ));
        assert!(matches!(
            map_sqlx_error(sqlx::Error::RowNotFound),
            StorageError::InvalidData(_)
        ));
    }

    #[test]
    fn schema_declares_primary_key() {
        assert!(SCHEMA.contains("PRIMARY KEY (short_code)"));
        assert!(SCHEMA.contains("utf8mb4_bin"));
    }

    #[test]
    fn schema_does_not_cap_url_length() {
        let column = SCHEMA
            .lines()
            .find(|line| line.trim_start().starts_with("original_url"))
            .unwrap();
        assert!(column.contains("MEDIUMTEXT"), "{column}");
        assert!(!column.contains("VARCHAR"), "{column}");
        assert!(SCHEMA.contains("(original_url(255))"));
    }
}
