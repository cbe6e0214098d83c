use thiserror::Error;

/// Failures while bringing up a backing service for a test.
#[derive(Debug, Error)]
pub enum TestInfraError {
    #[error("failed to run container: {0}")]
    Container(#[from] testcontainers::TestcontainersError),

    #[error("redis not ready: {0}")]
    Redis(#[from] redis::RedisError),

    /// The server never accepted a connection, or the schema failed to apply.
    #[error("mysql not ready: {0}")]
    MySql(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, TestInfraError>;
