use async_trait::async_trait;
use thiserror::Error;

use crate::database::models::StudentRow;

/// Errors raised by a storage backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Duplicate student id: {0}")]
    DuplicateId(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Row-level access to the `student` table.
///
/// Implementations only see [`StudentRow`]s; mapping to the domain type is
/// done by the service. Dropping a returned future must abandon the
/// underlying operation.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Insert a new row and return it as stored
    async fn insert(&self, row: StudentRow) -> Result<StudentRow, StoreError>;

    async fn fetch(&self, id: &str) -> Result<Option<StudentRow>, StoreError>;

    /// At most `limit` rows in the store's natural order
    async fn list(&self, limit: usize) -> Result<Vec<StudentRow>, StoreError>;

    /// Replace the mutable columns of the row with `row.id`, leaving
    /// `createdby`/`createdon` alone. `None` when no row has that id.
    async fn update(&self, row: StudentRow) -> Result<Option<StudentRow>, StoreError>;

    /// Returns whether a row was removed
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}
