use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::database::mapper::{self, WritePath};
use crate::database::{StoreError, StudentStore};
use crate::types::{Student, Timestamp};

#[derive(Debug, Error)]
pub enum StudentError {
    #[error("Student not found: {0}")]
    NotFound(String),

    #[error("Failed to {operation} student: {source}")]
    Persistence {
        operation: &'static str,
        source: StoreError,
    },

    #[error("Student {operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },
}

/// CRUD operations over students. The only caller of the storage backend.
///
/// Every storage call is bounded by `deadline`; when it elapses the storage
/// future is dropped, which abandons the in-flight query.
#[derive(Clone)]
pub struct StudentService {
    store: Arc<dyn StudentStore>,
    deadline: Duration,
}

impl StudentService {
    pub fn new(store: Arc<dyn StudentStore>, deadline: Duration) -> Self {
        Self { store, deadline }
    }

    /// Assigns a fresh id and stamps `createdon`; `updatedon` stays zero
    #[instrument(skip_all, name = "students.create")]
    pub async fn create(&self, mut student: Student) -> Result<Student, StudentError> {
        student.id = Uuid::new_v4().to_string();
        let row = mapper::to_row(&student, WritePath::Create, Timestamp::now());

        let stored = self.bounded("create", self.store.insert(row)).await?;

        info!(student_id = %stored.id, created_by = ?stored.created_by, "Created student");
        Ok(mapper::from_row(stored))
    }

    #[instrument(skip(self), name = "students.get")]
    pub async fn get(&self, id: &str) -> Result<Student, StudentError> {
        self.bounded("fetch", self.store.fetch(id))
            .await?
            .map(mapper::from_row)
            .ok_or_else(|| StudentError::NotFound(id.to_string()))
    }

    #[instrument(skip(self), name = "students.list")]
    pub async fn list(&self, limit: usize) -> Result<Vec<Student>, StudentError> {
        let rows = self.bounded("list", self.store.list(limit)).await?;
        Ok(rows.into_iter().map(mapper::from_row).collect())
    }

    /// Full replace of the mutable fields; `id` comes from the caller's path
    #[instrument(skip(self, patch), name = "students.update")]
    pub async fn update(&self, id: &str, patch: Student) -> Result<Student, StudentError> {
        let student = Student {
            id: id.to_string(),
            ..patch
        };
        let row = mapper::to_row(&student, WritePath::Update, Timestamp::now());

        let stored = self
            .bounded("update", self.store.update(row))
            .await?
            .ok_or_else(|| StudentError::NotFound(id.to_string()))?;

        info!(student_id = %stored.id, updated_by = ?stored.updated_by, "Updated student");
        Ok(mapper::from_row(stored))
    }

    /// Returns whether the student existed; deleting twice is not an error
    #[instrument(skip(self), name = "students.delete")]
    pub async fn delete(&self, id: &str) -> Result<bool, StudentError> {
        let existed = self.bounded("delete", self.store.delete(id)).await?;
        if existed {
            info!(student_id = %id, "Deleted student");
        } else {
            warn!(student_id = %id, "Delete matched no student");
        }
        Ok(existed)
    }

    pub async fn ready_check(&self) -> Result<(), StudentError> {
        self.bounded("ping", self.store.ping()).await
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StudentError> {
        match tokio::time::timeout(self.deadline, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(source)) => Err(StudentError::Persistence { operation, source }),
            Err(_) => Err(StudentError::Timeout {
                operation,
                after: self.deadline,
            }),
        }
    }
}
