use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::models::StudentRow;
use crate::database::store::{StoreError, StudentStore};

/// Process-local student storage, ordered by insertion.
///
/// Used when no database is configured and by the test suites.
#[derive(Default)]
pub struct MemoryStudentStore {
    rows: RwLock<Vec<StudentRow>>,
}

impl MemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl StudentStore for MemoryStudentStore {
    async fn insert(&self, row: StudentRow) -> Result<StudentRow, StoreError> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|existing| existing.id == row.id) {
            return Err(StoreError::DuplicateId(row.id));
        }
        rows.push(row.clone());
        Ok(row)
    }

    async fn fetch(&self, id: &str) -> Result<Option<StudentRow>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|row| row.id == id).cloned())
    }

    async fn list(&self, limit: usize) -> Result<Vec<StudentRow>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().take(limit).cloned().collect())
    }

    async fn update(&self, row: StudentRow) -> Result<Option<StudentRow>, StoreError> {
        let mut rows = self.rows.write().await;
        let Some(existing) = rows.iter_mut().find(|existing| existing.id == row.id) else {
            return Ok(None);
        };

        existing.fname = row.fname;
        existing.lname = row.lname;
        existing.email = row.email;
        existing.gender = row.gender;
        existing.date_of_birth = row.date_of_birth;
        existing.address = row.address;
        existing.updated_by = row.updated_by;
        existing.updated_on = row.updated_on;

        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|row| row.id != id);
        Ok(rows.len() < before)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, fname: &str) -> StudentRow {
        StudentRow {
            id: id.to_string(),
            fname: Some(fname.to_string()),
            lname: None,
            email: None,
            gender: None,
            date_of_birth: None,
            address: None,
            created_by: Some("creator".to_string()),
            created_on: Some(chrono::Utc::now()),
            updated_by: None,
            updated_on: None,
        }
    }

    #[tokio::test]
    async fn rejects_duplicate_ids() {
        let store = MemoryStudentStore::new();
        store.insert(row("a", "Ada")).await.unwrap();
        let err = store.insert(row("a", "Again")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId(id) if id == "a"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn lists_in_insertion_order_up_to_limit() {
        let store = MemoryStudentStore::new();
        for (id, name) in [("a", "A"), ("b", "B"), ("c", "C")] {
            store.insert(row(id, name)).await.unwrap();
        }

        let ids: Vec<String> = store.list(2).await.unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn update_keeps_creation_columns() {
        let store = MemoryStudentStore::new();
        let original = store.insert(row("a", "Ada")).await.unwrap();

        let mut replacement = row("a", "Augusta");
        replacement.created_by = Some("someone-else".to_string());
        replacement.created_on = None;

        let stored = store.update(replacement).await.unwrap().unwrap();
        assert_eq!(stored.fname.as_deref(), Some("Augusta"));
        assert_eq!(stored.created_by, original.created_by);
        assert_eq!(stored.created_on, original.created_on);
    }

    #[tokio::test]
    async fn update_of_missing_row_is_none() {
        let store = MemoryStudentStore::new();
        assert!(store.update(row("missing", "X")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_reports_whether_row_existed() {
        let store = MemoryStudentStore::new();
        store.insert(row("a", "Ada")).await.unwrap();

        assert!(store.delete("a").await.unwrap());
        assert!(!store.delete("a").await.unwrap());
        assert!(store.is_empty().await);
    }
}
