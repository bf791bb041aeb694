use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::models::StudentRow;
use crate::database::store::{StoreError, StudentStore};

/// PostgreSQL-backed student storage
#[derive(Clone)]
pub struct PgStudentStore {
    pool: PgPool,
}

impl PgStudentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentStore for PgStudentStore {
    async fn insert(&self, row: StudentRow) -> Result<StudentRow, StoreError> {
        let sql = format!(
            "INSERT INTO student ({cols})
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {cols}",
            cols = StudentRow::COLUMNS
        );

        let stored = sqlx::query_as::<_, StudentRow>(&sql)
            .bind(&row.id)
            .bind(&row.fname)
            .bind(&row.lname)
            .bind(&row.email)
            .bind(&row.gender)
            .bind(row.date_of_birth)
            .bind(&row.address)
            .bind(&row.created_by)
            .bind(row.created_on)
            .bind(&row.updated_by)
            .bind(row.updated_on)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::DuplicateId(row.id.clone()),
                _ => StoreError::from(e),
            })?;

        Ok(stored)
    }

    async fn fetch(&self, id: &str) -> Result<Option<StudentRow>, StoreError> {
        let sql = format!("SELECT {} FROM student WHERE id = $1", StudentRow::COLUMNS);

        let row = sqlx::query_as::<_, StudentRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    async fn list(&self, limit: usize) -> Result<Vec<StudentRow>, StoreError> {
        let sql = format!(
            "SELECT {} FROM student ORDER BY createdon ASC NULLS LAST, id ASC LIMIT $1",
            StudentRow::COLUMNS
        );

        let rows = sqlx::query_as::<_, StudentRow>(&sql)
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn update(&self, row: StudentRow) -> Result<Option<StudentRow>, StoreError> {
        let sql = format!(
            "UPDATE student
             SET fname = $2,
                 lname = $3,
                 email = $4,
                 gender = $5,
                 dateofbirth = $6,
                 address = $7,
                 updatedby = $8,
                 updatedon = $9
             WHERE id = $1
             RETURNING {}",
            StudentRow::COLUMNS
        );

        let stored = sqlx::query_as::<_, StudentRow>(&sql)
            .bind(&row.id)
            .bind(&row.fname)
            .bind(&row.lname)
            .bind(&row.email)
            .bind(&row.gender)
            .bind(row.date_of_birth)
            .bind(&row.address)
            .bind(&row.updated_by)
            .bind(row.updated_on)
            .fetch_optional(&self.pool)
            .await?;

        Ok(stored)
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM student WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        if self.pool.is_closed() {
            return Err(StoreError::Unavailable("connection pool is closed".to_string()));
        }
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
