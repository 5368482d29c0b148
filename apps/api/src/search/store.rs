use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::{JobRecord, JobRow};

/// Access to job postings. Records come back already normalised.
///
/// Carried in `AppState` as `Arc<dyn JobStore>` so search and posting
/// management can be exercised against an in-memory store.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Newest first. `limit = None` returns the whole collection.
    async fn list_jobs(&self, limit: Option<i64>) -> Result<Vec<JobRecord>, AppError>;

    async fn get_job(&self, id: Uuid) -> Result<Option<JobRecord>, AppError>;

    async fn insert_job(&self, id: Uuid, employer_id: &str, doc: &Value) -> Result<(), AppError>;

    /// Shallow-merges `patch` into the stored document: top-level keys in
    /// `patch` replace the stored ones. Returns `false` if the job is gone.
    async fn update_job(&self, id: Uuid, patch: &Value) -> Result<bool, AppError>;

    /// Returns `false` if there was nothing to delete.
    async fn delete_job(&self, id: Uuid) -> Result<bool, AppError>;
}

pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn list_jobs(&self, limit: Option<i64>) -> Result<Vec<JobRecord>, AppError> {
        // LIMIT NULL is "no limit" in Postgres.
        let rows = sqlx::query_as::<_, JobRow>(
            "SELECT id, employer_id, data, created_at FROM jobs ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(JobRecord::from).collect())
    }

    async fn get_job(&self, id: Uuid) -> Result<Option<JobRecord>, AppError> {
        let row = sqlx::query_as::<_, JobRow>(
            "SELECT id, employer_id, data, created_at FROM jobs WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(JobRecord::from))
    }

    async fn insert_job(&self, id: Uuid, employer_id: &str, doc: &Value) -> Result<(), AppError> {
        sqlx::query("INSERT INTO jobs (id, employer_id, data) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(employer_id)
            .bind(doc)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn update_job(&self, id: Uuid, patch: &Value) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE jobs SET data = data || $1 WHERE id = $2")
            .bind(patch)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_job(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
