use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::{
    ApplicationRow, ApplicationStatus, ApplicationWithJob, SavedJobRow,
};

const APPLICATION_COLUMNS: &str = "id, job_id, candidate_id, candidate_name, candidate_email, \
     job_title, resume_url, cover_letter, status, created_at";

/// An application about to be written.
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub id: Uuid,
    pub job_id: Uuid,
    pub candidate_id: String,
    pub candidate_name: Option<String>,
    pub candidate_email: Option<String>,
    pub job_title: Option<String>,
    pub resume_url: Option<String>,
    pub cover_letter: Option<String>,
}

/// Applications and saved jobs. One application and one save per
/// (job, candidate): duplicate writes change nothing and report it.
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    /// `None` when the candidate already applied to the job.
    async fn insert_application(
        &self,
        application: &NewApplication,
    ) -> Result<Option<ApplicationRow>, AppError>;

    async fn get_application(&self, id: Uuid) -> Result<Option<ApplicationRow>, AppError>;

    async fn set_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Option<ApplicationRow>, AppError>;

    /// Newest first.
    async fn applications_for_job(&self, job_id: Uuid) -> Result<Vec<ApplicationRow>, AppError>;

    /// Newest first.
    async fn applications_for_candidate(
        &self,
        candidate_id: &str,
    ) -> Result<Vec<ApplicationWithJob>, AppError>;

    async fn count_for_job(&self, job_id: Uuid) -> Result<i64, AppError>;

    async fn has_applied(&self, job_id: Uuid, candidate_id: &str) -> Result<bool, AppError>;

    /// `false` when the job was already saved.
    async fn save_job(&self, candidate_id: &str, job_id: Uuid) -> Result<bool, AppError>;

    /// `false` when the job was not saved.
    async fn unsave_job(&self, candidate_id: &str, job_id: Uuid) -> Result<bool, AppError>;

    async fn saved_jobs(&self, candidate_id: &str) -> Result<Vec<SavedJobRow>, AppError>;

    async fn is_saved(&self, job_id: Uuid, candidate_id: &str) -> Result<bool, AppError>;
}

pub struct PgApplicationStore {
    pool: PgPool,
}

impl PgApplicationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicationStore for PgApplicationStore {
    async fn insert_application(
        &self,
        application: &NewApplication,
    ) -> Result<Option<ApplicationRow>, AppError> {
        let sql = format!(
            r#"
            INSERT INTO applications
                (id, job_id, candidate_id, candidate_name, candidate_email, job_title,
                 resume_url, cover_letter, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (job_id, candidate_id) DO NOTHING
            RETURNING {APPLICATION_COLUMNS}
            "#
        );
        Ok(sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(application.id)
            .bind(application.job_id)
            .bind(&application.candidate_id)
            .bind(&application.candidate_name)
            .bind(&application.candidate_email)
            .bind(&application.job_title)
            .bind(&application.resume_url)
            .bind(&application.cover_letter)
            .bind(ApplicationStatus::Pending.as_str())
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn get_application(&self, id: Uuid) -> Result<Option<ApplicationRow>, AppError> {
        let sql = format!("SELECT {APPLICATION_COLUMNS} FROM applications WHERE id = $1");
        Ok(sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Option<ApplicationRow>, AppError> {
        let sql = format!(
            "UPDATE applications SET status = $1 WHERE id = $2 RETURNING {APPLICATION_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(status.as_str())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn applications_for_job(&self, job_id: Uuid) -> Result<Vec<ApplicationRow>, AppError> {
        let sql = format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE job_id = $1 ORDER BY created_at DESC"
        );
        Ok(sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(job_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn applications_for_candidate(
        &self,
        candidate_id: &str,
    ) -> Result<Vec<ApplicationWithJob>, AppError> {
        Ok(sqlx::query_as::<_, ApplicationWithJob>(
            r#"
            SELECT a.id, a.job_id, a.status, a.created_at,
                   COALESCE(j.data->>'title', a.job_title) AS job_title,
                   COALESCE(j.data->'company'->>'name', j.data->>'companyName') AS company_name
            FROM applications a
            JOIN jobs j ON j.id = a.job_id
            WHERE a.candidate_id = $1
            ORDER BY a.created_at DESC
            "#,
        )
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn count_for_job(&self, job_id: Uuid) -> Result<i64, AppError> {
        Ok(
            sqlx::query_scalar("SELECT COUNT(*) FROM applications WHERE job_id = $1")
                .bind(job_id)
                .fetch_one(&self.pool)
                .await?,
        )
    }

    async fn has_applied(&self, job_id: Uuid, candidate_id: &str) -> Result<bool, AppError> {
        Ok(sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM applications WHERE job_id = $1 AND candidate_id = $2)",
        )
        .bind(job_id)
        .bind(candidate_id)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn save_job(&self, candidate_id: &str, job_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO saved_jobs (candidate_id, job_id)
            VALUES ($1, $2)
            ON CONFLICT (candidate_id, job_id) DO NOTHING
            "#,
        )
        .bind(candidate_id)
        .bind(job_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn unsave_job(&self, candidate_id: &str, job_id: Uuid) -> Result<bool, AppError> {
        let result =
            sqlx::query("DELETE FROM saved_jobs WHERE candidate_id = $1 AND job_id = $2")
                .bind(candidate_id)
                .bind(job_id)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn saved_jobs(&self, candidate_id: &str) -> Result<Vec<SavedJobRow>, AppError> {
        Ok(sqlx::query_as::<_, SavedJobRow>(
            r#"
            SELECT s.job_id, s.created_at, j.data->>'title' AS job_title
            FROM saved_jobs s
            JOIN jobs j ON j.id = s.job_id
            WHERE s.candidate_id = $1
            ORDER BY s.created_at DESC
            "#,
        )
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn is_saved(&self, job_id: Uuid, candidate_id: &str) -> Result<bool, AppError> {
        Ok(sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM saved_jobs WHERE job_id = $1 AND candidate_id = $2)",
        )
        .bind(job_id)
        .bind(candidate_id)
        .fetch_one(&self.pool)
        .await?)
    }
}
