use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::{Company, JobRecord, JobType, NewJob};
use crate::models::user::Identity;
use crate::search::store::JobStore;

/// Employer dashboard row: one posting with its applicant count.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EmployerJobSummary {
    pub id: Uuid,
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
    pub applicant_count: i64,
}

/// Body of `PATCH /api/v1/jobs/:id`. Absent fields are left untouched;
/// `company` replaces the stored company object as a whole.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<JobType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
}

fn check_title(title: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    Ok(())
}

fn check_skills(skills: &[String]) -> Result<(), AppError> {
    if skills.iter().any(|s| s.trim().is_empty()) {
        return Err(AppError::Validation("skills cannot contain blank entries".to_string()));
    }
    Ok(())
}

/// Checks the posting and turns it into the stored document.
pub fn build_job_document(job: &NewJob, employer_id: &str) -> Result<Value, AppError> {
    check_title(&job.title)?;
    check_skills(&job.skills)?;

    let mut doc = serde_json::to_value(job).map_err(|e| AppError::Internal(e.into()))?;
    if let Some(obj) = doc.as_object_mut() {
        obj.insert("employerId".to_string(), Value::String(employer_id.to_string()));
    }
    Ok(doc)
}

/// The top-level keys to merge into a stored document.
pub fn build_job_patch(update: &JobUpdate) -> Result<Value, AppError> {
    if let Some(title) = &update.title {
        check_title(title)?;
    }
    if let Some(skills) = &update.skills {
        check_skills(skills)?;
    }

    let patch = serde_json::to_value(update).map_err(|e| AppError::Internal(e.into()))?;
    if patch.as_object().map_or(true, |fields| fields.is_empty()) {
        return Err(AppError::Validation("nothing to update".to_string()));
    }
    Ok(patch)
}

/// Admins manage every posting; employers only their own.
pub fn can_manage(identity: &Identity, owner: Option<&str>) -> bool {
    identity.is_admin() || owner == Some(identity.user_id.as_str())
}

async fn managed_job(
    store: &dyn JobStore,
    identity: &Identity,
    job_id: Uuid,
) -> Result<JobRecord, AppError> {
    let job = store
        .get_job(job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;
    if !can_manage(identity, job.employer_id.as_deref()) {
        return Err(AppError::Forbidden);
    }
    Ok(job)
}

pub async fn create_job(
    store: &dyn JobStore,
    employer_id: &str,
    job: &NewJob,
) -> Result<Uuid, AppError> {
    let doc = build_job_document(job, employer_id)?;
    let id = Uuid::new_v4();
    store.insert_job(id, employer_id, &doc).await?;

    info!("Employer {employer_id} posted job {id} ({})", job.title);
    Ok(id)
}

/// Applies `update` to a posting the caller manages and returns the result.
pub async fn update_job(
    store: &dyn JobStore,
    identity: &Identity,
    job_id: Uuid,
    update: &JobUpdate,
) -> Result<JobRecord, AppError> {
    let patch = build_job_patch(update)?;
    managed_job(store, identity, job_id).await?;

    if !store.update_job(job_id, &patch).await? {
        return Err(AppError::NotFound(format!("Job {job_id} not found")));
    }
    info!("Job {job_id} updated by {}", identity.user_id);

    store
        .get_job(job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))
}

/// Deletes a posting (and, by cascade, its applications and saves).
pub async fn delete_job(
    store: &dyn JobStore,
    identity: &Identity,
    job_id: Uuid,
) -> Result<(), AppError> {
    managed_job(store, identity, job_id).await?;
    store.delete_job(job_id).await?;

    info!("Job {job_id} deleted by {}", identity.user_id);
    Ok(())
}

pub async fn list_employer_jobs(
    pool: &PgPool,
    employer_id: &str,
) -> Result<Vec<EmployerJobSummary>, AppError> {
    Ok(sqlx::query_as::<_, EmployerJobSummary>(
        r#"
        SELECT j.id, j.data->>'title' AS title, j.created_at, COUNT(a.id) AS applicant_count
        FROM jobs j
        LEFT JOIN applications a ON a.job_id = j.id
        WHERE j.employer_id = $1
        GROUP BY j.id
        ORDER BY j.created_at DESC
        "#,
    )
    .bind(employer_id)
    .fetch_all(pool)
    .await?)
}
