use tracing::info;
use uuid::Uuid;

use crate::applications::store::{ApplicationStore, NewApplication};
use crate::errors::AppError;
use crate::models::application::{ApplicationRow, ApplicationStatus, ApplicationWithJob};
use crate::models::job::JobRecord;
use crate::models::user::Identity;
use crate::postings::manage::can_manage;
use crate::search::store::JobStore;

const UNKNOWN_CANDIDATE: &str = "Unknown Candidate";

/// Trims an optional free-text field; blank input is stored as NULL.
pub fn clean_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) async fn existing_job(store: &dyn JobStore, job_id: Uuid) -> Result<JobRecord, AppError> {
    store
        .get_job(job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))
}

/// Files one application. A second application for the same job writes
/// nothing and fails with `Conflict`.
pub async fn apply_to_job(
    jobs: &dyn JobStore,
    applications: &dyn ApplicationStore,
    candidate: &Identity,
    job_id: Uuid,
    resume_url: Option<String>,
    cover_letter: Option<String>,
) -> Result<ApplicationRow, AppError> {
    let job = existing_job(jobs, job_id).await?;

    let application = NewApplication {
        id: Uuid::new_v4(),
        job_id,
        candidate_id: candidate.user_id.clone(),
        candidate_name: Some(
            clean_text(candidate.display_name.clone())
                .unwrap_or_else(|| UNKNOWN_CANDIDATE.to_string()),
        ),
        candidate_email: clean_text(candidate.email.clone()),
        job_title: job.title,
        resume_url: clean_text(resume_url),
        cover_letter: clean_text(cover_letter),
    };

    let row = applications
        .insert_application(&application)
        .await?
        .ok_or_else(|| AppError::Conflict("Already applied".to_string()))?;

    info!("Candidate {} applied to job {job_id}", candidate.user_id);
    Ok(row)
}

/// Applications received for one posting, newest first. Owner or admin only.
pub async fn list_job_applications(
    jobs: &dyn JobStore,
    applications: &dyn ApplicationStore,
    identity: &Identity,
    job_id: Uuid,
) -> Result<Vec<ApplicationRow>, AppError> {
    let job = existing_job(jobs, job_id).await?;
    if !can_manage(identity, job.employer_id.as_deref()) {
        return Err(AppError::Forbidden);
    }
    applications.applications_for_job(job_id).await
}

/// Moves an application to `status`. Only the employer who owns the job
/// (or an admin) may do this.
pub async fn update_status(
    jobs: &dyn JobStore,
    applications: &dyn ApplicationStore,
    identity: &Identity,
    application_id: Uuid,
    status: ApplicationStatus,
) -> Result<ApplicationRow, AppError> {
    let not_found = || AppError::NotFound(format!("Application {application_id} not found"));

    let application = applications
        .get_application(application_id)
        .await?
        .ok_or_else(not_found)?;
    let owner = jobs
        .get_job(application.job_id)
        .await?
        .and_then(|job| job.employer_id);
    if !can_manage(identity, owner.as_deref()) {
        return Err(AppError::Forbidden);
    }

    let row = applications
        .set_status(application_id, status)
        .await?
        .ok_or_else(not_found)?;

    info!(
        "Application {application_id} moved to {} by {}",
        status.as_str(),
        identity.user_id
    );
    Ok(row)
}

pub async fn list_candidate_applications(
    applications: &dyn ApplicationStore,
    candidate_id: &str,
) -> Result<Vec<ApplicationWithJob>, AppError> {
    applications.applications_for_candidate(candidate_id).await
}
