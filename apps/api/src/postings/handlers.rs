use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::NewJob;
use crate::models::user::{Identity, Role};
use crate::postings::manage::{
    create_job, delete_job, list_employer_jobs, update_job, EmployerJobSummary, JobUpdate,
};
use crate::search::handlers::JobView;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CreatedJob {
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerDashboard {
    pub jobs: Vec<EmployerJobSummary>,
    pub total_applicants: i64,
}

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    identity: Identity,
    Json(job): Json<NewJob>,
) -> Result<(StatusCode, Json<CreatedJob>), AppError> {
    identity.require_role(&[Role::Employer, Role::Admin])?;
    let id = create_job(state.jobs.as_ref(), &identity.user_id, &job).await?;
    state.snapshot.reset();
    Ok((StatusCode::CREATED, Json(CreatedJob { id })))
}

/// DELETE /api/v1/jobs/:id
pub async fn handle_delete_job(
    State(state): State<AppState>,
    identity: Identity,
    Path(job_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    identity.require_role(&[Role::Employer, Role::Admin])?;
    delete_job(state.jobs.as_ref(), &identity, job_id).await?;
    state.snapshot.reset();
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/jobs/:id
pub async fn handle_update_job(
    State(state): State<AppState>,
    identity: Identity,
    Path(job_id): Path<Uuid>,
    Json(update): Json<JobUpdate>,
) -> Result<Json<JobView>, AppError> {
    identity.require_role(&[Role::Employer, Role::Admin])?;
    let job = update_job(state.jobs.as_ref(), &identity, job_id, &update).await?;
    state.snapshot.reset();
    Ok(Json(job.into()))
}

/// GET /api/v1/dashboard/employer
pub async fn handle_employer_dashboard(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<EmployerDashboard>, AppError> {
    identity.require_role(&[Role::Employer, Role::Admin])?;
    let jobs = list_employer_jobs(&state.db, &identity.user_id).await?;
    let total_applicants = jobs.iter().map(|j| j.applicant_count).sum();
    Ok(Json(EmployerDashboard {
        jobs,
        total_applicants,
    }))
}
