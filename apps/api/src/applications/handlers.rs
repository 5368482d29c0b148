use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::applications::saved::{save_job, unsave_job};
use crate::applications::tracking::{
    apply_to_job, list_candidate_applications, list_job_applications, update_status,
};
use crate::errors::AppError;
use crate::models::application::{
    ApplicationRow, ApplicationStatus, ApplicationWithJob, SavedJobRow,
};
use crate::models::user::{Identity, Role};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    #[serde(default)]
    pub resume_url: Option<String>,
    #[serde(default)]
    pub cover_letter: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: ApplicationStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDashboard {
    pub applications: Vec<ApplicationWithJob>,
    pub saved_jobs: Vec<SavedJobRow>,
}

/// POST /api/v1/jobs/:id/apply
pub async fn handle_apply(
    State(state): State<AppState>,
    identity: Identity,
    Path(job_id): Path<Uuid>,
    Json(req): Json<ApplyRequest>,
) -> Result<(StatusCode, Json<ApplicationRow>), AppError> {
    identity.require_role(&[Role::Candidate])?;
    let row = apply_to_job(
        state.jobs.as_ref(),
        state.applications.as_ref(),
        &identity,
        job_id,
        req.resume_url,
        req.cover_letter,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/jobs/:id/applications
pub async fn handle_job_applications(
    State(state): State<AppState>,
    identity: Identity,
    Path(job_id): Path<Uuid>,
) -> Result<Json<Vec<ApplicationRow>>, AppError> {
    identity.require_role(&[Role::Employer, Role::Admin])?;
    let rows = list_job_applications(
        state.jobs.as_ref(),
        state.applications.as_ref(),
        &identity,
        job_id,
    )
    .await?;
    Ok(Json(rows))
}

/// PATCH /api/v1/applications/:id/status
pub async fn handle_update_status(
    State(state): State<AppState>,
    identity: Identity,
    Path(application_id): Path<Uuid>,
    Json(req): Json<StatusUpdateRequest>,
) -> Result<Json<ApplicationRow>, AppError> {
    identity.require_role(&[Role::Employer, Role::Admin])?;
    let row = update_status(
        state.jobs.as_ref(),
        state.applications.as_ref(),
        &identity,
        application_id,
        req.status,
    )
    .await?;
    Ok(Json(row))
}

/// POST /api/v1/jobs/:id/save
pub async fn handle_save_job(
    State(state): State<AppState>,
    identity: Identity,
    Path(job_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    identity.require_role(&[Role::Candidate])?;
    save_job(
        state.jobs.as_ref(),
        state.applications.as_ref(),
        &identity.user_id,
        job_id,
    )
    .await?;
    Ok(StatusCode::CREATED)
}

/// DELETE /api/v1/jobs/:id/save
pub async fn handle_unsave_job(
    State(state): State<AppState>,
    identity: Identity,
    Path(job_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    identity.require_role(&[Role::Candidate])?;
    unsave_job(state.applications.as_ref(), &identity.user_id, job_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/dashboard/candidate
pub async fn handle_candidate_dashboard(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<CandidateDashboard>, AppError> {
    identity.require_role(&[Role::Candidate])?;
    let applications =
        list_candidate_applications(state.applications.as_ref(), &identity.user_id).await?;
    let saved_jobs = state.applications.saved_jobs(&identity.user_id).await?;
    Ok(Json(CandidateDashboard {
        applications,
        saved_jobs,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::testing::{titled, MemoryJobStore};
    use crate::state::testing::test_state;
    use axum::response::IntoResponse;
    use std::sync::Arc;

    fn identity(role: Role) -> Identity {
        Identity {
            user_id: "user-1".to_string(),
            email: None,
            display_name: None,
            role,
        }
    }

    #[test]
    fn test_status_request_parses_wire_name() {
        let req: StatusUpdateRequest =
            serde_json::from_str(r#"{"status": "INTERVIEWING"}"#).unwrap();
        assert_eq!(req.status, ApplicationStatus::Interviewing);
    }

    #[tokio::test]
    async fn test_employers_cannot_apply() {
        let state = test_state(Arc::new(MemoryJobStore::default()));
        let err = handle_apply(
            State(state),
            identity(Role::Employer),
            Path(Uuid::new_v4()),
            Json(ApplyRequest::default()),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }

    #[tokio::test]
    async fn test_candidates_cannot_change_status() {
        let state = test_state(Arc::new(MemoryJobStore::default()));
        let err = handle_update_status(
            State(state),
            identity(Role::Candidate),
            Path(Uuid::new_v4()),
            Json(StatusUpdateRequest {
                status: ApplicationStatus::Accepted,
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }

    #[tokio::test]
    async fn test_duplicate_apply_is_409_over_http() {
        let job = titled("Rust Engineer");
        let job_id = job.id;
        let state = test_state(Arc::new(MemoryJobStore::with_jobs(vec![job])));

        let (status, _) = handle_apply(
            State(state.clone()),
            identity(Role::Candidate),
            Path(job_id),
            Json(ApplyRequest::default()),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let err = handle_apply(
            State(state.clone()),
            identity(Role::Candidate),
            Path(job_id),
            Json(ApplyRequest::default()),
        )
        .await
        .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
        assert_eq!(state.applications.count_for_job(job_id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_candidate_dashboard_lists_applications_and_saves() {
        let applied = titled("Rust Engineer");
        let bookmarked = titled("Go Engineer");
        let (applied_id, bookmarked_id) = (applied.id, bookmarked.id);
        let state = test_state(Arc::new(MemoryJobStore::with_jobs(vec![applied, bookmarked])));
        let candidate = identity(Role::Candidate);

        handle_apply(
            State(state.clone()),
            candidate.clone(),
            Path(applied_id),
            Json(ApplyRequest::default()),
        )
        .await
        .unwrap();
        handle_save_job(State(state.clone()), candidate.clone(), Path(bookmarked_id))
            .await
            .unwrap();

        let Json(dashboard) = handle_candidate_dashboard(State(state), candidate).await.unwrap();
        assert_eq!(dashboard.applications.len(), 1);
        assert_eq!(dashboard.applications[0].job_title.as_deref(), Some("Rust Engineer"));
        assert_eq!(dashboard.saved_jobs.len(), 1);
        assert_eq!(dashboard.saved_jobs[0].job_id, bookmarked_id);
    }

    #[tokio::test]
    async fn test_employers_have_no_saved_jobs() {
        let state = test_state(Arc::new(MemoryJobStore::default()));
        let err = handle_save_job(State(state), identity(Role::Employer), Path(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }
}
