//! Axum route handlers for job listing, detail and autocomplete.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::JobRecord;
use crate::models::user::{Identity, Role};
use crate::search::filter::{JobSearchParams, SearchCriteria};
use crate::search::similar::similar_jobs;
use crate::search::suggest::{suggest, SuggestField};
use crate::state::AppState;

/// Header carrying the client's autocomplete session for debouncing.
pub const SUGGEST_SESSION_HEADER: &str = "x-suggest-session";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobView {
    #[serde(flatten)]
    pub job: JobRecord,
    pub display_location: String,
}

impl From<JobRecord> for JobView {
    fn from(job: JobRecord) -> Self {
        let display_location = job.display_location().to_string();
        Self {
            job,
            display_location,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<JobView>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetailResponse {
    pub job: JobView,
    pub similar_jobs: Vec<JobView>,
    pub applicant_count: i64,
    /// Always `false` for anonymous viewers.
    pub has_applied: bool,
    pub is_saved: bool,
}

#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    pub term: String,
}

#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub suggestions: Vec<String>,
    pub superseded: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/jobs?q=&location=&type=&level=
///
/// Loads the full collection newest-first and applies the committed criteria.
/// A store failure is logged and yields an empty listing.
pub async fn handle_search_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobSearchParams>,
) -> Json<JobListResponse> {
    let jobs = match state.jobs.list_jobs(None).await {
        Ok(jobs) => jobs,
        Err(e) => {
            error!("Error fetching jobs: {e}");
            Vec::new()
        }
    };

    let criteria = SearchCriteria::from(&params);
    let jobs: Vec<JobView> = criteria.apply(jobs).into_iter().map(JobView::from).collect();

    Json(JobListResponse {
        total: jobs.len(),
        jobs,
    })
}

/// GET /api/v1/jobs/:id
///
/// Identity is optional here: signed-in viewers also learn whether they
/// already applied to or saved the job.
pub async fn handle_get_job(
    State(state): State<AppState>,
    viewer: Option<Identity>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobDetailResponse>, AppError> {
    let job = state
        .jobs
        .get_job(job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    let similar = similar_jobs(state.jobs.as_ref(), job_id).await;
    let applicant_count = state.applications.count_for_job(job_id).await?;
    let (has_applied, is_saved) = match &viewer {
        Some(viewer) => (
            state.applications.has_applied(job_id, &viewer.user_id).await?,
            state.applications.is_saved(job_id, &viewer.user_id).await?,
        ),
        None => (false, false),
    };

    Ok(Json(JobDetailResponse {
        job: job.into(),
        similar_jobs: similar.into_iter().map(JobView::from).collect(),
        applicant_count,
        has_applied,
        is_saved,
    }))
}

/// GET /api/v1/suggest/titles?term=
pub async fn handle_suggest_titles(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<SuggestQuery>,
) -> Json<SuggestResponse> {
    Json(debounced_suggest(&state, &headers, SuggestField::Title, &query.term).await)
}

/// GET /api/v1/suggest/locations?term=
pub async fn handle_suggest_locations(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<SuggestQuery>,
) -> Json<SuggestResponse> {
    Json(debounced_suggest(&state, &headers, SuggestField::Location, &query.term).await)
}

/// POST /api/v1/admin/search-cache/reset
pub async fn handle_reset_search_cache(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<StatusCode, AppError> {
    identity.require_role(&[Role::Admin])?;
    state.snapshot.reset();
    info!("Search cache reset by {}", identity.user_id);
    Ok(StatusCode::NO_CONTENT)
}

async fn debounced_suggest(
    state: &AppState,
    headers: &HeaderMap,
    field: SuggestField,
    term: &str,
) -> SuggestResponse {
    let session = headers
        .get(SUGGEST_SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        // Per-field sessions: title and location boxes debounce independently.
        .map(|s| format!("{field:?}:{s}"));

    let outcome = state
        .debouncer
        .run(session.as_deref(), || suggest(&state.snapshot, field, term))
        .await;

    match outcome {
        Some(suggestions) => SuggestResponse {
            suggestions,
            superseded: false,
        },
        None => SuggestResponse {
            suggestions: Vec::new(),
            superseded: true,
        },
    }
}
