use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::companies::directory::{build_directory, find_company, CompanySummary};
use crate::errors::AppError;
use crate::search::handlers::JobView;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CompanyListResponse {
    pub companies: Vec<CompanySummary>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct CompanyDetailResponse {
    pub company: CompanySummary,
    pub jobs: Vec<JobView>,
}

/// GET /api/v1/companies
///
/// Like the job listing, a store failure is logged and yields an empty
/// directory.
pub async fn handle_list_companies(State(state): State<AppState>) -> Json<CompanyListResponse> {
    let jobs = match state.jobs.list_jobs(None).await {
        Ok(jobs) => jobs,
        Err(e) => {
            error!("Error fetching jobs for the company directory: {e}");
            Vec::new()
        }
    };
    let companies = build_directory(&jobs);
    Json(CompanyListResponse {
        total: companies.len(),
        companies,
    })
}

/// GET /api/v1/companies/:slug
pub async fn handle_get_company(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<CompanyDetailResponse>, AppError> {
    let jobs = state.jobs.list_jobs(None).await?;
    let (company, jobs) = find_company(jobs, &slug)
        .ok_or_else(|| AppError::NotFound(format!("Company {slug} not found")))?;
    Ok(Json(CompanyDetailResponse {
        company,
        jobs: jobs.into_iter().map(JobView::from).collect(),
    }))
}
