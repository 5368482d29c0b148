use axum::{extract::State, Json};
use serde::Serialize;

use crate::enrich::logos::{enrich_logos, LogoSources};
use crate::errors::AppError;
use crate::models::user::{Identity, Role};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct EnrichResponse {
    pub success: bool,
    pub count: usize,
}

/// POST /api/v1/admin/enrich-logos
pub async fn handle_enrich_logos(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<EnrichResponse>, AppError> {
    identity.require_role(&[Role::Admin])?;

    let jobs = state.jobs.list_jobs(None).await?;
    let count = enrich_logos(
        state.jobs.as_ref(),
        &state.http,
        &LogoSources::default(),
        &jobs,
    )
    .await?;

    Ok(Json(EnrichResponse {
        success: true,
        count,
    }))
}
