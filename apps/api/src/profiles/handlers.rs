use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::models::profile::{CandidateProfile, ProfileUpdate};
use crate::models::user::{Identity, Role};
use crate::profiles::editor::{load_profile, save_profile};
use crate::state::AppState;

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<CandidateProfile>, AppError> {
    identity.require_role(&[Role::Candidate])?;
    Ok(Json(load_profile(state.profiles.as_ref(), &identity.user_id).await?))
}

/// PUT /api/v1/profile
pub async fn handle_put_profile(
    State(state): State<AppState>,
    identity: Identity,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<CandidateProfile>, AppError> {
    identity.require_role(&[Role::Candidate])?;
    let profile = save_profile(state.profiles.as_ref(), &identity.user_id, update).await?;
    Ok(Json(profile))
}
