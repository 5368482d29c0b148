use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};

use crate::errors::AppError;
use crate::models::user::Identity;
use crate::state::AppState;
use crate::uploads::resume::{store_resume, StoredResume};

/// POST /api/v1/uploads/resume (multipart, field `file`)
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    identity: Identity,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<StoredResume>), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("resume").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let body = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?;

        let stored = store_resume(
            &state.s3,
            &state.config.s3_bucket,
            &state.config.s3_endpoint,
            &identity.user_id,
            &file_name,
            &content_type,
            body,
        )
        .await?;
        return Ok((StatusCode::CREATED, Json(stored)));
    }

    Err(AppError::Validation("Missing 'file' field".to_string()))
}
