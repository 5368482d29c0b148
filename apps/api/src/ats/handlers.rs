use axum::{extract::State, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::ats::analyzer::{analyze_resume, AtsAnalysis};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    /// Plain text or a `data:<mime>;base64,…` URI.
    pub resume: String,
    #[serde(default)]
    pub job_description: String,
    /// Used when `job_description` is blank: score against this posting.
    #[serde(default)]
    pub job_id: Option<Uuid>,
}

/// POST /api/v1/ats/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AtsAnalysis>, AppError> {
    let mut job_description = request.job_description;
    if job_description.trim().is_empty() {
        if let Some(job_id) = request.job_id {
            let job = state
                .jobs
                .get_job(job_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;
            job_description = job.description.unwrap_or_default();
        }
    }

    let analysis = analyze_resume(state.llm.as_ref(), &request.resume, &job_description).await?;
    Ok(Json(analysis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::testing::MemoryJobStore;
    use crate::state::testing::test_state;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_unknown_job_id_is_not_found() {
        let state = test_state(Arc::new(MemoryJobStore::default()));
        let request = AnalyzeRequest {
            resume: "text".to_string(),
            job_description: String::new(),
            job_id: Some(Uuid::new_v4()),
        };
        let err = handle_analyze(State(state), Json(request)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_without_api_key_reports_not_configured() {
        let state = test_state(Arc::new(MemoryJobStore::default()));
        let request = AnalyzeRequest {
            resume: "text".to_string(),
            job_description: "Rust".to_string(),
            job_id: None,
        };
        let err = handle_analyze(State(state), Json(request)).await.unwrap_err();
        assert!(matches!(err, AppError::NotConfigured(_)));
    }
}
