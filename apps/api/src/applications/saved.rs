use tracing::info;
use uuid::Uuid;

use crate::applications::store::ApplicationStore;
use crate::applications::tracking::existing_job;
use crate::errors::AppError;
use crate::search::store::JobStore;

/// Bookmarks a job. Saving it twice fails with `Conflict`.
pub async fn save_job(
    jobs: &dyn JobStore,
    applications: &dyn ApplicationStore,
    candidate_id: &str,
    job_id: Uuid,
) -> Result<(), AppError> {
    existing_job(jobs, job_id).await?;

    if !applications.save_job(candidate_id, job_id).await? {
        return Err(AppError::Conflict("Job already saved".to_string()));
    }
    info!("Candidate {candidate_id} saved job {job_id}");
    Ok(())
}

pub async fn unsave_job(
    applications: &dyn ApplicationStore,
    candidate_id: &str,
    job_id: Uuid,
) -> Result<(), AppError> {
    if !applications.unsave_job(candidate_id, job_id).await? {
        return Err(AppError::NotFound(format!("Job {job_id} is not saved")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applications::testing::MemoryApplicationStore;
    use crate::search::testing::{titled, MemoryJobStore};

    #[tokio::test]
    async fn test_duplicate_save_conflicts_and_keeps_one_row() {
        let job = titled("Rust Engineer");
        let job_id = job.id;
        let jobs = MemoryJobStore::with_jobs(vec![job]);
        let apps = MemoryApplicationStore::default();

        save_job(&jobs, &apps, "cand-1", job_id).await.unwrap();
        let err = save_job(&jobs, &apps, "cand-1", job_id).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(apps.saved_by("cand-1").len(), 1);
    }

    #[tokio::test]
    async fn test_saves_are_per_candidate() {
        let job = titled("Rust Engineer");
        let job_id = job.id;
        let jobs = MemoryJobStore::with_jobs(vec![job]);
        let apps = MemoryApplicationStore::default();

        save_job(&jobs, &apps, "cand-1", job_id).await.unwrap();
        save_job(&jobs, &apps, "cand-2", job_id).await.unwrap();
        unsave_job(&apps, "cand-1", job_id).await.unwrap();

        assert!(apps.saved_by("cand-1").is_empty());
        assert_eq!(apps.saved_by("cand-2").len(), 1);
    }

    #[tokio::test]
    async fn test_unsave_of_unsaved_job_is_not_found() {
        let apps = MemoryApplicationStore::default();
        let err = unsave_job(&apps, "cand-1", Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_saving_missing_job_is_not_found() {
        let jobs = MemoryJobStore::default();
        let apps = MemoryApplicationStore::default();
        let err = save_job(&jobs, &apps, "cand-1", Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(apps.saved_by("cand-1").is_empty());
    }
}
