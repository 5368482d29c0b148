//! In-memory `ApplicationStore` for handler and workflow tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::applications::store::{ApplicationStore, NewApplication};
use crate::errors::AppError;
use crate::models::application::{
    ApplicationRow, ApplicationStatus, ApplicationWithJob, SavedJobRow,
};

#[derive(Default)]
pub struct MemoryApplicationStore {
    applications: Mutex<Vec<ApplicationRow>>,
    /// (candidate id, row)
    saved: Mutex<Vec<(String, SavedJobRow)>>,
}

impl MemoryApplicationStore {
    pub fn applications(&self) -> Vec<ApplicationRow> {
        self.applications.lock().unwrap().clone()
    }

    pub fn saved_by(&self, candidate_id: &str) -> Vec<SavedJobRow> {
        self.saved
            .lock()
            .unwrap()
            .iter()
            .filter(|(owner, _)| owner == candidate_id)
            .map(|(_, row)| row.clone())
            .collect()
    }
}

#[async_trait]
impl ApplicationStore for MemoryApplicationStore {
    async fn insert_application(
        &self,
        application: &NewApplication,
    ) -> Result<Option<ApplicationRow>, AppError> {
        let mut rows = self.applications.lock().unwrap();
        if rows
            .iter()
            .any(|r| r.job_id == application.job_id && r.candidate_id == application.candidate_id)
        {
            return Ok(None);
        }
        let row = ApplicationRow {
            id: application.id,
            job_id: application.job_id,
            candidate_id: application.candidate_id.clone(),
            candidate_name: application.candidate_name.clone(),
            candidate_email: application.candidate_email.clone(),
            job_title: application.job_title.clone(),
            resume_url: application.resume_url.clone(),
            cover_letter: application.cover_letter.clone(),
            status: ApplicationStatus::Pending.as_str().to_string(),
            created_at: Utc::now(),
        };
        rows.insert(0, row.clone());
        Ok(Some(row))
    }

    async fn get_application(&self, id: Uuid) -> Result<Option<ApplicationRow>, AppError> {
        Ok(self.applications().into_iter().find(|r| r.id == id))
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Option<ApplicationRow>, AppError> {
        let mut rows = self.applications.lock().unwrap();
        Ok(rows.iter_mut().find(|r| r.id == id).map(|row| {
            row.status = status.as_str().to_string();
            row.clone()
        }))
    }

    async fn applications_for_job(&self, job_id: Uuid) -> Result<Vec<ApplicationRow>, AppError> {
        Ok(self
            .applications()
            .into_iter()
            .filter(|r| r.job_id == job_id)
            .collect())
    }

    async fn applications_for_candidate(
        &self,
        candidate_id: &str,
    ) -> Result<Vec<ApplicationWithJob>, AppError> {
        Ok(self
            .applications()
            .into_iter()
            .filter(|r| r.candidate_id == candidate_id)
            .map(|r| ApplicationWithJob {
                id: r.id,
                job_id: r.job_id,
                status: r.status,
                created_at: r.created_at,
                job_title: r.job_title,
                company_name: None,
            })
            .collect())
    }

    async fn count_for_job(&self, job_id: Uuid) -> Result<i64, AppError> {
        Ok(self.applications_for_job(job_id).await?.len() as i64)
    }

    async fn has_applied(&self, job_id: Uuid, candidate_id: &str) -> Result<bool, AppError> {
        Ok(self
            .applications()
            .iter()
            .any(|r| r.job_id == job_id && r.candidate_id == candidate_id))
    }

    async fn save_job(&self, candidate_id: &str, job_id: Uuid) -> Result<bool, AppError> {
        let mut saved = self.saved.lock().unwrap();
        if saved
            .iter()
            .any(|(owner, row)| owner == candidate_id && row.job_id == job_id)
        {
            return Ok(false);
        }
        let row = SavedJobRow {
            job_id,
            created_at: Utc::now(),
            job_title: None,
        };
        saved.insert(0, (candidate_id.to_string(), row));
        Ok(true)
    }

    async fn unsave_job(&self, candidate_id: &str, job_id: Uuid) -> Result<bool, AppError> {
        let mut saved = self.saved.lock().unwrap();
        let before = saved.len();
        saved.retain(|(owner, row)| !(owner == candidate_id && row.job_id == job_id));
        Ok(saved.len() < before)
    }

    async fn saved_jobs(&self, candidate_id: &str) -> Result<Vec<SavedJobRow>, AppError> {
        Ok(self.saved_by(candidate_id))
    }

    async fn is_saved(&self, job_id: Uuid, candidate_id: &str) -> Result<bool, AppError> {
        Ok(self
            .saved_by(candidate_id)
            .iter()
            .any(|row| row.job_id == job_id))
    }
}
