//! In-memory `JobStore` and record builders shared by search tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::JobRecord;
use crate::search::store::JobStore;

#[derive(Default)]
pub struct MemoryJobStore {
    jobs: Mutex<Vec<JobRecord>>,
    fail: AtomicBool,
    list_calls: AtomicUsize,
    last_limit: Mutex<Option<i64>>,
}

impl MemoryJobStore {
    pub fn with_jobs(jobs: Vec<JobRecord>) -> Self {
        Self {
            jobs: Mutex::new(jobs),
            ..Self::default()
        }
    }

    pub fn set_jobs(&self, jobs: Vec<JobRecord>) {
        *self.jobs.lock().unwrap() = jobs;
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn last_limit(&self) -> Option<i64> {
        *self.last_limit.lock().unwrap()
    }

    pub fn jobs(&self) -> Vec<JobRecord> {
        self.jobs.lock().unwrap().clone()
    }

    pub fn job(&self, id: Uuid) -> Option<JobRecord> {
        self.jobs().into_iter().find(|j| j.id == id)
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn list_jobs(&self, limit: Option<i64>) -> Result<Vec<JobRecord>, AppError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_limit.lock().unwrap() = limit;
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Internal(anyhow::anyhow!("store unavailable")));
        }
        let jobs = self.jobs.lock().unwrap();
        let take = limit.map(|l| l.max(0) as usize).unwrap_or(jobs.len());
        Ok(jobs.iter().take(take).cloned().collect())
    }

    async fn get_job(&self, id: Uuid) -> Result<Option<JobRecord>, AppError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Internal(anyhow::anyhow!("store unavailable")));
        }
        Ok(self.jobs.lock().unwrap().iter().find(|j| j.id == id).cloned())
    }

    async fn insert_job(&self, id: Uuid, employer_id: &str, doc: &Value) -> Result<(), AppError> {
        let job = JobRecord::from_document(id, Some(employer_id.to_string()), Some(Utc::now()), doc);
        self.jobs.lock().unwrap().insert(0, job);
        Ok(())
    }

    async fn update_job(&self, id: Uuid, patch: &Value) -> Result<bool, AppError> {
        let mut jobs = self.jobs.lock().unwrap();
        let Some(job) = jobs.iter_mut().find(|j| j.id == id) else {
            return Ok(false);
        };
        // Round-trip through the document form, as the database does.
        let mut doc = serde_json::to_value(&*job).unwrap();
        if let (Some(stored), Some(changes)) = (doc.as_object_mut(), patch.as_object()) {
            for (key, value) in changes {
                stored.insert(key.clone(), value.clone());
            }
        }
        *job = JobRecord::from_document(id, job.employer_id.clone(), job.created_at, &doc);
        Ok(true)
    }

    async fn delete_job(&self, id: Uuid) -> Result<bool, AppError> {
        let mut jobs = self.jobs.lock().unwrap();
        let before = jobs.len();
        jobs.retain(|j| j.id != id);
        Ok(jobs.len() < before)
    }
}

pub fn doc_job(doc: Value) -> JobRecord {
    JobRecord::from_document(Uuid::new_v4(), None, None, &doc)
}

pub fn titled(title: &str) -> JobRecord {
    doc_job(json!({ "title": title }))
}

pub fn located(title: &str, location: &str) -> JobRecord {
    doc_job(json!({ "title": title, "location": location }))
}
