use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::AppError;
use crate::models::profile::CandidateProfile;
use crate::profiles::store::ProfileStore;

#[derive(Default)]
pub struct MemoryProfileStore {
    profiles: Mutex<HashMap<String, CandidateProfile>>,
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn get_profile(&self, user_id: &str) -> Result<Option<CandidateProfile>, AppError> {
        Ok(self.profiles.lock().unwrap().get(user_id).cloned())
    }

    async fn put_profile(
        &self,
        user_id: &str,
        profile: &CandidateProfile,
        _updated_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        self.profiles
            .lock()
            .unwrap()
            .insert(user_id.to_string(), profile.clone());
        Ok(())
    }
}
