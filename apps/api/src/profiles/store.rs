use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::profile::CandidateProfile;

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_profile(&self, user_id: &str) -> Result<Option<CandidateProfile>, AppError>;

    /// Inserts or replaces the user's profile.
    async fn put_profile(
        &self,
        user_id: &str,
        profile: &CandidateProfile,
        updated_at: DateTime<Utc>,
    ) -> Result<(), AppError>;
}

pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn get_profile(&self, user_id: &str) -> Result<Option<CandidateProfile>, AppError> {
        let profile = sqlx::query_scalar::<_, Json<CandidateProfile>>(
            "SELECT data FROM profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(profile.map(|Json(p)| p))
    }

    async fn put_profile(
        &self,
        user_id: &str,
        profile: &CandidateProfile,
        updated_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO profiles (user_id, data, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO UPDATE
                SET data = EXCLUDED.data, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(user_id)
        .bind(Json(profile))
        .bind(updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
