use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::applications::store::ApplicationStore;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::profiles::store::ProfileStore;
use crate::search::cache::SnapshotCache;
use crate::search::debounce::Debouncer;
use crate::search::store::JobStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    /// Plain HTTP client for logo lookups.
    pub http: reqwest::Client,
    /// `None` when no completion API key is configured.
    pub llm: Option<LlmClient>,
    pub config: Config,
    /// Read side of the job collection. Default: `PgJobStore` over `db`.
    pub jobs: Arc<dyn JobStore>,
    /// Applications and saved jobs. Default: `PgApplicationStore`.
    pub applications: Arc<dyn ApplicationStore>,
    /// Candidate profiles. Default: `PgProfileStore`.
    pub profiles: Arc<dyn ProfileStore>,
    /// Autocomplete snapshot. Reset after every write to `jobs`.
    pub snapshot: Arc<SnapshotCache>,
    pub debouncer: Arc<Debouncer>,
}
