mod applications;
mod ats;
mod auth;
mod companies;
mod config;
mod db;
mod enrich;
mod errors;
mod llm_client;
mod models;
mod postings;
mod profiles;
mod routes;
mod search;
mod state;
mod uploads;

use anyhow::{Context, Result};
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::applications::store::PgApplicationStore;
use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::llm_client::LlmClient;
use crate::profiles::store::PgProfileStore;
use crate::routes::build_router;
use crate::search::cache::SnapshotCache;
use crate::search::debounce::Debouncer;
use crate::search::store::PgJobStore;
use crate::state::AppState;

/// Timeout for outbound calls that are not completion calls (logo lookups).
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting job board API v{}", env!("CARGO_PKG_VERSION"));

    if config.identity_secret.is_none() {
        warn!("IDENTITY_SHARED_SECRET not set; x-user-* headers are trusted from any caller");
    }

    let db = create_pool(&config.database_url).await?;
    ensure_schema(&db).await?;

    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized (bucket: {})", config.s3_bucket);

    let llm = match &config.gemini_api_key {
        Some(key) => {
            let client = LlmClient::new(
                key.clone(),
                config.llm_api_base.clone(),
                config.llm_model.clone(),
                config.llm_timeout,
            )
            .context("Failed to build LLM client")?;
            info!("LLM client initialized (model: {})", client.model());
            Some(client)
        }
        None => {
            warn!("GEMINI_API_KEY not set; resume analysis is disabled");
            None
        }
    };

    let http = reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")?;

    let jobs = Arc::new(PgJobStore::new(db.clone()));
    let applications = Arc::new(PgApplicationStore::new(db.clone()));
    let profiles = Arc::new(PgProfileStore::new(db.clone()));
    let snapshot = Arc::new(SnapshotCache::from_config(jobs.clone(), &config.search));
    let debouncer = Arc::new(Debouncer::new(config.search.debounce));
    info!(
        "Search cache: freshness {:?}, fetch limit {}, debounce {:?}",
        config.search.cache_ttl, config.search.cache_fetch_limit, config.search.debounce
    );

    let state = AppState {
        db,
        s3,
        http,
        llm,
        config: config.clone(),
        jobs,
        applications,
        profiles,
        snapshot,
        debouncer,
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()), // TODO: restrict origins once the web client's domain is fixed
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "jobboard-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
