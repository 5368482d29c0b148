use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Jobs are kept as JSONB documents: historical postings carry different
/// field names, and `JobRecord::from_document` reconciles them on read.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS jobs (
        id          UUID PRIMARY KEY,
        employer_id TEXT,
        data        JSONB NOT NULL DEFAULT '{}'::jsonb,
        created_at  TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS jobs_created_at_idx ON jobs (created_at DESC)",
    r#"
    CREATE TABLE IF NOT EXISTS applications (
        id           UUID PRIMARY KEY,
        job_id       UUID NOT NULL REFERENCES jobs(id) ON DELETE CASCADE,
        candidate_id TEXT NOT NULL,
        candidate_name  TEXT,
        candidate_email TEXT,
        job_title    TEXT,
        resume_url   TEXT,
        cover_letter TEXT,
        status       TEXT NOT NULL DEFAULT 'PENDING',
        created_at   TIMESTAMPTZ NOT NULL DEFAULT now(),
        UNIQUE (job_id, candidate_id)
    )
    "#,
    "ALTER TABLE applications ADD COLUMN IF NOT EXISTS candidate_name TEXT",
    "ALTER TABLE applications ADD COLUMN IF NOT EXISTS candidate_email TEXT",
    "ALTER TABLE applications ADD COLUMN IF NOT EXISTS job_title TEXT",
    r#"
    CREATE TABLE IF NOT EXISTS saved_jobs (
        candidate_id TEXT NOT NULL,
        job_id       UUID NOT NULL REFERENCES jobs(id) ON DELETE CASCADE,
        created_at   TIMESTAMPTZ NOT NULL DEFAULT now(),
        PRIMARY KEY (candidate_id, job_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS profiles (
        user_id    TEXT PRIMARY KEY,
        data       JSONB NOT NULL DEFAULT '{}'::jsonb,
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
];

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the job board tables if they do not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    info!("Database schema verified ({} statements)", SCHEMA.len());
    Ok(())
}
