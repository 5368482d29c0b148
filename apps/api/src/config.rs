use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_LLM_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    /// Resume analysis is disabled (503) when unset.
    pub gemini_api_key: Option<String>,
    /// When set, identity headers are only trusted alongside this secret.
    pub identity_secret: Option<String>,
    pub llm_api_base: String,
    pub llm_model: String,
    pub llm_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
    pub search: SearchConfig,
}

/// Tunables for the suggestion snapshot cache and the debouncer.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    pub cache_ttl: Duration,
    pub cache_fetch_limit: u32,
    pub debounce: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(5 * 60),
            cache_fetch_limit: 500,
            debounce: Duration::from_millis(300),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("Required environment variable '{key}' is not set"))
        };
        let defaults = SearchConfig::default();

        Ok(Config {
            database_url: require("DATABASE_URL")?,
            s3_bucket: require("S3_BUCKET")?,
            s3_endpoint: require("S3_ENDPOINT")?,
            aws_access_key_id: require("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require("AWS_SECRET_ACCESS_KEY")?,
            gemini_api_key: lookup("GEMINI_API_KEY").filter(|k| !k.trim().is_empty()),
            identity_secret: lookup("IDENTITY_SHARED_SECRET").filter(|k| !k.trim().is_empty()),
            llm_api_base: lookup("LLM_API_BASE")
                .unwrap_or_else(|| DEFAULT_LLM_API_BASE.to_string()),
            llm_model: lookup("LLM_MODEL")
                .unwrap_or_else(|| crate::llm_client::DEFAULT_MODEL.to_string()),
            llm_timeout: Duration::from_secs(parse_or(&lookup, "LLM_TIMEOUT_SECS", 120u64)?),
            port: parse_or(&lookup, "PORT", 8080u16)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            search: SearchConfig {
                cache_ttl: Duration::from_secs(parse_or(
                    &lookup,
                    "SEARCH_CACHE_TTL_SECS",
                    defaults.cache_ttl.as_secs(),
                )?),
                cache_fetch_limit: parse_or(
                    &lookup,
                    "SEARCH_CACHE_FETCH_LIMIT",
                    defaults.cache_fetch_limit,
                )?,
                debounce: Duration::from_millis(parse_or(
                    &lookup,
                    "SUGGEST_DEBOUNCE_MS",
                    defaults.debounce.as_millis() as u64,
                )?),
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
