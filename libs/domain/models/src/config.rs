// [libs/domain/models/src/config.rs]
/*!
 * APARATO: CRAWLER CONFIGURATION
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: CENTRALIZACIÓN DE PARÁMETROS DE ENTORNO
 *
 * Parsed once at process start. Callers read fields off the struct
 * instead of scattering `env::var` lookups through the worker and
 * scheduler code.
 */

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_MAX_WORKERS: u32 = 10;
const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 30;
const DEFAULT_RATE_LIMIT_MAX: u64 = 10;
const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 300;
const DEFAULT_SCHEDULER_TICK_SECS: u64 = 5;
const HARD_MAX_WORKERS_CAP: u32 = 10;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("environment variable {0} is not a valid {1}: {2}")]
    Invalid(&'static str, &'static str, String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    pub spotify_client_id: String,
    pub spotify_client_secret: String,
    /// Optional static bearer token override; when present, the token
    /// cache bypasses the token endpoint entirely.
    pub spotify_bearer_token: Option<String>,
    pub redis_url: String,
    pub database_url: String,
    pub database_auth_token: Option<String>,
    /// Hard-capped at `HARD_MAX_WORKERS_CAP` to match the provider budget.
    pub max_workers: u32,
    pub rate_limit_window: Duration,
    pub rate_limit_max: u64,
    pub search_timeout: Duration,
    pub scheduler_tick_period: Duration,
}

impl CrawlerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let spotify_client_id = required("SPOTIFY_CLIENT_ID")?;
        let spotify_client_secret = required("SPOTIFY_CLIENT_SECRET")?;
        let spotify_bearer_token = env::var("SPOTIFY_BEARER_TOKEN").ok();
        let redis_url = required("REDIS_URL")?;
        let database_url = required("DATABASE_URL")?;
        let database_auth_token = env::var("DATABASE_AUTH_TOKEN").ok();

        let max_workers = optional_u32("MAX_WORKERS", DEFAULT_MAX_WORKERS)?.min(HARD_MAX_WORKERS_CAP);
        let rate_limit_window =
            Duration::from_secs(optional_u64("RATE_LIMIT_WINDOW", DEFAULT_RATE_LIMIT_WINDOW_SECS)?);
        let rate_limit_max = optional_u64("RATE_LIMIT_MAX", DEFAULT_RATE_LIMIT_MAX)?;
        let search_timeout =
            Duration::from_secs(optional_u64("SEARCH_TIMEOUT", DEFAULT_SEARCH_TIMEOUT_SECS)?);
        let scheduler_tick_period =
            Duration::from_secs(optional_u64("SCHEDULER_TICK_SECONDS", DEFAULT_SCHEDULER_TICK_SECS)?);

        Ok(Self {
            spotify_client_id,
            spotify_client_secret,
            spotify_bearer_token,
            redis_url,
            database_url,
            database_auth_token,
            max_workers,
            rate_limit_window,
            rate_limit_max,
            search_timeout,
            scheduler_tick_period,
        })
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::Missing(key))
}

fn optional_u32(key: &'static str, default: u32) -> Result<u32, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .parse::<u32>()
            .map_err(|e| ConfigError::Invalid(key, "u32", e.to_string())),
        Err(_) => Ok(default),
    }
}

fn optional_u64(key: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .parse::<u64>()
            .map_err(|e| ConfigError::Invalid(key, "u64", e.to_string())),
        Err(_) => Ok(default),
    }
}
