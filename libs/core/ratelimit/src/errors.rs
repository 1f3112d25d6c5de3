// [libs/core/ratelimit/src/errors.rs]
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RateLimitError {
    #[error("[L1_RATE_FAULT]: STORAGE_UNAVAILABLE -> {0}")]
    Storage(#[from] catalog_infra_kv::KvError),
}
