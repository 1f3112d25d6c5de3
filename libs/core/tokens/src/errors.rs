// [libs/core/tokens/src/errors.rs]
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("[L1_TOKEN_FAULT]: STORAGE_UNAVAILABLE -> {0}")]
    Storage(#[from] catalog_infra_kv::KvError),

    #[error("[L1_TOKEN_FAULT]: REDIS_COMMAND_REJECTED -> {0}")]
    Command(#[from] redis::RedisError),

    #[error("[L1_TOKEN_FAULT]: MAPPING_VIOLATION -> {0}")]
    Mapping(String),

    #[error("[L1_TOKEN_FAULT]: PROVIDER_REJECTED -> {0}")]
    Provider(String),
}
