// [libs/core/registry/src/errors.rs]
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("[L1_REGISTRY_FAULT]: STORAGE_UNAVAILABLE -> {0}")]
    Storage(#[from] catalog_infra_kv::KvError),

    #[error("[L1_REGISTRY_FAULT]: REDIS_COMMAND_REJECTED -> {0}")]
    Command(#[from] redis::RedisError),
}
