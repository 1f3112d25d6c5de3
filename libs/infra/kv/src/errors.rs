// [libs/infra/kv/src/errors.rs]
/*!
 * APARATO: SHARED KV ERROR CATALOG
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: CATALOGACIÓN SEMÁNTICA DE FALLOS DE REDIS
 */

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KvError {
    #[error("[L3_KV_NET_FAULT]: REDIS_UPLINK_SEVERED -> {0}")]
    ConnectionError(String),

    #[error("[L3_KV_COMMAND_FAULT]: REDIS_COMMAND_REJECTED -> {0}")]
    CommandError(#[from] redis::RedisError),

    #[error("[L3_KV_MAPPING_FAULT]: DATA_MAPPING_VIOLATION -> {0}")]
    MappingError(String),
}
