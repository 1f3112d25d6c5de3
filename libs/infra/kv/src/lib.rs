// [libs/infra/kv/src/lib.rs]
/*!
 * APARATO: SHARED KV LIBRARY BARREL
 * CLASIFICACIÓN: INFRASTRUCTURE LIB (ESTRATO L3)
 */

pub mod client;
pub mod errors;

pub use client::KvClient;
pub use errors::KvError;
