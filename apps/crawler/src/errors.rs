// [apps/crawler/src/errors.rs]
/*!
 * APARATO: SEARCH WORKER ERROR CATALOG
 * RESPONSABILIDAD: TAXONOMÍA DE FALLOS DEL ESTADO C5
 */

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("storage error: {0}")]
    Storage(String),
    #[error("auth failure: {0}")]
    AuthFailure(String),
    #[error("transient upstream error: {0}")]
    TransientUpstream(String),
    #[error("rate limited by upstream, retry after {0:?}")]
    RateLimited(Duration),
}
