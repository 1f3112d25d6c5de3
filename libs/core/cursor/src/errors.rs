// [libs/core/cursor/src/errors.rs]
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CursorError {
    #[error("[L1_CURSOR_FAULT]: SEED_LOOKUP_FAILED -> {0}")]
    Seed(String),
}
