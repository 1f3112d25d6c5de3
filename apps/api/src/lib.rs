// [apps/api/src/lib.rs]
pub mod errors;
pub mod handlers;
pub mod routes;
pub mod state;

pub use state::ApiState;
