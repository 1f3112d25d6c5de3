// [apps/crawler/src/lib.rs]
pub mod errors;
pub mod kernel;
pub mod scheduler;
pub mod seed;
pub mod services;
pub mod state;
pub mod worker;

pub use kernel::CrawlerKernel;
pub use state::AppState;
