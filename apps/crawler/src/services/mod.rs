// [apps/crawler/src/services/mod.rs]
pub mod stale_sweep;
