// [apps/crawler/src/services/stale_sweep.rs]
/*!
 * APARATO: STALE SEARCH SWEEPER
 * RESPONSABILIDAD: LIBERACIÓN PERIÓDICA DE PREFIJOS HUÉRFANOS
 *
 * The registry evicts stale entries as a side effect of `members()`/
 * `count()`, but nothing guarantees either is called if no tick is
 * running. A dedicated low-frequency sweep keeps `active_searches`
 * honest even during quiet periods, mirroring the background hygiene
 * daemon pattern used elsewhere in this codebase for reclaiming
 * abandoned in-memory state.
 */

use crate::state::AppState;
use std::time::Duration;
use tokio::time::interval;
use tracing::warn;

const SWEEP_PERIOD: Duration = Duration::from_secs(60);

pub fn spawn(state: AppState) {
    tokio::spawn(async move {
        let mut ticker = interval(SWEEP_PERIOD);
        loop {
            ticker.tick().await;
            if let Err(e) = state.registry.count().await {
                warn!("stale sweep: registry unreachable: {}", e);
            }
        }
    });
}
