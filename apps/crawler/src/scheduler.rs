// [apps/crawler/src/scheduler.rs]
/*!
 * APARATO: SCHEDULER TICK
 * RESPONSABILIDAD: DESPACHO PERIÓDICO DE TRABAJADORES C5
 *
 * Every tick asks C2 for free capacity, asks C4 for that many prefixes,
 * and dispatches one worker per successful registration. Ticks are
 * idempotent and may overlap safely — a registration failure just means
 * the next tick reconsiders.
 */

use crate::state::AppState;
use crate::worker::run_worker;
use tracing::{info, instrument, warn};

#[instrument(skip(state))]
pub async fn tick(state: &AppState) {
    let active = match state.registry.count().await {
        Ok(count) => count,
        Err(e) => {
            warn!("scheduler tick: failed to read registry count: {}", e);
            return;
        }
    };

    let free = state.config.max_workers.saturating_sub(active);
    if free == 0 {
        return;
    }

    let batch = match state.cursor.generate_batch(free as usize).await {
        Ok(batch) => batch,
        Err(e) => {
            warn!("scheduler tick: cursor generation failed: {}", e);
            return;
        }
    };

    for prefix in batch {
        match state.registry.try_register(prefix.as_str()).await {
            Ok(true) => {
                info!("dispatching worker for '{}'", prefix);
                tokio::spawn(run_worker(state.clone(), prefix));
            }
            Ok(false) => {
                // Already registered by a concurrent process, or the
                // registry filled between the count check and now.
            }
            Err(e) => warn!("scheduler tick: failed to register '{}': {}", prefix, e),
        }
    }
}

pub fn spawn(state: AppState) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(state.config.scheduler_tick_period);
        loop {
            ticker.tick().await;
            tick(&state).await;
        }
    });
}
