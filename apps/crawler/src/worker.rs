// [apps/crawler/src/worker.rs]
/*!
 * APARATO: SEARCH WORKER STATE MACHINE (C5)
 * RESPONSABILIDAD: PAGINAR, PERSISTIR, COMPLETAR Y ENCADENAR UN PREFIJO
 *
 * START → CHECK_DONE → PAGINATE_LOOP → RECORD → CHAIN → END, with any
 * state falling through to FAIL_CLEANUP on error. The dispatcher has
 * already registered the prefix in the active search registry (C2)
 * before spawning this task.
 */

use crate::errors::WorkerError;
use crate::state::AppState;
use catalog_domain_models::Prefix;
use catalog_infra_spotify_client::{SearchPage, SpotifyClientError};
use rand::Rng;
use std::time::Duration;
use tracing::{info, instrument, warn};

const PAGE_LIMIT: u32 = 50;
const PAGINATION_HARD_CAP_OFFSET: u32 = 950;
const MAX_429_RETRIES: u32 = 5;
const MAX_BACKOFF_SECS: f64 = 300.0;
const UNREGISTER_MAX_ATTEMPTS: u32 = 5;

#[instrument(skip(state))]
pub async fn run_worker(state: AppState, prefix: Prefix) {
    let query = prefix.into_inner();
    info!("worker START for '{}'", query);

    if let Err(e) = drive(&state, &query).await {
        warn!("worker for '{}' failed, entering FAIL_CLEANUP: {}", query, e);
        fail_cleanup(&state, &query).await;
    }
}

async fn drive(state: &AppState, query: &str) -> Result<(), WorkerError> {
    if state
        .completions
        .find(query)
        .await
        .map_err(|e| WorkerError::Storage(e.to_string()))?
        .is_some()
    {
        info!("'{}' already completed, chaining without calling upstream", query);
        state
            .registry
            .unregister(query)
            .await
            .map_err(|e| WorkerError::Storage(e.to_string()))?;
        chain(state).await;
        return Ok(());
    }

    let mut retries = 0u32;
    loop {
        match paginate(state, query).await {
            Ok(artists_found) => {
                state
                    .completions
                    .record(query, artists_found)
                    .await
                    .map_err(|e| WorkerError::Storage(e.to_string()))?;

                state
                    .registry
                    .unregister(query)
                    .await
                    .map_err(|e| WorkerError::Storage(e.to_string()))?;

                chain(state).await;
                return Ok(());
            }
            Err(WorkerError::RateLimited(retry_after)) => {
                if retries >= MAX_429_RETRIES {
                    return Err(WorkerError::TransientUpstream(
                        "429 retry budget exhausted".to_string(),
                    ));
                }

                warn!("'{}' rate-limited by upstream, backing off", query);
                state
                    .registry
                    .unregister(query)
                    .await
                    .map_err(|e| WorkerError::Storage(e.to_string()))?;

                tokio::time::sleep(jittered_backoff(retries, retry_after)).await;
                retries += 1;
            }
            Err(other) => return Err(other),
        }
    }
}

/// Walks pages from offset 0 until a short page, an empty page, or the
/// hard provider cap at offset 950. Restarting here always begins at
/// offset 0 — safe because both the artist upsert and the completion
/// insert are idempotent.
async fn paginate(state: &AppState, query: &str) -> Result<u32, WorkerError> {
    let mut offset = 0u32;
    let mut artists_found = 0u32;

    loop {
        let page = fetch_page(state, query, offset).await?;
        let count = page.artists.len() as u32;

        if !page.artists.is_empty() {
            state
                .artists
                .upsert_batch(&page.artists)
                .await
                .map_err(|e| WorkerError::Storage(e.to_string()))?;
        }

        artists_found += count;
        state.rate_limiter.update_found(query, offset, count).await;

        if should_stop_pagination(offset, count) {
            break;
        }
        offset += PAGE_LIMIT;
    }

    Ok(artists_found)
}

/// True once a page is short/empty (end of results) or one more page
/// would start past the provider's hard offset cap.
fn should_stop_pagination(offset: u32, count: u32) -> bool {
    count < PAGE_LIMIT || offset + PAGE_LIMIT > PAGINATION_HARD_CAP_OFFSET
}

/// Gates one upstream call through C1, signs it with a C3 token, and
/// classifies the result. The rate-limit admit loop is the only place a
/// worker sleeps waiting for capacity, bounded by `next_slot_eta`.
async fn fetch_page(state: &AppState, query: &str, offset: u32) -> Result<SearchPage, WorkerError> {
    loop {
        let admitted = state
            .rate_limiter
            .try_admit(query, offset, PAGE_LIMIT)
            .await
            .map_err(|e| WorkerError::Storage(e.to_string()))?;

        if admitted {
            break;
        }

        let eta = state
            .rate_limiter
            .next_slot_eta()
            .await
            .map_err(|e| WorkerError::Storage(e.to_string()))?;

        tokio::time::sleep(eta + Duration::from_millis(10)).await;
    }

    let token = state
        .tokens
        .get_token()
        .await
        .map_err(|e| WorkerError::AuthFailure(e.to_string()))?;

    match state
        .search_endpoint
        .search(query, PAGE_LIMIT, offset, &token)
        .await
    {
        Ok(page) => Ok(page),
        Err(SpotifyClientError::UpstreamRejected {
            status: 429,
            retry_after,
        }) => Err(WorkerError::RateLimited(Duration::from_secs(
            retry_after.unwrap_or(30),
        ))),
        Err(other) => Err(WorkerError::TransientUpstream(other.to_string())),
    }
}

/// Exactly one chain per completion: if the registry has room, pull one
/// fresh prefix from the cursor and dispatch a worker for it.
async fn chain(state: &AppState) {
    let count = match state.registry.count().await {
        Ok(count) => count,
        Err(e) => {
            warn!("chain: failed to read registry count: {}", e);
            return;
        }
    };

    if count >= state.config.max_workers {
        return;
    }

    let batch = match state.cursor.generate_batch(1).await {
        Ok(batch) => batch,
        Err(e) => {
            warn!("chain: cursor generation failed: {}", e);
            return;
        }
    };

    let Some(next_prefix) = batch.into_iter().next() else {
        return;
    };

    match state.registry.try_register(next_prefix.as_str()).await {
        Ok(true) => {
            info!("chained '{}'", next_prefix);
            tokio::spawn(run_worker(state.clone(), next_prefix));
        }
        Ok(false) => {
            // Registry filled between the count check and this register;
            // the next scheduler tick will pick the prefix back up since
            // the cursor has already advanced past it. Tolerated per the
            // documented stale-eviction limitation.
        }
        Err(e) => warn!("chain: failed to register '{}': {}", next_prefix, e),
    }
}

/// The active-registry counterpart to FAIL_CLEANUP: retries the
/// unregister with capped exponential backoff, then still attempts one
/// chain so a single failure doesn't stall the whole pipeline.
async fn fail_cleanup(state: &AppState, query: &str) {
    let mut attempt = 0u32;
    loop {
        match state.registry.unregister(query).await {
            Ok(()) => break,
            Err(e) => {
                attempt += 1;
                if attempt >= UNREGISTER_MAX_ATTEMPTS {
                    warn!(
                        "FAIL_CLEANUP: giving up unregistering '{}' after {} attempts: {}",
                        query, attempt, e
                    );
                    break;
                }
                let backoff = Duration::from_secs_f64(2f64.powi(attempt as i32).min(30.0));
                tokio::time::sleep(backoff).await;
            }
        }
    }

    chain(state).await;
}

fn jittered_backoff(retries: u32, retry_after: Duration) -> Duration {
    let base = retry_after.as_secs_f64() * 2f64.powi(retries as i32);
    let capped = base.min(MAX_BACKOFF_SECS);
    let jitter = rand::thread_rng().gen_range(0.0..capped * 0.1);
    Duration::from_secs_f64(capped + jitter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s5_short_page_stops_without_issuing_next_offset() {
        assert!(should_stop_pagination(0, 30));
    }

    #[test]
    fn s6_full_pages_continue_until_offset_950() {
        for offset in (0..950).step_by(50) {
            assert!(!should_stop_pagination(offset, PAGE_LIMIT));
        }
        assert!(should_stop_pagination(950, PAGE_LIMIT));
    }

    #[test]
    fn empty_page_stops_pagination() {
        assert!(should_stop_pagination(200, 0));
    }

    #[test]
    fn backoff_never_exceeds_cap_plus_ten_percent_jitter() {
        for retries in 0..8 {
            let backoff = jittered_backoff(retries, Duration::from_secs(2));
            assert!(backoff.as_secs_f64() <= MAX_BACKOFF_SECS * 1.1);
        }
    }

    #[test]
    fn backoff_grows_with_retry_count_before_capping() {
        let first = jittered_backoff(0, Duration::from_secs(2));
        let second = jittered_backoff(1, Duration::from_secs(2));
        assert!(second.as_secs_f64() >= first.as_secs_f64());
    }
}
