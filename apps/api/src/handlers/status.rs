// [apps/api/src/handlers/status.rs]
/*!
 * APARATO: STATUS SNAPSHOT HANDLER
 * RESPONSABILIDAD: GET /status, FOTOGRAFÍA AGREGADA DEL NÚCLEO
 *
 * Each field is fetched independently and degrades to an empty/zero value
 * on its own storage failure rather than failing the whole response — a
 * dashboard showing three fields and a blank fourth is more useful than no
 * dashboard at all.
 */

use crate::state::ApiState;
use axum::extract::State;
use axum::Json;
use catalog_domain_models::{RateLimitInfo, WindowRequest};
use serde::Serialize;
use tracing::{instrument, warn};

#[derive(Serialize)]
pub struct StatusResponse {
    active_searches: Vec<String>,
    rate_limit: Option<RateLimitInfo>,
    window_requests: Vec<WindowRequest>,
    completions_recorded: i64,
    artists_discovered: i64,
}

#[instrument(skip(state))]
pub async fn status(State(state): State<ApiState>) -> Json<StatusResponse> {
    let active_searches = state.registry.members().await.unwrap_or_else(|e| {
        warn!("status: failed to read active searches: {}", e);
        Vec::new()
    });

    let rate_limit = match state.rate_limiter.rate_limit_info().await {
        Ok(info) => Some(info),
        Err(e) => {
            warn!("status: failed to read rate limit info: {}", e);
            None
        }
    };

    let window_requests = state.rate_limiter.window_requests().await.unwrap_or_else(|e| {
        warn!("status: failed to read window requests: {}", e);
        Vec::new()
    });

    let completions_recorded = state.completions.count().await.unwrap_or_else(|e| {
        warn!("status: failed to count completions: {}", e);
        0
    });

    let artists_discovered = state.artists.count().await.unwrap_or_else(|e| {
        warn!("status: failed to count artists: {}", e);
        0
    });

    Json(StatusResponse {
        active_searches,
        rate_limit,
        window_requests,
        completions_recorded,
        artists_discovered,
    })
}
