// [apps/api/src/handlers/search.rs]
/*!
 * APARATO: SEARCH PASSTHROUGH HANDLER
 * RESPONSABILIDAD: GET /search, UN SALTO DIRECTO AL BUSCADOR VÍA C1/C3
 */

use crate::errors::ApiError;
use crate::state::ApiState;
use axum::extract::{Query, State};
use axum::Json;
use catalog_domain_models::Artist;
use catalog_infra_spotify_client::SpotifyClientError;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

const PAGE_LIMIT: u32 = 50;
const PAGINATION_HARD_CAP_OFFSET: u32 = 950;

#[derive(Deserialize)]
pub struct SearchQuery {
    q: String,
    offset: Option<u32>,
}

#[derive(Serialize)]
pub struct SearchResponse {
    artists: Vec<Artist>,
}

#[instrument(skip(state))]
pub async fn search(
    State(state): State<ApiState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    if params.q.trim().is_empty() {
        return Err(ApiError::Validation("q must not be empty".to_string()));
    }

    let offset = params.offset.unwrap_or(0);
    if offset > PAGINATION_HARD_CAP_OFFSET {
        return Err(ApiError::Validation(format!(
            "offset must not exceed {PAGINATION_HARD_CAP_OFFSET}"
        )));
    }

    let limit = PAGE_LIMIT;

    let admitted = state
        .rate_limiter
        .try_admit(&params.q, offset, limit)
        .await
        .map_err(|e| ApiError::Storage(e.to_string()))?;

    if !admitted {
        let eta = state
            .rate_limiter
            .next_slot_eta()
            .await
            .map_err(|e| ApiError::Storage(e.to_string()))?;
        return Err(ApiError::RateLimited {
            retry_after_secs: eta.as_secs(),
        });
    }

    let token = state
        .tokens
        .get_token()
        .await
        .map_err(|e| ApiError::Auth(e.to_string()))?;

    let page = state
        .search_endpoint
        .search(&params.q, limit, offset, &token)
        .await
        .map_err(|e| match e {
            SpotifyClientError::UpstreamRejected { status, .. } => ApiError::Upstream { status },
            other => {
                warn!("search passthrough: non-rejection upstream failure: {}", other);
                ApiError::Upstream { status: 502 }
            }
        })?;

    Ok(Json(SearchResponse {
        artists: page.artists,
    }))
}
