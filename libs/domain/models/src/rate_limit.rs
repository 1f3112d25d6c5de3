// [libs/domain/models/src/rate_limit.rs]
/*!
 * APARATO: RATE LIMIT OBSERVABILITY MODELS
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: REPRESENTACIÓN DE VENTANA DESLIZANTE
 */

use serde::{Deserialize, Serialize};

/// Metadata attached to one admitted request, carried for observability
/// only — never consulted by the admission logic itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WindowRequest {
    pub prefix: String,
    pub offset: u32,
    pub limit: u32,
    pub timestamp: f64,
    pub artists_found: Option<u32>,
}

/// Snapshot of the sliding window's current occupancy, for the `/status`
/// read surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RateLimitInfo {
    pub window_size: u64,
    pub current_requests: u64,
    pub max_requests: u64,
    pub remaining_requests: u64,
    pub time_until_next_request: f64,
    pub window_start: f64,
    pub window_end: f64,
}
