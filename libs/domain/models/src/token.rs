// [libs/domain/models/src/token.rs]
/*!
 * APARATO: TOKEN DOMAIN MODEL
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: REPRESENTACIÓN DEL BEARER TOKEN CACHEADO
 */

use serde::{Deserialize, Serialize};

/// The cached OAuth2 client-credentials token, as stored under
/// `spotify:auth:token` with TTL = `expires_in - 300`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CachedToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    /// Unix timestamp (seconds) at which the token is considered expired
    /// for the purposes of `get_token`'s 5-minute guard band.
    pub expires_at: f64,
}
