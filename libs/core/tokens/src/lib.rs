// [libs/core/tokens/src/lib.rs]
/*!
 * APARATO: TOKEN CACHE (C3)
 * CLASIFICACIÓN: CORE COORDINATION (ESTRATO L1)
 * RESPONSABILIDAD: CACHEADO COMPARTIDO DEL BEARER TOKEN
 *
 * Holds one current OAuth2 bearer token in shared storage so every
 * process reuses it. `SPOTIFY_BEARER_TOKEN` bypasses the provider
 * entirely, matching `_get_token`'s static-override branch in the
 * original source.
 */

pub mod errors;
pub mod provider;

use catalog_domain_models::CachedToken;
use catalog_infra_kv::KvClient;
use redis::AsyncCommands;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::instrument;

pub use errors::TokenError;
pub use provider::TokenProvider;

const TOKEN_KEY: &str = "spotify:auth:token";
const EXPIRY_GUARD_BAND_SECS: f64 = 300.0;

pub struct TokenCache {
    kv: KvClient,
    provider: Arc<dyn TokenProvider>,
    static_override: Option<String>,
}

impl TokenCache {
    pub fn new(kv: KvClient, provider: Arc<dyn TokenProvider>, static_override: Option<String>) -> Self {
        Self {
            kv,
            provider,
            static_override,
        }
    }

    /// Returns a valid bearer token, refreshing from the provider on a
    /// cache miss or near-expiry. Concurrent refreshes are tolerated:
    /// last-writer-wins is safe because both tokens are valid.
    #[instrument(skip(self))]
    pub async fn get_token(&self) -> Result<String, TokenError> {
        if let Some(token) = &self.static_override {
            return Ok(token.clone());
        }

        let mut conn = self.kv.manager();
        let cached: Option<String> = conn.get(TOKEN_KEY).await?;

        if let Some(raw) = cached {
            let token: CachedToken =
                serde_json::from_str(&raw).map_err(|e| TokenError::Mapping(e.to_string()))?;
            if now_secs() < token.expires_at - EXPIRY_GUARD_BAND_SECS {
                return Ok(token.access_token);
            }
        }

        let fresh = self.provider.fetch_token().await?;
        let ttl = (fresh.expires_in as i64 - EXPIRY_GUARD_BAND_SECS as i64).max(1) as u64;
        let payload = serde_json::to_string(&fresh).map_err(|e| TokenError::Mapping(e.to_string()))?;

        let _: () = conn.set_ex(TOKEN_KEY, payload, ttl).await?;

        Ok(fresh.access_token)
    }
}

fn now_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before epoch")
        .as_secs_f64()
}
