// [libs/core/tokens/src/provider.rs]
/*!
 * APARATO: TOKEN PROVIDER INTERFACE
 * CLASIFICACIÓN: CORE COORDINATION (ESTRATO L1)
 * RESPONSABILIDAD: CONTRATO DE AUTENTICACIÓN OAUTH2 (EXTERNAL COLLABORATOR)
 *
 * The OAuth2 client-credentials dance against the real token endpoint is
 * out of scope for the coordination core; this trait is the seam a
 * concrete HTTP implementation plugs into (see
 * `catalog-infra-spotify-client`).
 */

use async_trait::async_trait;
use catalog_domain_models::CachedToken;

#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Fetches a fresh token from the upstream auth endpoint. Any failure
    /// here must propagate — the caller's request is never attempted.
    async fn fetch_token(&self) -> Result<CachedToken, crate::errors::TokenError>;
}
