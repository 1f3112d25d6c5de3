// [libs/infra/spotify-client/src/endpoint.rs]
/*!
 * APARATO: SEARCH ENDPOINT INTERFACE
 * RESPONSABILIDAD: CONTRATO DE TRANSPORTE HACIA EL BUSCADOR DE CATÁLOGO
 *
 * The transport to the upstream search provider is out of scope for the
 * coordination core's hard engineering — this trait is the seam. The
 * worker state machine (C5) gates calls through the rate limiter and
 * signs them with a token from the cache, then hands both to this trait;
 * it carries no rate-limit or auth logic of its own.
 */

use crate::errors::SpotifyClientError;
use async_trait::async_trait;
use catalog_domain_models::Artist;

pub struct SearchPage {
    pub artists: Vec<Artist>,
}

#[async_trait]
pub trait SearchEndpoint: Send + Sync {
    async fn search(
        &self,
        query: &str,
        limit: u32,
        offset: u32,
        bearer_token: &str,
    ) -> Result<SearchPage, SpotifyClientError>;
}
