// [apps/api/src/state.rs]
/*!
 * APARATO: API SHARED STATE
 * RESPONSABILIDAD: COMPOSICIÓN DE LOS COMPONENTES DE LECTURA
 *
 * The read surface never touches the cursor or the worker state machine —
 * those belong to `apps/crawler`. It shares the same storage handles so
 * `/status` reflects whatever `apps/crawler` processes are doing.
 */

use catalog_core_ratelimit::RateLimiter;
use catalog_core_registry::ActiveSearchRegistry;
use catalog_core_tokens::TokenCache;
use catalog_domain_models::CrawlerConfig;
use catalog_infra_db::{ArtistRepository, CompletionRepository};
use catalog_infra_spotify_client::SearchEndpoint;
use std::sync::Arc;

#[derive(Clone)]
pub struct ApiState {
    pub config: Arc<CrawlerConfig>,
    pub rate_limiter: Arc<RateLimiter>,
    pub registry: Arc<ActiveSearchRegistry>,
    pub tokens: Arc<TokenCache>,
    pub artists: Arc<ArtistRepository>,
    pub completions: Arc<CompletionRepository>,
    pub search_endpoint: Arc<dyn SearchEndpoint>,
}
