// [apps/crawler/src/state.rs]
/*!
 * APARATO: CRAWLER SHARED STATE
 * RESPONSABILIDAD: COMPOSICIÓN DE LOS CINCO COMPONENTES DEL NÚCLEO
 */

use crate::seed::CompletionSeed;
use catalog_core_cursor::CursorState;
use catalog_core_ratelimit::RateLimiter;
use catalog_core_registry::ActiveSearchRegistry;
use catalog_core_tokens::TokenCache;
use catalog_domain_models::CrawlerConfig;
use catalog_infra_db::{ArtistRepository, CompletionRepository};
use catalog_infra_spotify_client::SearchEndpoint;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<CrawlerConfig>,
    pub rate_limiter: Arc<RateLimiter>,
    pub registry: Arc<ActiveSearchRegistry>,
    pub tokens: Arc<TokenCache>,
    pub cursor: Arc<CursorState<CompletionSeed>>,
    pub artists: Arc<ArtistRepository>,
    pub completions: Arc<CompletionRepository>,
    pub search_endpoint: Arc<dyn SearchEndpoint>,
}
