// [apps/crawler/src/kernel.rs]
/*!
 * APARATO: CRAWLER KERNEL
 * RESPONSABILIDAD: COMPOSICIÓN DE INFRAESTRUCTURA E IGNICIÓN DE DAEMONS
 *
 * Connects storage, wires the five coordination components together,
 * and launches the scheduler tick plus the background maintenance
 * daemons. Mirrors the orchestrator's own ignite/launch split: nothing
 * observable happens until `launch` is called.
 */

use crate::scheduler;
use crate::seed::CompletionSeed;
use crate::services::stale_sweep;
use crate::state::AppState;
use catalog_core_cursor::CursorState;
use catalog_core_ratelimit::RateLimiter;
use catalog_core_registry::ActiveSearchRegistry;
use catalog_core_tokens::TokenCache;
use catalog_domain_models::CrawlerConfig;
use catalog_infra_db::{ArtistRepository, CompletionRepository, DbClient};
use catalog_infra_kv::KvClient;
use catalog_infra_spotify_client::SpotifyHttpClient;
use std::sync::Arc;
use tracing::{info, instrument};

const SPOTIFY_API_BASE: &str = "https://api.spotify.com/v1";
const SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/api/token";

pub struct CrawlerKernel {
    state: AppState,
}

impl CrawlerKernel {
    #[instrument(skip(config))]
    pub async fn ignite(config: CrawlerConfig) -> anyhow::Result<Self> {
        let db = DbClient::connect(&config.database_url, config.database_auth_token.clone()).await?;
        let kv = KvClient::connect(&config.redis_url).await?;

        let spotify = Arc::new(SpotifyHttpClient::new(
            SPOTIFY_API_BASE.to_string(),
            SPOTIFY_AUTH_URL.to_string(),
            config.spotify_client_id.clone(),
            config.spotify_client_secret.clone(),
        ));

        let completions = CompletionRepository::new(db.clone());
        let cursor = CursorState::new(CompletionSeed(completions.clone()));

        let state = AppState {
            rate_limiter: Arc::new(RateLimiter::new(
                kv.clone(),
                config.rate_limit_window,
                config.rate_limit_max,
            )),
            registry: Arc::new(ActiveSearchRegistry::new(
                kv.clone(),
                config.max_workers,
                config.search_timeout,
            )),
            tokens: Arc::new(TokenCache::new(
                kv.clone(),
                spotify.clone(),
                config.spotify_bearer_token.clone(),
            )),
            cursor: Arc::new(cursor),
            artists: Arc::new(ArtistRepository::new(db.clone())),
            completions: Arc::new(completions),
            search_endpoint: spotify,
            config: Arc::new(config),
        };

        info!("crawler kernel ignited (max_workers={})", state.config.max_workers);
        Ok(Self { state })
    }

    pub fn launch(self) {
        scheduler::spawn(self.state.clone());
        stale_sweep::spawn(self.state.clone());
        info!("crawler operational: scheduler tick and stale sweep running");
    }
}
