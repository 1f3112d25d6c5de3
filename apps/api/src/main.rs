// [apps/api/src/main.rs]
/*!
 * APARATO: API MAIN ENTRY POINT
 * RESPONSABILIDAD: IGNICIÓN DEL SERVIDOR HTTP DE SOLO LECTURA
 */

use catalog_api::routes::build_router;
use catalog_api::state::ApiState;
use catalog_core_ratelimit::RateLimiter;
use catalog_core_registry::ActiveSearchRegistry;
use catalog_core_tokens::TokenCache;
use catalog_domain_models::CrawlerConfig;
use catalog_infra_db::{ArtistRepository, CompletionRepository, DbClient};
use catalog_infra_kv::KvClient;
use catalog_infra_spotify_client::SpotifyHttpClient;
use catalog_shared_telemetry::init_tracing;
use dotenvy::dotenv;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tracing::{error, info};

const SPOTIFY_API_BASE: &str = "https://api.spotify.com/v1";
const SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/api/token";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    init_tracing("catalog_api");

    let config = CrawlerConfig::from_env().unwrap_or_else(|e| {
        error!("configuration error: {}", e);
        std::process::exit(1);
    });

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8080);

    let db = DbClient::connect(&config.database_url, config.database_auth_token.clone()).await?;
    let kv = KvClient::connect(&config.redis_url).await?;

    let spotify = Arc::new(SpotifyHttpClient::new(
        SPOTIFY_API_BASE.to_string(),
        SPOTIFY_AUTH_URL.to_string(),
        config.spotify_client_id.clone(),
        config.spotify_client_secret.clone(),
    ));

    let state = ApiState {
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
        artists: Arc::new(ArtistRepository::new(db.clone())),
        completions: Arc::new(CompletionRepository::new(db.clone())),
        search_endpoint: spotify,
        config: Arc::new(config),
    };

    let router = build_router(state);
    let addr = SocketAddr::new("0.0.0.0".parse::<IpAddr>().unwrap(), port);

    info!("api listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
