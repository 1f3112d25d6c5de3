// [apps/crawler/tests/e2e_scenarios.rs]
//! End-to-end scenarios E1-E5. These exercise the full coordination core
//! (scheduler tick, C1-C5) against a fake upstream search endpoint, a
//! real in-memory libSQL database, and a real Redis instance. They are
//! `#[ignore]`d by default because no live Redis is available in CI; run
//! with `cargo test -- --ignored` against `REDIS_URL` (defaults to
//! `redis://127.0.0.1:6379/`).

use async_trait::async_trait;
use catalog_core_cursor::CursorState;
use catalog_core_ratelimit::RateLimiter;
use catalog_core_registry::ActiveSearchRegistry;
use catalog_core_tokens::{TokenCache, TokenError, TokenProvider};
use catalog_crawler::scheduler;
use catalog_crawler::seed::CompletionSeed;
use catalog_crawler::state::AppState;
use catalog_crawler::worker::run_worker;
use catalog_domain_models::{Artist, CachedToken, CrawlerConfig, Prefix};
use catalog_infra_db::{ArtistRepository, CompletionRepository, DbClient};
use catalog_infra_kv::KvClient;
use catalog_infra_spotify_client::{SearchEndpoint, SearchPage, SpotifyClientError};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

struct StaticTokenProvider;

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn fetch_token(&self) -> Result<CachedToken, TokenError> {
        Ok(CachedToken {
            access_token: "test-token".to_string(),
            token_type: "Bearer".to_string(),
            expires_in: 3600,
            expires_at: Utc::now().timestamp() as f64 + 3600.0,
        })
    }
}

/// A scripted upstream: each query maps to a sequence of page sizes,
/// one per call. Running past the script returns an empty page.
struct FakeSearchEndpoint {
    pages: Mutex<HashMap<String, Vec<usize>>>,
    calls: AtomicU32,
    force_429_once: Mutex<Option<String>>,
}

impl FakeSearchEndpoint {
    fn new(pages: HashMap<String, Vec<usize>>) -> Self {
        Self {
            pages: Mutex::new(pages),
            calls: AtomicU32::new(0),
            force_429_once: Mutex::new(None),
        }
    }

    fn with_429_for(pages: HashMap<String, Vec<usize>>, query: &str) -> Self {
        Self {
            pages: Mutex::new(pages),
            calls: AtomicU32::new(0),
            force_429_once: Mutex::new(Some(query.to_string())),
        }
    }

    fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchEndpoint for FakeSearchEndpoint {
    async fn search(
        &self,
        query: &str,
        _limit: u32,
        offset: u32,
        _bearer_token: &str,
    ) -> Result<SearchPage, SpotifyClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        {
            let mut flag = self.force_429_once.lock().unwrap();
            if flag.as_deref() == Some(query) && offset == 50 {
                *flag = None;
                return Err(SpotifyClientError::UpstreamRejected {
                    status: 429,
                    retry_after: Some(1),
                });
            }
        }

        let page_index = (offset / 50) as usize;
        let count = self
            .pages
            .lock()
            .unwrap()
            .get(query)
            .and_then(|pages| pages.get(page_index))
            .copied()
            .unwrap_or(0);

        let artists = (0..count)
            .map(|i| Artist {
                id: format!("{query}-{offset}-{i}"),
                name: format!("Artist {i}"),
                genres: vec!["indie".to_string()],
                popularity: 50,
                first_seen_at: Utc::now(),
            })
            .collect();

        Ok(SearchPage { artists })
    }
}

fn redis_url() -> String {
    std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379/".to_string())
}

async fn build_state(
    max_workers: u32,
    search_endpoint: Arc<dyn SearchEndpoint>,
) -> AppState {
    build_state_with_timeout(max_workers, search_endpoint, Duration::from_secs(300)).await
}

async fn build_state_with_timeout(
    max_workers: u32,
    search_endpoint: Arc<dyn SearchEndpoint>,
    search_timeout: Duration,
) -> AppState {
    let db = DbClient::connect(":memory:", None).await.unwrap();
    let kv = KvClient::connect(&redis_url()).await.unwrap();

    let completions = CompletionRepository::new(db.clone());
    let cursor = CursorState::new(CompletionSeed(completions.clone()));

    AppState {
        config: Arc::new(CrawlerConfig {
            spotify_client_id: "id".to_string(),
            spotify_client_secret: "secret".to_string(),
            spotify_bearer_token: None,
            redis_url: redis_url(),
            database_url: ":memory:".to_string(),
            database_auth_token: None,
            max_workers,
            rate_limit_window: Duration::from_secs(30),
            rate_limit_max: 10,
            search_timeout,
            scheduler_tick_period: Duration::from_secs(5),
        }),
        rate_limiter: Arc::new(RateLimiter::new(kv.clone(), Duration::from_secs(30), 10)),
        registry: Arc::new(ActiveSearchRegistry::new(kv.clone(), max_workers, search_timeout)),
        tokens: Arc::new(TokenCache::new(
            kv.clone(),
            Arc::new(StaticTokenProvider),
            None,
        )),
        cursor: Arc::new(cursor),
        artists: Arc::new(ArtistRepository::new(db.clone())),
        completions: Arc::new(completions),
        search_endpoint,
    }
}

#[tokio::test]
#[ignore = "requires a live Redis instance on REDIS_URL"]
async fn e1_cold_start_completes_two_prefixes() {
    let mut pages = HashMap::new();
    pages.insert("aaaa".to_string(), vec![1, 1]);
    pages.insert("aaab".to_string(), vec![1, 1]);
    let endpoint = Arc::new(FakeSearchEndpoint::new(pages));

    let state = build_state(2, endpoint).await;
    scheduler::tick(&state).await;

    tokio::time::sleep(Duration::from_millis(500)).await;

    assert_eq!(state.completions.count().await.unwrap(), 2);
    assert_eq!(state.artists.count().await.unwrap(), 4);
    assert_eq!(state.registry.count().await.unwrap(), 0);
}

#[tokio::test]
#[ignore = "requires a live Redis instance on REDIS_URL"]
async fn e2_completion_chains_next_prefix_before_next_tick() {
    let mut pages = HashMap::new();
    pages.insert("aaaa".to_string(), vec![1]);
    let endpoint = Arc::new(FakeSearchEndpoint::new(pages));

    let state = build_state(1, endpoint).await;
    scheduler::tick(&state).await;

    tokio::time::sleep(Duration::from_millis(500)).await;

    let members = state.registry.members().await.unwrap();
    assert_eq!(members, vec!["aaab".to_string()]);
}

#[tokio::test]
#[ignore = "requires a live Redis instance on REDIS_URL"]
async fn e4_429_retries_and_completes() {
    let mut pages = HashMap::new();
    pages.insert("aaaa".to_string(), vec![50, 1]);
    let endpoint = Arc::new(FakeSearchEndpoint::with_429_for(pages, "aaaa"));

    let state = build_state(1, endpoint.clone()).await;
    scheduler::tick(&state).await;

    tokio::time::sleep(Duration::from_secs(3)).await;

    let found = state.completions.find("aaaa").await.unwrap();
    assert!(found.is_some());
    assert!(endpoint.call_count() >= 3);
}

/// Two workers race on the same prefix, as if a duplicate dispatch slipped
/// past the registry (e.g. two processes ticking at once). The registry
/// only lets one claim the slot here, but both `run_worker` calls still
/// drive to completion independently — the DB's primary-key idempotency
/// (I5) is what actually has to hold the line.
#[tokio::test]
#[ignore = "requires a live Redis instance on REDIS_URL"]
async fn e3_duplicate_prefix_race() {
    let mut pages = HashMap::new();
    pages.insert("aaaa".to_string(), vec![2]);
    let endpoint = Arc::new(FakeSearchEndpoint::new(pages));

    let state = build_state(2, endpoint).await;
    let prefix = Prefix::new("aaaa").unwrap();

    assert!(state.registry.try_register(prefix.as_str()).await.unwrap());

    tokio::join!(
        run_worker(state.clone(), prefix.clone()),
        run_worker(state.clone(), prefix.clone()),
    );

    tokio::time::sleep(Duration::from_millis(200)).await;

    assert_eq!(state.completions.count().await.unwrap(), 1);
    assert_eq!(state.artists.count().await.unwrap(), 2);
    assert_eq!(state.registry.count().await.unwrap(), 0);
}

/// A worker claims a prefix and then vanishes without unregistering (e.g.
/// the process was killed mid-pagination). Once `search_timeout` elapses,
/// the registry's stale sweep must reclaim the slot so the scheduler can
/// dispatch a different prefix instead of stalling forever on a dead one.
#[tokio::test]
#[ignore = "requires a live Redis instance on REDIS_URL"]
async fn e5_stale_eviction_dispatches_new_prefix() {
    let mut pages = HashMap::new();
    pages.insert("aaab".to_string(), vec![1]);
    let endpoint = Arc::new(FakeSearchEndpoint::new(pages));

    let state = build_state_with_timeout(1, endpoint, Duration::from_millis(200)).await;

    // Claim "aaaa" from the cursor and register it, then never run a
    // worker for it — simulating the crash.
    let claimed = state.cursor.generate_batch(1).await.unwrap();
    assert_eq!(claimed[0].as_str(), "aaaa");
    assert!(state.registry.try_register(claimed[0].as_str()).await.unwrap());

    tokio::time::sleep(Duration::from_millis(400)).await;

    scheduler::tick(&state).await;
    tokio::time::sleep(Duration::from_millis(500)).await;

    assert!(state.completions.find("aaab").await.unwrap().is_some());
    assert!(state.completions.find("aaaa").await.unwrap().is_none());

    let members = state.registry.members().await.unwrap();
    assert!(!members.contains(&"aaaa".to_string()));
}
