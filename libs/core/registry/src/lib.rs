// [libs/core/registry/src/lib.rs]
/*!
 * APARATO: ACTIVE SEARCH REGISTRY (C2)
 * CLASIFICACIÓN: CORE COORDINATION (ESTRATO L1)
 * RESPONSABILIDAD: ADMISIÓN ACOTADA DE PREFIJOS EN VUELO
 *
 * A bounded set of in-flight prefixes with liveness timestamps. The set
 * and the timestamp map are mutated together through a Redis pipeline so
 * they never drift apart, mirroring `add_active_search`/`remove_active_search`
 * in the original source.
 */

pub mod errors;

use catalog_infra_kv::KvClient;
use redis::{AsyncCommands, Script};
use std::collections::HashMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{info, instrument, warn};

pub use errors::RegistryError;

const ACTIVE_SEARCHES_KEY: &str = "active_searches";
const ACTIVE_SEARCHES_TIMESTAMPS_KEY: &str = "active_searches:timestamps";

/// Checks membership and cardinality and, if there is room and `prefix`
/// isn't already present, registers it — all inside one EVALSHA round
/// trip so two concurrent callers near `max_workers` can never both win.
const TRY_REGISTER_SCRIPT: &str = r#"
local prefix = ARGV[1]
local max_workers = tonumber(ARGV[2])
local now = ARGV[3]

if redis.call('SISMEMBER', KEYS[1], prefix) == 1 then
    return 0
end

local cardinality = redis.call('SCARD', KEYS[1])
if cardinality >= max_workers then
    return 0
end

redis.call('SADD', KEYS[1], prefix)
redis.call('HSET', KEYS[2], prefix, now)

return 1
"#;

pub struct ActiveSearchRegistry {
    kv: KvClient,
    max_workers: u32,
    search_timeout: Duration,
    try_register_script: Script,
}

impl ActiveSearchRegistry {
    pub fn new(kv: KvClient, max_workers: u32, search_timeout: Duration) -> Self {
        Self {
            kv,
            max_workers,
            search_timeout,
            try_register_script: Script::new(TRY_REGISTER_SCRIPT),
        }
    }

    /// Atomically checks cardinality and registers `prefix` if there is
    /// room and it is not already present. Returns `false` on a full
    /// registry or a duplicate — never both in the same call.
    #[instrument(skip(self))]
    pub async fn try_register(&self, prefix: &str) -> Result<bool, RegistryError> {
        let mut conn = self.kv.manager();
        let now = now_secs();

        let registered: i32 = self
            .try_register_script
            .key(ACTIVE_SEARCHES_KEY)
            .key(ACTIVE_SEARCHES_TIMESTAMPS_KEY)
            .arg(prefix)
            .arg(self.max_workers)
            .arg(now.to_string())
            .invoke_async(&mut conn)
            .await?;

        if registered == 1 {
            info!("➕ [REGISTRY]: Registered active search '{}'.", prefix);
        }

        Ok(registered == 1)
    }

    /// Idempotent: removing an absent prefix is a no-op, not an error.
    #[instrument(skip(self))]
    pub async fn unregister(&self, prefix: &str) -> Result<(), RegistryError> {
        let mut conn = self.kv.manager();

        let (): () = redis::pipe()
            .atomic()
            .srem(ACTIVE_SEARCHES_KEY, prefix)
            .ignore()
            .hdel(ACTIVE_SEARCHES_TIMESTAMPS_KEY, prefix)
            .ignore()
            .query_async(&mut conn)
            .await?;

        info!("➖ [REGISTRY]: Unregistered '{}'.", prefix);
        Ok(())
    }

    /// Runs stale eviction first, then returns the current set.
    #[instrument(skip(self))]
    pub async fn members(&self) -> Result<Vec<String>, RegistryError> {
        self.evict_stale().await?;
        let mut conn = self.kv.manager();
        let members: Vec<String> = conn.smembers(ACTIVE_SEARCHES_KEY).await?;
        Ok(members)
    }

    /// Cardinality after stale eviction.
    #[instrument(skip(self))]
    pub async fn count(&self) -> Result<u32, RegistryError> {
        self.evict_stale().await?;
        let mut conn = self.kv.manager();
        let count: u32 = conn.scard(ACTIVE_SEARCHES_KEY).await?;
        Ok(count)
    }

    /// Removes prefixes whose recorded start predates `search_timeout`.
    /// Exists solely to reclaim slots from crashed workers; a live worker
    /// that outlasts this and later completes will still record
    /// successfully (the completion table absorbs the duplicate insert).
    #[instrument(skip(self))]
    async fn evict_stale(&self) -> Result<(), RegistryError> {
        let mut conn = self.kv.manager();
        let now = now_secs();

        let members: Vec<String> = conn.smembers(ACTIVE_SEARCHES_KEY).await?;
        let timestamps: HashMap<String, String> =
            conn.hgetall(ACTIVE_SEARCHES_TIMESTAMPS_KEY).await?;

        for prefix in members {
            let started_at: Option<f64> = timestamps.get(&prefix).and_then(|v| v.parse().ok());
            if let Some(started_at) = started_at {
                if started_at + self.search_timeout.as_secs_f64() < now {
                    warn!("🧹 [REGISTRY]: Evicting stale search '{}'.", prefix);
                    self.unregister(&prefix).await?;
                }
            }
        }

        Ok(())
    }
}

fn now_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before epoch")
        .as_secs_f64()
}
