// [libs/core/ratelimit/src/lib.rs]
/*!
 * APARATO: SLIDING WINDOW RATE LIMITER (C1)
 * CLASIFICACIÓN: CORE COORDINATION (ESTRATO L1)
 * RESPONSABILIDAD: ADMISIÓN ATÓMICA BAJO UNA VENTANA DESLIZANTE COMPARTIDA
 *
 * The check-evict-count-insert sequence runs as a single Lua script on the
 * Redis server so concurrent workers across processes never race on the
 * same window. `next_slot_eta` and `update_found` are plain commands, not
 * scripted — the source treats `update_found` as explicitly best-effort
 * and non-atomic with admission.
 */

pub mod errors;

use catalog_domain_models::{RateLimitInfo, WindowRequest};
use catalog_infra_kv::KvClient;
use redis::{AsyncCommands, Script};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{instrument, warn};

pub use errors::RateLimitError;

const REQUESTS_KEY: &str = "api_requests";
const REQUEST_TTL_SECS: i64 = 60;

/// Evicts stale records, counts the remainder, and admits a new one only
/// if still under `max_requests` — all inside one EVALSHA round trip.
const CHECK_AND_ADD_SCRIPT: &str = r#"
local window_start = tonumber(ARGV[1])
local now = tonumber(ARGV[2])
local max_requests = tonumber(ARGV[3])

redis.call('ZREMRANGEBYSCORE', KEYS[1], 0, window_start)

local count = redis.call('ZCOUNT', KEYS[1], window_start, '+inf')
if count >= max_requests then
    return 0
end

redis.call('ZADD', KEYS[1], now, ARGV[4])
redis.call('HSET', 'request:' .. ARGV[4],
    'query', ARGV[5],
    'offset', ARGV[6],
    'limit', ARGV[7],
    'timestamp', tostring(now),
    'artists_found', '0'
)
redis.call('EXPIRE', KEYS[1], 60)
redis.call('EXPIRE', 'request:' .. ARGV[4], 60)

return 1
"#;

pub struct RateLimiter {
    kv: KvClient,
    window: Duration,
    max_requests: u64,
    script: Script,
}

impl RateLimiter {
    pub fn new(kv: KvClient, window: Duration, max_requests: u64) -> Self {
        Self {
            kv,
            window,
            max_requests,
            script: Script::new(CHECK_AND_ADD_SCRIPT),
        }
    }

    /// Atomically admits or denies one request against the shared window.
    /// A caller that receives `false` MUST NOT issue the upstream request.
    #[instrument(skip(self))]
    pub async fn try_admit(
        &self,
        prefix: &str,
        offset: u32,
        limit: u32,
    ) -> Result<bool, RateLimitError> {
        let mut conn = self.kv.manager();
        let now = now_secs();
        let window_start = now - self.window.as_secs_f64();
        let tag = format!("{prefix}:{offset}:{now}");

        let admitted: i32 = self
            .script
            .key(REQUESTS_KEY)
            .arg(window_start)
            .arg(now)
            .arg(self.max_requests)
            .arg(&tag)
            .arg(prefix)
            .arg(offset)
            .arg(limit)
            .invoke_async(&mut conn)
            .await
            .map_err(catalog_infra_kv::KvError::from)?;

        Ok(admitted == 1)
    }

    /// Seconds to wait before the next admission is likely to succeed.
    /// Returns 0 when the window currently has room.
    #[instrument(skip(self))]
    pub async fn next_slot_eta(&self) -> Result<Duration, RateLimitError> {
        let mut conn = self.kv.manager();
        let now = now_secs();
        let window_start = now - self.window.as_secs_f64();

        let count: u64 = conn
            .zcount(REQUESTS_KEY, window_start, "+inf")
            .await
            .map_err(catalog_infra_kv::KvError::from)?;

        if count < self.max_requests {
            return Ok(Duration::ZERO);
        }

        let oldest: Vec<(String, f64)> = conn
            .zrange_withscores(REQUESTS_KEY, 0, 0)
            .await
            .map_err(catalog_infra_kv::KvError::from)?;

        let eta = match oldest.first() {
            Some((_, oldest_ts)) => (oldest_ts + self.window.as_secs_f64() - now).max(0.0),
            None => 0.0,
        };

        Ok(Duration::from_secs_f64(eta))
    }

    /// Best-effort update of a record's observability metadata. Never
    /// fails the caller; logs and returns on storage trouble.
    #[instrument(skip(self))]
    pub async fn update_found(&self, prefix: &str, offset: u32, artists_found: u32) {
        let mut conn = self.kv.manager();
        let now = now_secs();
        let window_start = now - self.window.as_secs_f64();

        let keys: Result<Vec<String>, _> = conn
            .zrangebyscore(REQUESTS_KEY, window_start, "+inf")
            .await;

        let keys = match keys {
            Ok(keys) => keys,
            Err(e) => {
                warn!("⚠️ [RATE_LIMIT]: update_found failed to list window: {}", e);
                return;
            }
        };

        let needle = format!("{prefix}:{offset}:");
        if let Some(tag) = keys.into_iter().find(|k| k.starts_with(&needle)) {
            let result: redis::RedisResult<()> = conn
                .hset(format!("request:{tag}"), "artists_found", artists_found)
                .await;
            if let Err(e) = result {
                warn!("⚠️ [RATE_LIMIT]: update_found failed to write: {}", e);
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn window_requests(&self) -> Result<Vec<WindowRequest>, RateLimitError> {
        let mut conn = self.kv.manager();
        let now = now_secs();
        let window_start = now - self.window.as_secs_f64();

        let keys: Vec<String> = conn
            .zrangebyscore(REQUESTS_KEY, window_start, "+inf")
            .await
            .map_err(catalog_infra_kv::KvError::from)?;

        let mut requests = Vec::with_capacity(keys.len());
        for key in keys {
            let details: std::collections::HashMap<String, String> = conn
                .hgetall(format!("request:{key}"))
                .await
                .map_err(catalog_infra_kv::KvError::from)?;

            if details.is_empty() {
                continue;
            }

            requests.push(WindowRequest {
                prefix: details.get("query").cloned().unwrap_or_default(),
                offset: details.get("offset").and_then(|v| v.parse().ok()).unwrap_or(0),
                limit: details.get("limit").and_then(|v| v.parse().ok()).unwrap_or(50),
                timestamp: details.get("timestamp").and_then(|v| v.parse().ok()).unwrap_or(0.0),
                artists_found: details.get("artists_found").and_then(|v| v.parse().ok()),
            });
        }

        requests.sort_by(|a, b| b.timestamp.partial_cmp(&a.timestamp).unwrap());
        Ok(requests)
    }

    #[instrument(skip(self))]
    pub async fn rate_limit_info(&self) -> Result<RateLimitInfo, RateLimitError> {
        let mut conn = self.kv.manager();
        let now = now_secs();
        let window_start = now - self.window.as_secs_f64();

        let _: i64 = redis::cmd("ZREMRANGEBYSCORE")
            .arg(REQUESTS_KEY)
            .arg(0)
            .arg(window_start)
            .query_async(&mut conn)
            .await
            .map_err(catalog_infra_kv::KvError::from)?;

        let entries: Vec<(String, f64)> = conn
            .zrange_withscores(REQUESTS_KEY, 0, -1)
            .await
            .map_err(catalog_infra_kv::KvError::from)?;

        let current_requests = entries.len() as u64;
        let time_until_next_request = if current_requests >= self.max_requests {
            entries
                .first()
                .map(|(_, ts)| (ts + self.window.as_secs_f64() - now).max(0.0))
                .unwrap_or(0.0)
        } else {
            0.0
        };

        Ok(RateLimitInfo {
            window_size: self.window.as_secs(),
            current_requests,
            max_requests: self.max_requests,
            remaining_requests: self.max_requests.saturating_sub(current_requests),
            time_until_next_request,
            window_start,
            window_end: now,
        })
    }
}

fn now_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before epoch")
        .as_secs_f64()
}
