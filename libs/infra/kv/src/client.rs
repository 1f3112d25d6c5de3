// [libs/infra/kv/src/client.rs]
/*!
 * APARATO: SHARED KV CLIENT
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: GESTIÓN DE LA CONEXIÓN COMPARTIDA A REDIS
 *
 * One physical connection manager shared by the rate limiter, the active
 * search registry, and the token cache — mirroring how the original
 * source bundles all three concerns against one `redis.asyncio.Redis`
 * instance rather than opening a connection per concern.
 */

use crate::errors::KvError;
use redis::aio::ConnectionManager;
use redis::Client;
use tracing::{info, instrument};

#[derive(Clone)]
pub struct KvClient {
    manager: ConnectionManager,
}

impl KvClient {
    #[instrument(skip(redis_url))]
    pub async fn connect(redis_url: &str) -> Result<Self, KvError> {
        info!("🔌 [KV]: Connecting to [{}]", redacted(redis_url));

        let client = Client::open(redis_url)
            .map_err(|e| KvError::ConnectionError(format!("invalid URL: {e}")))?;

        let manager = client
            .get_connection_manager()
            .await
            .map_err(|e| KvError::ConnectionError(format!("manager init failed: {e}")))?;

        Ok(Self { manager })
    }

    /// Cheap clone of the underlying connection manager, for components
    /// that need to issue their own pipelines or scripts.
    pub fn manager(&self) -> ConnectionManager {
        self.manager.clone()
    }
}

fn redacted(url: &str) -> String {
    match url.rfind('@') {
        Some(at) => format!("redis://***{}", &url[at..]),
        None => url.to_string(),
    }
}
