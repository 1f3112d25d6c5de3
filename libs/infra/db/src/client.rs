// [libs/infra/db/src/client.rs]
/*!
 * APARATO: DATABASE CONNECTION CLIENT
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: GESTIÓN DE ENLACES Y PERSISTENCIA ACID
 *
 * In-memory DSNs (used by the integration tests) need an anchor connection
 * kept alive for the lifetime of the client, or libSQL drops the schema the
 * moment the bootstrap connection closes.
 */

use crate::errors::DbError;
use crate::schema::apply_catalog_schema;
use libsql::{Builder, Connection, Database};
use std::sync::Arc;
use tracing::{error, info, instrument};

#[derive(Clone)]
pub struct DbClient {
    driver: Arc<Database>,
    _memory_anchor: Option<Arc<Connection>>,
}

impl DbClient {
    #[instrument(skip(database_access_token))]
    pub async fn connect(
        database_connection_url: &str,
        database_access_token: Option<String>,
    ) -> Result<Self, DbError> {
        if database_connection_url.is_empty() {
            return Err(DbError::ConnectionError(
                "DATABASE_URL is empty".to_string(),
            ));
        }

        info!("🔌 [DATABASE]: Connecting to [{}]", database_connection_url);

        let is_remote = database_connection_url.starts_with("libsql://")
            || database_connection_url.starts_with("https://");
        let is_memory = database_connection_url.contains(":memory:")
            || database_connection_url.contains("mode=memory");

        let driver = if is_remote {
            let token = database_access_token.ok_or_else(|| {
                DbError::ConnectionError("remote DSN requires an auth token".to_string())
            })?;
            Builder::new_remote(database_connection_url.to_string(), token)
                .build()
                .await
        } else {
            Builder::new_local(database_connection_url).build().await
        }
        .map_err(|e| DbError::ConnectionError(format!("driver init failed: {e}")))?;

        let driver = Arc::new(driver);
        let mut anchor = None;

        if is_memory {
            let anchor_conn = driver
                .connect()
                .map_err(|e| DbError::ConnectionError(format!("anchor connect failed: {e}")))?;
            apply_catalog_schema(&anchor_conn)
                .await
                .map_err(|e| DbError::ConnectionError(format!("schema sync failed: {e}")))?;
            anchor = Some(Arc::new(anchor_conn));
            info!("⚓ [DATABASE]: Memory strata anchored.");
        } else {
            let bootstrap_conn = driver
                .connect()
                .map_err(|e| DbError::ConnectionError(format!("bootstrap connect failed: {e}")))?;
            apply_catalog_schema(&bootstrap_conn)
                .await
                .map_err(|e| DbError::ConnectionError(format!("schema sync failed: {e}")))?;
        }

        Ok(Self {
            driver,
            _memory_anchor: anchor,
        })
    }

    pub fn connection(&self) -> Result<Connection, DbError> {
        self.driver.connect().map_err(|e| {
            error!("⚠️ [POOL_FAULT]: Connection allocation failed: {}", e);
            DbError::ConnectionError(e.to_string())
        })
    }
}
