// [libs/infra/db/src/schema.rs]
/*!
 * APARATO: CATALOG SCHEMA BOOTSTRAP
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: CREACIÓN IDEMPOTENTE DE LAS TABLAS DE PERSISTENCIA
 *
 * Applies the two durable tables the crawler depends on: `artists`
 * (insert-or-ignore catalog rows) and `search_progress` (the completion
 * ledger that seeds the cursor on cold start). Schema bootstrapping proper
 * is an external collaborator of the coordination core, but the tables
 * still need to exist before any repository touches them.
 */

use anyhow::{Context, Result};
use libsql::Connection;
use tracing::{debug, info, instrument};

const TACTICAL_TABLES: &[(&str, &str)] = &[
    (
        "TABLE_ARTISTS",
        r#"
        CREATE TABLE IF NOT EXISTS artists (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            genres TEXT NOT NULL DEFAULT '[]',
            popularity INTEGER NOT NULL DEFAULT 0,
            first_seen_at DATETIME DEFAULT CURRENT_TIMESTAMP
        );
    "#,
    ),
    (
        "TABLE_SEARCH_PROGRESS",
        r#"
        CREATE TABLE IF NOT EXISTS search_progress (
            query TEXT PRIMARY KEY,
            artists INTEGER NOT NULL DEFAULT 0,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        );
    "#,
    ),
];

const ACCELERATION_INDEXES: &[(&str, &str)] = &[(
    "IDX_SEARCH_PROGRESS_CREATED",
    "CREATE INDEX IF NOT EXISTS idx_search_progress_created ON search_progress(created_at);",
)];

/// Runs the full structural synchronization sequence. Safe to call on every
/// process start: every statement is `IF NOT EXISTS`.
#[instrument(skip(database_connection))]
pub async fn apply_catalog_schema(database_connection: &Connection) -> Result<()> {
    info!("🏗️ [SCHEMA]: Synchronizing catalog schema...");

    for (identifier, sql) in TACTICAL_TABLES {
        debug!("  ↳ Solidifying: {}", identifier);
        database_connection
            .execute(*sql, ())
            .await
            .with_context(|| format!("CRITICAL_SOLIDIFICATION_FAULT: {}", identifier))?;
    }

    for (identifier, sql) in ACCELERATION_INDEXES {
        debug!("  ↳ Hardening: {}", identifier);
        database_connection
            .execute(*sql, ())
            .await
            .with_context(|| format!("CRITICAL_HARDENING_FAULT: {}", identifier))?;
    }

    info!("✅ [SCHEMA]: Catalog schema certified.");
    Ok(())
}
