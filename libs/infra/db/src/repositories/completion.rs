// [libs/infra/db/src/repositories/completion.rs]
/*!
 * APARATO: COMPLETION REPOSITORY
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: PERSISTENCIA DE LA TABLA `search_progress`
 *
 * The completion ledger is both the durability mechanism for exactly-once
 * completion recording (I5) and the seed source for the cursor on cold
 * start (I4).
 */

use crate::errors::DbError;
use crate::repositories::queries as sql;
use crate::DbClient;
use catalog_domain_models::CompletionRecord;
use chrono::{DateTime, NaiveDateTime, Utc};
use libsql::params;
use tracing::{info, instrument, warn};

#[derive(Clone)]
pub struct CompletionRepository {
    database_client: DbClient,
}

impl CompletionRepository {
    pub fn new(client: DbClient) -> Self {
        Self {
            database_client: client,
        }
    }

    /// Inserts a completion row. A primary-key conflict on `query` is
    /// absorbed as success: another worker already finished this prefix.
    #[instrument(skip(self))]
    pub async fn record(&self, query: &str, artists_found: u32) -> Result<(), DbError> {
        let connection = self.database_client.connection()?;

        match connection
            .execute(sql::INSERT_COMPLETION, params![query, artists_found as i64])
            .await
        {
            Ok(_) => {
                info!("✅ [COMPLETION]: Recorded '{}' ({} artists).", query, artists_found);
                Ok(())
            }
            Err(libsql::Error::SqliteFailure(_, message)) if message.contains("UNIQUE") => {
                warn!("♻️  [COMPLETION]: '{}' already recorded, absorbing as success.", query);
                Ok(())
            }
            Err(other) => Err(DbError::QueryError(other)),
        }
    }

    pub async fn find(&self, query: &str) -> Result<Option<CompletionRecord>, DbError> {
        let connection = self.database_client.connection()?;
        let mut rows = connection.query(sql::FIND_COMPLETION, params![query]).await?;

        match rows.next().await? {
            Some(row) => {
                let query: String = row.get(0)?;
                let artists_found: i64 = row.get(1)?;
                let created_at: String = row.get(2)?;
                let completed_at: DateTime<Utc> =
                    NaiveDateTime::parse_from_str(&created_at, "%Y-%m-%d %H:%M:%S")
                        .map_err(|e| DbError::MappingError(format!("bad timestamp: {e}")))?
                        .and_utc();

                Ok(Some(CompletionRecord {
                    query,
                    artists_found: artists_found as u32,
                    completed_at,
                }))
            }
            None => Ok(None),
        }
    }

    /// The lexicographically greatest completed prefix, used to seed the
    /// cursor generator on cold start.
    pub async fn last_completed_query(&self) -> Result<Option<String>, DbError> {
        let connection = self.database_client.connection()?;
        let mut rows = connection.query(sql::GET_LAST_COMPLETED_QUERY, ()).await?;
        let value = rows
            .next()
            .await?
            .map(|row| row.get::<String>(0))
            .transpose()?;
        Ok(value)
    }

    pub async fn count(&self) -> Result<i64, DbError> {
        let connection = self.database_client.connection()?;
        let mut rows = connection.query(sql::COUNT_COMPLETIONS, ()).await?;
        let count = rows
            .next()
            .await?
            .map(|row| row.get::<i64>(0))
            .transpose()?
            .unwrap_or(0);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn repo() -> CompletionRepository {
        let client = DbClient::connect(":memory:", None)
            .await
            .expect("in-memory db should connect");
        CompletionRepository::new(client)
    }

    #[tokio::test]
    async fn record_is_idempotent_under_primary_key_conflict() {
        let repo = repo().await;

        repo.record("aaaa", 3).await.unwrap();
        repo.record("aaaa", 999).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 1);
        let found = repo.find("aaaa").await.unwrap().unwrap();
        assert_eq!(found.artists_found, 3);
    }

    #[tokio::test]
    async fn last_completed_query_is_lexicographic_max() {
        let repo = repo().await;
        for q in ["aaab", "aaaf", "aaac"] {
            repo.record(q, 0).await.unwrap();
        }

        assert_eq!(repo.last_completed_query().await.unwrap(), Some("aaaf".to_string()));
    }

    #[tokio::test]
    async fn find_returns_none_for_unknown_query() {
        let repo = repo().await;
        assert!(repo.find("zzzz").await.unwrap().is_none());
    }
}
