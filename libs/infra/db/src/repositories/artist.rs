// [libs/infra/db/src/repositories/artist.rs]
/*!
 * APARATO: ARTIST REPOSITORY
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: PERSISTENCIA DE LA TABLA `artists`
 */

use crate::errors::DbError;
use crate::repositories::queries as sql;
use crate::DbClient;
use catalog_domain_models::Artist;
use libsql::params;
use tracing::{info, instrument};

pub struct ArtistRepository {
    database_client: DbClient,
}

impl ArtistRepository {
    pub fn new(client: DbClient) -> Self {
        Self {
            database_client: client,
        }
    }

    /// Insert-or-ignore on primary key. First writer wins; mutable fields
    /// (genres, popularity, name) are never refreshed on conflict.
    #[instrument(skip(self, artist))]
    pub async fn upsert(&self, artist: &Artist) -> Result<(), DbError> {
        let connection = self.database_client.connection()?;
        let genres_json = serde_json::to_string(&artist.genres)
            .map_err(|e| DbError::MappingError(e.to_string()))?;

        connection
            .execute(
                sql::UPSERT_ARTIST,
                params![
                    artist.id.clone(),
                    artist.name.clone(),
                    genres_json,
                    artist.popularity as i64,
                ],
            )
            .await?;

        Ok(())
    }

    #[instrument(skip(self, artists))]
    pub async fn upsert_batch(&self, artists: &[Artist]) -> Result<usize, DbError> {
        if artists.is_empty() {
            return Ok(0);
        }

        let connection = self.database_client.connection()?;
        let transaction = connection.transaction().await.map_err(|_| DbError::TransactionError)?;

        for artist in artists {
            let genres_json = serde_json::to_string(&artist.genres)
                .map_err(|e| DbError::MappingError(e.to_string()))?;

            transaction
                .execute(
                    sql::UPSERT_ARTIST,
                    params![
                        artist.id.clone(),
                        artist.name.clone(),
                        genres_json,
                        artist.popularity as i64,
                    ],
                )
                .await?;
        }

        transaction.commit().await.map_err(|_| DbError::TransactionError)?;

        info!("💾 [ARTIST_REPO]: Batch upserted {} rows.", artists.len());
        Ok(artists.len())
    }

    pub async fn count(&self) -> Result<i64, DbError> {
        let connection = self.database_client.connection()?;
        let mut rows = connection.query(sql::COUNT_ARTISTS, ()).await?;
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
    use chrono::Utc;

    async fn repo() -> ArtistRepository {
        let client = DbClient::connect(":memory:", None)
            .await
            .expect("in-memory db should connect");
        ArtistRepository::new(client)
    }

    fn sample(id: &str) -> Artist {
        Artist {
            id: id.to_string(),
            name: "Test Artist".to_string(),
            genres: vec!["indie".to_string()],
            popularity: 42,
            first_seen_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn upsert_is_idempotent_on_primary_key() {
        let repo = repo().await;
        let artist = sample("artist-1");

        repo.upsert(&artist).await.unwrap();
        repo.upsert(&artist).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn upsert_batch_counts_distinct_rows() {
        let repo = repo().await;
        let batch = vec![sample("a"), sample("b"), sample("a")];

        repo.upsert_batch(&batch).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 2);
    }
}
