// [apps/crawler/src/seed.rs]
/*!
 * APARATO: COMPLETION-LEDGER SEED ADAPTER
 * RESPONSABILIDAD: CONECTA EL CURSOR (C4) A LA TABLA DE COMPLETADOS
 *
 * `catalog-core-cursor` depends on the `SeedSource` seam, not on
 * `catalog-infra-db` directly; this thin adapter lives at the app layer,
 * the one place both crates are already in scope.
 */

use catalog_core_cursor::{CursorError, SeedSource};
use catalog_infra_db::CompletionRepository;
use async_trait::async_trait;

pub struct CompletionSeed(pub CompletionRepository);

#[async_trait]
impl SeedSource for CompletionSeed {
    async fn last_completed_query(&self) -> Result<Option<String>, CursorError> {
        self.0
            .last_completed_query()
            .await
            .map_err(|e| CursorError::Seed(e.to_string()))
    }
}
