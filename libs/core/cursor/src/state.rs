// [libs/core/cursor/src/state.rs]
/*!
 * APARATO: SEARCH CURSOR & BATCH GENERATOR (C4)
 * CLASIFICACIÓN: CORE COORDINATION (ESTRATO L1)
 * RESPONSABILIDAD: GENERACIÓN DE LOTES DE PREFIJOS DESDE EL CURSOR
 *
 * A process-local "next prefix" pointer, seeded from the completion
 * ledger on first use and advanced in memory thereafter. The generator
 * is single-writer within a process; several processes running it
 * concurrently is tolerated because the active search registry rejects
 * duplicate registrations and completion records are idempotent.
 */

use crate::errors::CursorError;
use crate::increment::next;
use async_trait::async_trait;
use catalog_domain_models::Prefix;
use tokio::sync::Mutex;

const BOOTSTRAP_CURSOR: &str = "aaaa";

/// Decouples the cursor from the completion ledger's storage concerns —
/// the coordination core depends on this seam, not on `catalog-infra-db`
/// directly.
#[async_trait]
pub trait SeedSource: Send + Sync {
    async fn last_completed_query(&self) -> Result<Option<String>, CursorError>;
}

struct Inner {
    cursor: String,
    /// Set once on the very first `generate_batch` call after a cold
    /// start with an empty completion table; cleared after "aaaa" is
    /// emitted. Never set again for the lifetime of the process.
    bootstrap_pending: bool,
}

pub struct CursorState<S: SeedSource> {
    seed_source: S,
    inner: Mutex<Option<Inner>>,
}

impl<S: SeedSource> CursorState<S> {
    pub fn new(seed_source: S) -> Self {
        Self {
            seed_source,
            inner: Mutex::new(None),
        }
    }

    async fn ensure_initialized(&self, inner: &mut Option<Inner>) -> Result<(), CursorError> {
        if inner.is_some() {
            return Ok(());
        }

        let last = self.seed_source.last_completed_query().await?;
        *inner = Some(match last {
            None => Inner {
                cursor: BOOTSTRAP_CURSOR.to_string(),
                bootstrap_pending: true,
            },
            Some(last) => Inner {
                cursor: last,
                bootstrap_pending: false,
            },
        });

        Ok(())
    }

    /// Returns up to `n` distinct prefixes, advancing the in-memory
    /// cursor. Not persisted: durability comes entirely from the
    /// completion table, re-read on the next cold start.
    pub async fn generate_batch(&self, n: usize) -> Result<Vec<Prefix>, CursorError> {
        if n == 0 {
            return Ok(Vec::new());
        }

        let mut guard = self.inner.lock().await;
        self.ensure_initialized(&mut guard).await?;
        let state = guard.as_mut().expect("initialized above");

        let mut batch = Vec::with_capacity(n);

        if state.bootstrap_pending {
            batch.push(state.cursor.clone());
            state.bootstrap_pending = false;
        }

        while batch.len() < n {
            state.cursor = next(&state.cursor);
            batch.push(state.cursor.clone());
        }

        Ok(batch
            .into_iter()
            .map(|raw| Prefix::new(raw).expect("cursor only emits Σ-valid strings"))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSeed(Option<String>);

    #[async_trait]
    impl SeedSource for FixedSeed {
        async fn last_completed_query(&self) -> Result<Option<String>, CursorError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn s2_seed_from_empty_table() {
        let cursor = CursorState::new(FixedSeed(None));
        let batch = cursor.generate_batch(3).await.unwrap();
        let rendered: Vec<String> = batch.iter().map(|p| p.to_string()).collect();
        assert_eq!(rendered, vec!["aaaa", "aaab", "aaac"]);
    }

    #[tokio::test]
    async fn s3_seed_from_existing_does_not_reemit_last() {
        let cursor = CursorState::new(FixedSeed(Some("aaaf".to_string())));
        let batch = cursor.generate_batch(2).await.unwrap();
        let rendered: Vec<String> = batch.iter().map(|p| p.to_string()).collect();
        assert_eq!(rendered, vec!["aaag", "aaah"]);
    }

    #[tokio::test]
    async fn batch_never_reemits_bootstrap_after_first_call() {
        let cursor = CursorState::new(FixedSeed(None));
        let first = cursor.generate_batch(1).await.unwrap();
        let second = cursor.generate_batch(1).await.unwrap();
        assert_eq!(first[0].to_string(), "aaaa");
        assert_eq!(second[0].to_string(), "aaab");
    }
}
