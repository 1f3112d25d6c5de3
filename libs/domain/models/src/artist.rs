// [libs/domain/models/src/artist.rs]
/*!
 * APARATO: ARTIST & COMPLETION DOMAIN MODELS
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: REPRESENTACIÓN DE ENTIDADES PERSISTIDAS
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog artist as returned by the upstream search endpoint.
/// Upserts are insert-or-ignore: first writer wins, mutable fields are
/// never refreshed on conflict.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub genres: Vec<String>,
    pub popularity: u8,
    pub first_seen_at: DateTime<Utc>,
}

/// A durable, immutable record that a prefix's search has been fully
/// walked. A conflicting insert for the same query is absorbed as success.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionRecord {
    pub query: String,
    pub artists_found: u32,
    pub completed_at: DateTime<Utc>,
}
