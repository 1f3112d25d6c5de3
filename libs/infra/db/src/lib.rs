// [libs/infra/db/src/lib.rs]
/*!
 * APARATO: DATABASE LIBRARY BARREL
 * CLASIFICACIÓN: INFRASTRUCTURE LIB (ESTRATO L3)
 * RESPONSABILIDAD: EXPOSICIÓN PÚBLICA DEL ADAPTADOR DE PERSISTENCIA
 */

pub mod client;
pub mod errors;
pub mod repositories;
pub mod schema;

pub use client::DbClient;
pub use errors::DbError;
pub use repositories::{ArtistRepository, CompletionRepository};
