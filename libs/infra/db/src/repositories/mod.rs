// [libs/infra/db/src/repositories/mod.rs]
/*!
 * APARATO: REPOSITORY ACCESS MATRIX
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: ORQUESTACIÓN DE SUBSISTEMAS DE PERSISTENCIA
 */

pub mod artist;
pub mod completion;
pub mod queries;

pub use artist::ArtistRepository;
pub use completion::CompletionRepository;
