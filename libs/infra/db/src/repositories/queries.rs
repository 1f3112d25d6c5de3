// [libs/infra/db/src/repositories/queries.rs]
/*!
 * APARATO: CATALOG SQL STORE
 * CLASIFICACIÓN: INFRASTRUCTURE SQL (ESTRATO L3)
 * RESPONSABILIDAD: DEFINICIÓN DE SENTENCIAS PARA ARTISTAS Y PROGRESO
 */

// --- ARTISTS ---

/// Insert-or-ignore: first writer wins, mutable fields are never refreshed.
pub const UPSERT_ARTIST: &str = r#"
    INSERT INTO artists (id, name, genres, popularity, first_seen_at)
    VALUES (?1, ?2, ?3, ?4, CURRENT_TIMESTAMP)
    ON CONFLICT(id) DO NOTHING
"#;

pub const COUNT_ARTISTS: &str = "SELECT COUNT(*) FROM artists";

// --- SEARCH PROGRESS (completion ledger) ---

/// Unique-violation on `query` is absorbed by the repository as success.
pub const INSERT_COMPLETION: &str = r#"
    INSERT INTO search_progress (query, artists, created_at)
    VALUES (?1, ?2, CURRENT_TIMESTAMP)
"#;

pub const FIND_COMPLETION: &str = r#"
    SELECT query, artists, created_at FROM search_progress WHERE query = ?1
"#;

/// Seed query for the cursor: the lexicographically greatest completed
/// prefix, used to resume the odometer on cold start.
pub const GET_LAST_COMPLETED_QUERY: &str = r#"
    SELECT query FROM search_progress ORDER BY query DESC LIMIT 1
"#;

pub const COUNT_COMPLETIONS: &str = "SELECT COUNT(*) FROM search_progress";
