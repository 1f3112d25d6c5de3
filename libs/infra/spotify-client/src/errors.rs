// [libs/infra/spotify-client/src/errors.rs]
/*!
 * APARATO: SPOTIFY CLIENT ERRORS
 * RESPONSABILIDAD: CATALOGACIÓN DE FALLOS DE COMUNICACIÓN CON SPOTIFY
 */

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpotifyClientError {
    #[error("NETWORK_UNREACHABLE: {0}")]
    NetworkFault(#[from] reqwest::Error),

    #[error("AUTH_REJECTED: token endpoint returned {0}")]
    AuthFailure(String),

    #[error("UPSTREAM_REJECTION: status {status}, retry_after={retry_after:?}")]
    UpstreamRejected {
        status: u16,
        retry_after: Option<u64>,
    },
}
