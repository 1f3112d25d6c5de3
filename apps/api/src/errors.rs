// [apps/api/src/errors.rs]
/*!
 * APARATO: API ERROR MAPPING
 * RESPONSABILIDAD: TRADUCE LOS ERRORES DEL NÚCLEO A CÓDIGOS HTTP
 *
 * `ValidationError` maps to 400, an upstream rejection passes its own
 * status through, and everything else (storage, auth) is a 502/503 —
 * `/status` never uses this path, since it degrades in place instead of
 * failing the request.
 */

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("upstream search provider rejected the request: {status}")]
    Upstream { status: u16 },

    #[error("storage unavailable: {0}")]
    Storage(String),

    #[error("token acquisition failed: {0}")]
    Auth(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::RateLimited { retry_after_secs } => (
                StatusCode::TOO_MANY_REQUESTS,
                format!("retry after {retry_after_secs}s"),
            ),
            ApiError::Upstream { status } => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                self.to_string(),
            ),
            ApiError::Storage(_) => (StatusCode::SERVICE_UNAVAILABLE, self.to_string()),
            ApiError::Auth(_) => (StatusCode::BAD_GATEWAY, self.to_string()),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
