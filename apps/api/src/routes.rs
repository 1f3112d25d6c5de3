// [apps/api/src/routes.rs]
/*!
 * APARATO: API ROUTING TABLE
 * RESPONSABILIDAD: EXPONE /search Y /status SOBRE EL ESTADO COMPARTIDO
 */

use crate::handlers::{search, status};
use crate::state::ApiState;
use axum::http::{header, Method};
use axum::routing::get;
use axum::Router;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

pub fn build_router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search::search))
        .route("/status", get(status::status))
        .layer(cors)
        .with_state(state)
}
