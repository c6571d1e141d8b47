use axum::{routing::get, Router};
use tower_http::catch_panic::CatchPanicLayer;

use crate::error::handle_panic;
use crate::handlers;
use crate::state::AppState;

/// API routes shared by the server binary and the integration tests.
/// Transport-level layers (CORS, tracing, metrics) are added by `main`.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/api/og",
            get(handlers::og::get_og_data).post(handlers::og::get_og_data),
        )
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}
