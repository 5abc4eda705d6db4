pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::parsing::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Upload page
        .route("/", get(handlers::handle_index))
        .route("/upload", post(handlers::handle_upload))
        // Structured-Data Endpoint
        .route("/api/v1/parse-resume", post(handlers::handle_parse_resume))
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        // Any origin may call the endpoint; preflight is answered by the layer.
        .layer(CorsLayer::permissive())
        .with_state(state)
}
