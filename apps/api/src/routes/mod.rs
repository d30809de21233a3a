pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::evaluation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/skills", get(handlers::handle_list_skills))
        .route(
            "/api/v1/evaluations",
            post(handlers::handle_evaluate_upload),
        )
        .route(
            "/api/v1/evaluations/text",
            post(handlers::handle_evaluate_text),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
