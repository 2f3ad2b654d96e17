pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::views::handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/header", get(handlers::handle_header))
        .route("/api/v1/roster", get(handlers::handle_roster))
        .route("/api/v1/criteria", get(handlers::handle_criteria))
        // Selection
        .route(
            "/api/v1/selection",
            get(handlers::handle_get_selection).delete(handlers::handle_clear_selection),
        )
        .route(
            "/api/v1/selection/:id/toggle",
            post(handlers::handle_toggle_selection),
        )
        // Comparison matrix
        .route("/api/v1/matrix", get(handlers::handle_matrix))
        .route("/api/v1/matrix/latest", get(handlers::handle_latest_matrix))
        .with_state(state)
}
