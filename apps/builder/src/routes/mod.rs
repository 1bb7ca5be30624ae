pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::export::handlers as export_handlers;
use crate::session::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Session lifecycle
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_dispose_session),
        )
        // Form state controller
        .route(
            "/api/v1/sessions/:id/field",
            patch(handlers::handle_update_field),
        )
        .route(
            "/api/v1/sessions/:id/entries",
            post(handlers::handle_append_entry),
        )
        .route(
            "/api/v1/sessions/:id/skills/:index/subheadings",
            post(handlers::handle_append_sub_heading),
        )
        .route("/api/v1/sessions/:id/submit", post(handlers::handle_submit))
        // Views and export
        .route("/api/v1/sessions/:id/page", get(handlers::handle_page))
        .route(
            "/api/v1/sessions/:id/export",
            post(export_handlers::handle_export),
        )
        .with_state(state)
}

// ────────────────────────────────────────────────────────────────────────────
// End-to-end tests: full workflow through the router
// ────────────────────────────────────────────────────────────────────────────
