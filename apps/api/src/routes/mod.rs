pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::session::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/document",
            post(handlers::handle_upload_document).layer(DefaultBodyLimit::max(max_upload)),
        )
        .route("/api/v1/sessions/:id/summary", post(handlers::handle_summarize))
        .route(
            "/api/v1/sessions/:id/questions",
            post(handlers::handle_generate_questions),
        )
        .route(
            "/api/v1/sessions/:id/answers/reveal",
            post(handlers::handle_reveal_answers),
        )
        .route(
            "/api/v1/sessions/:id/answers/hide",
            post(handlers::handle_hide_answers),
        )
        .route(
            "/api/v1/sessions/:id/answers/toggle",
            post(handlers::handle_toggle_answers),
        )
        .route("/api/v1/sessions/:id/ask", post(handlers::handle_ask))
        .route("/api/v1/sessions/:id/review", post(handlers::handle_review_resume))
        .with_state(state)
}
