pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::candidates;
use crate::interviews;
use crate::presentations;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Candidate API
        .route(
            "/api/v1/candidates",
            get(candidates::handlers::handle_list).post(candidates::handlers::handle_create),
        )
        .route(
            "/api/v1/candidates/:id",
            get(candidates::handlers::handle_get).patch(candidates::handlers::handle_update),
        )
        .route(
            "/api/v1/candidates/:id/presentations",
            get(presentations::handlers::handle_list_by_candidate),
        )
        .route(
            "/api/v1/candidates/:id/interviews",
            get(interviews::handlers::handle_list_by_candidate),
        )
        // Presentation API
        .route(
            "/api/v1/presentations",
            get(presentations::handlers::handle_list),
        )
        .route(
            "/api/v1/presentations/generate",
            post(presentations::handlers::handle_generate),
        )
        .route(
            "/api/v1/presentations/:id",
            get(presentations::handlers::handle_get),
        )
        .route(
            "/api/v1/presentations/:id/send",
            post(presentations::handlers::handle_send),
        )
        .route(
            "/api/v1/presentations/:id/viewed",
            post(presentations::handlers::handle_mark_viewed),
        )
        // Interview API
        .route(
            "/api/v1/interviews",
            get(interviews::handlers::handle_list).post(interviews::handlers::handle_create),
        )
        .route(
            "/api/v1/interviews/questions",
            post(interviews::handlers::handle_questions),
        )
        .route(
            "/api/v1/interviews/:id",
            get(interviews::handlers::handle_get).patch(interviews::handlers::handle_update),
        )
        .with_state(state)
}
