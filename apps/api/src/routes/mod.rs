pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::content::handlers::handle_generate_content;
use crate::courses::handlers::{handle_get_course, handle_get_progress};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Content generation API
        .route(
            "/api/v1/courses/generate-content",
            post(handle_generate_content),
        )
        // Course read API
        .route("/api/v1/courses/:cid", get(handle_get_course))
        .route("/api/v1/courses/:cid/progress", get(handle_get_progress))
        .with_state(state)
}
