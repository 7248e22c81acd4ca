//! Axum route handler for the content-generation API.

use axum::{extract::State, Json};

use crate::content::models::{GenerateContentRequest, GenerateContentResponse};
use crate::content::orchestrator::generate_course_content;
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/v1/courses/generate-content
///
/// Fills in per-chapter content for an approved course outline: one LLM call
/// and one video search per chapter, fanned out concurrently, aggregated in
/// outline order, persisted to the course row in a single write.
pub async fn handle_generate_content(
    State(state): State<AppState>,
    Json(request): Json<GenerateContentRequest>,
) -> Result<Json<GenerateContentResponse>, AppError> {
    if request.course_id.trim().is_empty() {
        return Err(AppError::Validation("courseId cannot be empty".to_string()));
    }

    let response = generate_course_content(
        state.store.as_ref(),
        state.llm.as_ref(),
        state.video_search.as_ref(),
        request,
    )
    .await?;

    Ok(Json(response))
}
