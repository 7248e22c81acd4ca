//! Axum route handlers for course reads and enrollment progress.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::courses::progress::progress_percent;
use crate::errors::AppError;
use crate::models::course::{CourseRow, EnrollmentRow};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserEmailQuery {
    pub user_email: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseProgressResponse {
    pub cid: String,
    pub completed_chapters: usize,
    pub total_chapters: usize,
    pub progress_percent: f64,
}

/// GET /api/v1/courses/:cid
///
/// Returns the full course row, including any generated content.
pub async fn handle_get_course(
    State(state): State<AppState>,
    Path(cid): Path<String>,
) -> Result<Json<CourseRow>, AppError> {
    let course = sqlx::query_as::<_, CourseRow>("SELECT * FROM courses WHERE cid = $1")
        .bind(&cid)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Course {cid} not found")))?;

    Ok(Json(course))
}

/// GET /api/v1/courses/:cid/progress?user_email=...
///
/// Returns the user's completion percentage for a course. A course with no
/// generated content reports 0% rather than dividing by zero.
pub async fn handle_get_progress(
    State(state): State<AppState>,
    Path(cid): Path<String>,
    Query(params): Query<UserEmailQuery>,
) -> Result<Json<CourseProgressResponse>, AppError> {
    let course = sqlx::query_as::<_, CourseRow>("SELECT * FROM courses WHERE cid = $1")
        .bind(&cid)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Course {cid} not found")))?;

    let enrollment = sqlx::query_as::<_, EnrollmentRow>(
        "SELECT * FROM enrollments WHERE cid = $1 AND user_email = $2",
    )
    .bind(&cid)
    .bind(&params.user_email)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| {
        AppError::NotFound(format!(
            "No enrollment for {} in course {cid}",
            params.user_email
        ))
    })?;

    let completed = enrollment.completed_chapter_count();
    let total = course.content_chapter_count();

    Ok(Json(CourseProgressResponse {
        cid,
        completed_chapters: completed,
        total_chapters: total,
        progress_percent: progress_percent(completed, total),
    }))
}
