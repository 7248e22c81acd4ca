use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// A course row. `course_json` holds the user-approved outline;
/// `course_content` holds the aggregated generation result (chapter
/// successes and failure markers, in outline order) once the content
/// pipeline has run.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CourseRow {
    pub id: Uuid,
    pub cid: String,
    pub name: String,
    pub user_email: String,
    pub course_json: Option<Value>,
    pub course_content: Option<Value>,
    pub banner_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An enrollment row. `completed_chapters` is a JSON array of chapter
/// indices the user has finished.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EnrollmentRow {
    pub id: Uuid,
    pub cid: String,
    pub user_email: String,
    pub completed_chapters: Option<Value>,
    pub created_at: DateTime<Utc>,
}

impl CourseRow {
    /// Number of chapters in the generated content, 0 when content has not
    /// been generated yet.
    pub fn content_chapter_count(&self) -> usize {
        self.course_content
            .as_ref()
            .and_then(|v| v.as_array())
            .map(|a| a.len())
            .unwrap_or(0)
    }
}

impl EnrollmentRow {
    pub fn completed_chapter_count(&self) -> usize {
        self.completed_chapters
            .as_ref()
            .and_then(|v| v.as_array())
            .map(|a| a.len())
            .unwrap_or(0)
    }
}
