//! Course persistence — the single write path for generated content.
//!
//! The orchestrator performs exactly one `update_content` call per request,
//! after every chapter pipeline has settled. Trait-based so tests can count
//! writes without a database.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use tracing::info;

/// Keyed partial-update interface over the `courses` table.
#[async_trait]
pub trait CourseStore: Send + Sync {
    /// Sets the content column for the course matching `course_id`.
    async fn update_content(&self, course_id: &str, content: &Value) -> Result<()>;
}

/// Production `CourseStore` backed by PostgreSQL.
pub struct PgCourseStore {
    pool: PgPool,
}

impl PgCourseStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CourseStore for PgCourseStore {
    async fn update_content(&self, course_id: &str, content: &Value) -> Result<()> {
        let result = sqlx::query(
            "UPDATE courses SET course_content = $1, updated_at = NOW() WHERE cid = $2",
        )
        .bind(content)
        .bind(course_id)
        .execute(&self.pool)
        .await?;

        info!(
            "Persisted generated content for course {} ({} row updated)",
            course_id,
            result.rows_affected()
        );
        Ok(())
    }
}
