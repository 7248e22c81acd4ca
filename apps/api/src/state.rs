use std::sync::Arc;

use sqlx::PgPool;

use crate::courses::store::CourseStore;
use crate::llm_client::TextGenerator;
use crate::video_search::VideoSearch;

/// Shared application state injected into all route handlers via Axum
/// extractors. The three service adapters are trait objects constructed at
/// startup so tests can substitute fakes.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// LLM adapter. Production: `GeminiClient`.
    pub llm: Arc<dyn TextGenerator>,
    /// Video-search adapter. Production: `YouTubeClient`.
    pub video_search: Arc<dyn VideoSearch>,
    /// Write path for generated content. Production: `PgCourseStore`.
    pub store: Arc<dyn CourseStore>,
}
