//! Content-generation orchestrator.
//!
//! Flow: validate outline → fan out one chapter pipeline per chapter (all
//! launched together) → join → persist the full ordered outcome list in a
//! single write → shape the response.
//!
//! Each chapter pipeline is generate → sanitize/parse → video search →
//! combine. Failures are caught at chapter granularity: a failed pipeline
//! becomes a `FailureInfo` entry and never aborts its siblings. Aggregation
//! is order-preserving by index, not by completion order. The orchestrator
//! itself never retries and enforces no timeout; each adapter's HTTP client
//! defaults apply.

use futures::future::join_all;
use tracing::{info, warn};

use crate::content::models::{
    ChapterContent, ChapterOutcome, ChapterOutline, ChapterResult, FailureInfo, FallbackChapter,
    GenerateContentRequest, GenerateContentResponse,
};
use crate::content::prompts::build_chapter_prompt;
use crate::content::sanitize::{parse_chapter_content, truncate_raw, ParseOutcome};
use crate::courses::store::CourseStore;
use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::video_search::VideoSearch;

/// Error text stored in a fallback record when LLM output fails to parse.
const PARSE_FAILED: &str = "parse failed";

/// Runs the full generation request: fan-out, aggregation, persistence,
/// response shaping.
///
/// Validation happens before any outbound call or write. The persistence
/// write always carries the full unfiltered outcome list — successes and
/// failure markers both — so the store reflects exactly what was computed.
pub async fn generate_course_content(
    store: &dyn CourseStore,
    llm: &dyn TextGenerator,
    videos: &dyn VideoSearch,
    request: GenerateContentRequest,
) -> Result<GenerateContentResponse, AppError> {
    let chapters = request
        .course_outline
        .and_then(|outline| outline.chapters)
        .ok_or_else(|| {
            AppError::Validation("Invalid request: courseOutline.chapters is required".to_string())
        })?;

    info!(
        "Generating content for course {} ({} chapters)",
        request.course_id,
        chapters.len()
    );

    // Fan-out: every chapter pipeline launched together. join_all preserves
    // input order regardless of completion order.
    let outcomes = join_all(
        chapters
            .iter()
            .map(|chapter| run_chapter_pipeline(llm, videos, chapter)),
    )
    .await;

    let outcomes: Vec<ChapterOutcome> = outcomes
        .into_iter()
        .map(|result| match result {
            Ok(success) => ChapterOutcome::Success(success),
            Err(failure) => ChapterOutcome::Failure(failure),
        })
        .collect();

    // Single terminal write, after the join. The external calls above are
    // sunk cost at this point; a write failure surfaces as a server error.
    let content = serde_json::to_value(&outcomes)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize content: {e}")))?;
    store
        .update_content(&request.course_id, &content)
        .await
        .map_err(|e| AppError::Persistence(e.to_string()))?;

    let mut results = Vec::new();
    let mut failed_chapters = Vec::new();
    for outcome in outcomes {
        match outcome {
            ChapterOutcome::Success(result) => results.push(result),
            ChapterOutcome::Failure(failure) => failed_chapters.push(failure),
        }
    }

    if !failed_chapters.is_empty() {
        warn!(
            "Course {}: {} of {} chapters failed",
            request.course_id,
            failed_chapters.len(),
            results.len() + failed_chapters.len()
        );
    }

    Ok(GenerateContentResponse {
        course_title: request.course_title,
        results,
        failed_chapters: (!failed_chapters.is_empty()).then_some(failed_chapters),
    })
}

/// One chapter's pipeline: prompt → LLM → sanitize/parse → video search →
/// combine. Any error is converted to `FailureInfo` here; nothing escapes.
///
/// A parse miss is NOT an error — it degrades to a fallback record and the
/// chapter still succeeds. An LLM call failure or video-search failure is an
/// error for this chapter only.
async fn run_chapter_pipeline(
    llm: &dyn TextGenerator,
    videos: &dyn VideoSearch,
    chapter: &ChapterOutline,
) -> Result<ChapterResult, FailureInfo> {
    let fail = |reason: String| FailureInfo {
        chapter: chapter.chapter_name.clone(),
        reason,
    };

    let prompt = build_chapter_prompt(chapter)
        .map_err(|e| fail(format!("Failed to serialize chapter: {e}")))?;

    let raw = llm
        .generate(&prompt)
        .await
        .map_err(|e| fail(format!("LLM call failed: {e}")))?;

    let content = match parse_chapter_content(&raw) {
        ParseOutcome::Parsed(parsed) => ChapterContent::Parsed(parsed),
        ParseOutcome::Unparsed(raw) => {
            warn!(
                "Chapter {:?}: LLM output failed to parse, storing fallback",
                chapter.chapter_name
            );
            ChapterContent::Fallback(FallbackChapter {
                chapter_name: chapter.chapter_name.clone(),
                error: PARSE_FAILED.to_string(),
                raw_response: truncate_raw(&raw),
            })
        }
    };

    let videos = videos
        .search(&chapter.chapter_name)
        .await
        .map_err(|e| fail(format!("Video search failed: {e}")))?;

    Ok(ChapterResult { content, videos })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
