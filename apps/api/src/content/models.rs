//! Request, response, and result types for the content-generation pipeline.

use serde::{Deserialize, Serialize};

use crate::video_search::VideoRef;

// ────────────────────────────────────────────────────────────────────────────
// Inbound request
// ────────────────────────────────────────────────────────────────────────────

/// Request body for chapter-content generation. The outline is the
/// user-approved course skeleton produced by the layout step; it is
/// immutable input here.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub course_outline: Option<CourseOutline>,
    pub course_title: String,
    pub course_id: String,
}

/// Outline wrapper. `chapters` stays optional so a missing list is a
/// validation error surfaced by the orchestrator, not a 422 from serde.
#[derive(Debug, Clone, Deserialize)]
pub struct CourseOutline {
    pub chapters: Option<Vec<ChapterOutline>>,
}

/// One chapter of the outline: a name plus its ordered topic names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterOutline {
    pub chapter_name: String,
    #[serde(default)]
    pub topics: Vec<String>,
    /// Estimated duration carried through from the layout step, if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Generated content
// ────────────────────────────────────────────────────────────────────────────

/// Per-topic rich-text payload produced by the LLM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicContent {
    pub topic: String,
    /// HTML content as a string; the prompt requires it to be JSON-escaped.
    pub content: String,
}

/// Successfully parsed chapter content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedChapter {
    pub chapter_name: String,
    pub topics: Vec<TopicContent>,
}

/// Degraded chapter content substituted when the LLM output fails to parse.
/// Carries the raw (truncated) model output for later inspection or retry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackChapter {
    pub chapter_name: String,
    pub error: String,
    pub raw_response: String,
}

/// Chapter content as stored and returned: either the parsed structure or
/// the fallback record. Both are successes from the request's point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChapterContent {
    Parsed(ParsedChapter),
    Fallback(FallbackChapter),
}

// ────────────────────────────────────────────────────────────────────────────
// Aggregation
// ────────────────────────────────────────────────────────────────────────────

/// Everything produced for one chapter: parsed (or fallback) content plus
/// the matching video references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterResult {
    pub content: ChapterContent,
    pub videos: Vec<VideoRef>,
}

/// A chapter whose pipeline failed outright (LLM call error or video-search
/// error). Recorded alongside successes; never aborts sibling chapters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureInfo {
    pub chapter: String,
    pub reason: String,
}

/// Settled outcome for one chapter, in input position. The full ordered
/// list of these is what gets persisted, successes and failures both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChapterOutcome {
    Success(ChapterResult),
    Failure(FailureInfo),
}

// ────────────────────────────────────────────────────────────────────────────
// Response
// ────────────────────────────────────────────────────────────────────────────

/// Response body: successes and (if any) failures, each preserving input
/// chapter order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    pub course_title: String,
    pub results: Vec<ChapterResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_chapters: Option<Vec<FailureInfo>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chapter_content_untagged_roundtrip() {
        let parsed = ChapterContent::Parsed(ParsedChapter {
            chapter_name: "Ownership".to_string(),
            topics: vec![TopicContent {
                topic: "Moves".to_string(),
                content: "<p>Values move.</p>".to_string(),
            }],
        });
        let json = serde_json::to_string(&parsed).unwrap();
        let back: ChapterContent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, parsed);
    }

    #[test]
    fn test_fallback_deserializes_as_fallback_variant() {
        let json = r#"{
            "chapterName": "Ownership",
            "error": "parse failed",
            "rawResponse": "not json at all"
        }"#;
        let content: ChapterContent = serde_json::from_str(json).unwrap();
        assert!(matches!(content, ChapterContent::Fallback(_)));
    }

    #[test]
    fn test_request_accepts_missing_outline() {
        let json = r#"{"courseTitle": "Rust 101", "courseId": "c-1"}"#;
        let req: GenerateContentRequest = serde_json::from_str(json).unwrap();
        assert!(req.course_outline.is_none());
    }

    #[test]
    fn test_response_omits_empty_failure_list() {
        let resp = GenerateContentResponse {
            course_title: "Rust 101".to_string(),
            results: vec![],
            failed_chapters: None,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("failedChapters").is_none());
        assert_eq!(json["courseTitle"], "Rust 101");
    }
}
