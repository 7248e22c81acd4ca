//! Best-effort sanitization of LLM output into structured chapter content.
//!
//! Pipeline: strip code fences → trim → extract first balanced `{...}` span
//! → parse. Each step tolerates model misbehavior (fenced output, leading or
//! trailing prose); a parse miss yields `ParseOutcome::Unparsed` with the
//! original text, never an error. Failures never cross the chapter boundary.

use crate::content::models::ParsedChapter;

/// Max characters of raw model output kept in a fallback record.
pub const RAW_RESPONSE_LIMIT: usize = 1000;

/// Tagged result of the sanitize/parse pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    Parsed(ParsedChapter),
    /// The raw (untruncated) model output; callers truncate when persisting.
    Unparsed(String),
}

/// Runs the full pipeline on raw LLM output.
pub fn parse_chapter_content(raw: &str) -> ParseOutcome {
    let cleaned = strip_code_fences(raw);
    let cleaned = cleaned.trim();
    let candidate = extract_json_object(cleaned).unwrap_or(cleaned);

    match serde_json::from_str::<ParsedChapter>(candidate) {
        Ok(parsed) => ParseOutcome::Parsed(parsed),
        Err(_) => ParseOutcome::Unparsed(raw.to_string()),
    }
}

/// Removes every ```json and ``` fence marker, wherever it appears. The
/// model sometimes fences mid-response, so this is a global strip rather
/// than a prefix/suffix match.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "")
}

/// Extracts the first balanced `{...}` span from `text`, tolerating prose
/// on either side. Braces inside JSON string literals (and escaped quotes
/// within them) do not affect the balance count. Returns `None` when no
/// balanced object exists.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let bytes = text.as_bytes();

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &b) in bytes[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Truncates raw model output for storage in a fallback record, respecting
/// char boundaries.
pub fn truncate_raw(raw: &str) -> String {
    raw.chars().take(RAW_RESPONSE_LIMIT).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::models::TopicContent;

    #[test]
    fn test_fenced_json_parses() {
        let raw = "```json\n{\"chapterName\":\"X\",\"topics\":[]}\n```";
        let outcome = parse_chapter_content(raw);
        assert_eq!(
            outcome,
            ParseOutcome::Parsed(ParsedChapter {
                chapter_name: "X".to_string(),
                topics: vec![],
            })
        );
    }

    #[test]
    fn test_bare_fence_without_json_tag_parses() {
        let raw = "```\n{\"chapterName\":\"X\",\"topics\":[]}\n```";
        assert!(matches!(parse_chapter_content(raw), ParseOutcome::Parsed(_)));
    }

    #[test]
    fn test_surrounding_prose_is_tolerated() {
        let raw = "Sure! Here is the content you asked for:\n\
                   {\"chapterName\":\"Ownership\",\"topics\":[{\"topic\":\"Moves\",\"content\":\"<p>ok</p>\"}]}\n\
                   Let me know if you need anything else.";
        let outcome = parse_chapter_content(raw);
        match outcome {
            ParseOutcome::Parsed(parsed) => {
                assert_eq!(parsed.chapter_name, "Ownership");
                assert_eq!(
                    parsed.topics,
                    vec![TopicContent {
                        topic: "Moves".to_string(),
                        content: "<p>ok</p>".to_string(),
                    }]
                );
            }
            ParseOutcome::Unparsed(_) => panic!("expected parse to succeed"),
        }
    }

    #[test]
    fn test_garbage_yields_unparsed_with_original_text() {
        let raw = "I'm sorry, I cannot generate that content.";
        assert_eq!(
            parse_chapter_content(raw),
            ParseOutcome::Unparsed(raw.to_string())
        );
    }

    #[test]
    fn test_extract_json_object_is_balanced_not_greedy() {
        let text = r#"first {"a": {"b": 1}} then {"c": 2}"#;
        assert_eq!(extract_json_object(text), Some(r#"{"a": {"b": 1}}"#));
    }

    #[test]
    fn test_extract_json_object_ignores_braces_in_strings() {
        let text = r#"{"content": "<div style=\"x\">{not a brace}</div>"}"#;
        assert_eq!(extract_json_object(text), Some(text));
    }

    #[test]
    fn test_extract_json_object_none_when_unbalanced() {
        assert_eq!(extract_json_object(r#"{"a": 1"#), None);
        assert_eq!(extract_json_object("no braces here"), None);
    }

    #[test]
    fn test_unbalanced_object_falls_back_to_unparsed() {
        let raw = "{\"chapterName\": \"X\", \"topics\": [";
        assert!(matches!(
            parse_chapter_content(raw),
            ParseOutcome::Unparsed(_)
        ));
    }

    #[test]
    fn test_truncate_raw_caps_at_limit() {
        let long = "x".repeat(RAW_RESPONSE_LIMIT + 500);
        assert_eq!(truncate_raw(&long).chars().count(), RAW_RESPONSE_LIMIT);
        assert_eq!(truncate_raw("short"), "short");
    }

    #[test]
    fn test_truncate_raw_respects_char_boundaries() {
        let multi: String = "é".repeat(RAW_RESPONSE_LIMIT + 10);
        let truncated = truncate_raw(&multi);
        assert_eq!(truncated.chars().count(), RAW_RESPONSE_LIMIT);
    }
}
