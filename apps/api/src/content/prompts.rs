//! LLM prompt constants for chapter-content generation.

use crate::content::models::ChapterOutline;

/// Instruction template prepended to the serialized chapter. Enforces a
/// single JSON object with escaped HTML so the outer payload stays valid.
pub const CHAPTER_CONTENT_PROMPT: &str = r#"Generate educational content for the given chapter and topics.

IMPORTANT: Respond with ONLY valid JSON, no additional text or formatting.

Required JSON Schema:
{
  "chapterName": "string",
  "topics": [
    {
      "topic": "string",
      "content": "HTML content as string - escape all quotes properly"
    }
  ]
}

Rules:
1. All HTML content must be properly escaped for JSON
2. Use single quotes in HTML attributes or escape double quotes
3. No markdown code blocks in response
4. No additional text outside the JSON object
5. Cover every listed topic, in the given order

Chapter and Topics:
"#;

/// Builds the generation prompt for one chapter by appending the serialized
/// chapter to the instruction template.
pub fn build_chapter_prompt(chapter: &ChapterOutline) -> Result<String, serde_json::Error> {
    let chapter_json = serde_json::to_string(chapter)?;
    Ok(format!("{CHAPTER_CONTENT_PROMPT}{chapter_json}"))
}
