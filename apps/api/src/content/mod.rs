// Chapter-content generation: prompt construction, output sanitization,
// concurrent per-chapter fan-out, order-preserving aggregation.
// All LLM calls go through llm_client; all searches through video_search.

pub mod handlers;
pub mod models;
pub mod orchestrator;
pub mod prompts;
pub mod sanitize;
