//! Video search — YouTube Data API adapter that finds companion videos for a
//! chapter. Carried in `AppState` as `Arc<dyn VideoSearch>`; the orchestrator
//! issues at most one search per chapter, keyed by chapter name.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const YOUTUBE_SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";
/// Result-count hint sent to the search endpoint.
const MAX_RESULTS: u32 = 4;

#[derive(Debug, Error)]
pub enum VideoSearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// A single video reference attached to a chapter. Ordering follows the
/// upstream service's ranking; no dedup is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRef {
    pub video_id: String,
    pub title: String,
}

/// A video-search backend. Unlike LLM parse failures, a search failure is a
/// hard error for the chapter — the caller records it, never swallows it.
#[async_trait]
pub trait VideoSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<VideoRef>, VideoSearchError>;
}

// ────────────────────────────────────────────────────────────────────────────
// YouTube wire format
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: Option<SearchItemId>,
    snippet: Option<Snippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: Option<String>,
}

fn map_items(items: Vec<SearchItem>) -> Vec<VideoRef> {
    items
        .into_iter()
        .filter_map(|item| {
            let video_id = item.id?.video_id?;
            let title = item.snippet.and_then(|s| s.title).unwrap_or_default();
            Some(VideoRef { video_id, title })
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// Production `VideoSearch` backed by the YouTube Data API v3 `search`
/// endpoint (`part=snippet`, `type=video`).
#[derive(Clone)]
pub struct YouTubeClient {
    client: Client,
    api_key: String,
}

impl YouTubeClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }
}

#[async_trait]
impl VideoSearch for YouTubeClient {
    async fn search(&self, query: &str) -> Result<Vec<VideoRef>, VideoSearchError> {
        let max_results = MAX_RESULTS.to_string();
        let response = self
            .client
            .get(YOUTUBE_SEARCH_URL)
            .query(&[
                ("part", "snippet"),
                ("q", query),
                ("maxResults", max_results.as_str()),
                ("type", "video"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(VideoSearchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let decoded: SearchListResponse = response.json().await?;
        let videos = map_items(decoded.items);

        debug!("YouTube search for {query:?} returned {} videos", videos.len());

        Ok(videos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_items_extracts_id_and_title() {
        let json = r#"{
            "items": [
                {
                    "id": {"kind": "youtube#video", "videoId": "dQw4w9WgXcQ"},
                    "snippet": {"title": "Intro to Ownership"}
                },
                {
                    "id": {"kind": "youtube#video", "videoId": "abc123xyz00"},
                    "snippet": {"title": "Borrowing Deep Dive"}
                }
            ]
        }"#;
        let resp: SearchListResponse = serde_json::from_str(json).unwrap();
        let videos = map_items(resp.items);
        assert_eq!(
            videos,
            vec![
                VideoRef {
                    video_id: "dQw4w9WgXcQ".to_string(),
                    title: "Intro to Ownership".to_string(),
                },
                VideoRef {
                    video_id: "abc123xyz00".to_string(),
                    title: "Borrowing Deep Dive".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_map_items_skips_entries_without_video_id() {
        let json = r#"{
            "items": [
                {"id": {"kind": "youtube#channel", "channelId": "UC123"},
                 "snippet": {"title": "Some Channel"}},
                {"id": {"videoId": "vid1"}, "snippet": {"title": "Kept"}}
            ]
        }"#;
        let resp: SearchListResponse = serde_json::from_str(json).unwrap();
        let videos = map_items(resp.items);
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].video_id, "vid1");
    }

    #[test]
    fn test_video_ref_serializes_camel_case() {
        let video = VideoRef {
            video_id: "vid1".to_string(),
            title: "Title".to_string(),
        };
        let json = serde_json::to_value(&video).unwrap();
        assert_eq!(json["videoId"], "vid1");
        assert_eq!(json["title"], "Title");
    }
}
