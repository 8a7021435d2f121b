//! Pure YouTube Data API v3 REST client.
//!
//! A minimal, key-authenticated client for the two read endpoints the comment
//! analyzer needs: `videos.list` and `commentThreads.list`. Errors keep the
//! platform's own `reason` code so callers can classify them without looking at
//! message text.
//!
//! # Example
//!
//! ```rust,ignore
//! use youtube_client::{CommentOrder, YouTubeClient};
//!
//! let client = YouTubeClient::new("api-key".into());
//!
//! let videos = client.list_videos("dQw4w9WgXcQ").await?;
//! let threads = client
//!     .list_comment_threads("dQw4w9WgXcQ", 50, CommentOrder::Relevance)
//!     .await?;
//! for thread in &threads {
//!     println!("{}", thread.text());
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{Result, YouTubeError};
pub use types::{
    Comment, CommentOrder, CommentSnippet, CommentThread, CommentThreadSnippet, Video,
    VideoSnippet,
};

use serde::de::DeserializeOwned;
use std::time::Duration;
use types::{CommentThreadListResponse, ErrorResponse, VideoListResponse};

const BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Upper bound the API accepts for `maxResults` on comment threads.
pub const MAX_COMMENT_PAGE_SIZE: u32 = 100;

#[derive(Clone)]
pub struct YouTubeClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl YouTubeClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Bound every request by `timeout`. A timed-out call fails with a network error.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    /// Set a custom base URL (for mock servers, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `videos.list` with `part=snippet` for a single id.
    ///
    /// An unknown id is not an error at this level: the API answers 200 with
    /// an empty `items` array.
    pub async fn list_videos(&self, video_id: &str) -> Result<Vec<Video>> {
        let response: VideoListResponse = self
            .get("videos", &[("part", "snippet"), ("id", video_id)])
            .await?;

        tracing::debug!(video_id, count = response.items.len(), "Listed videos");
        Ok(response.items)
    }

    /// `commentThreads.list` for top-level comments of a video, single page.
    pub async fn list_comment_threads(
        &self,
        video_id: &str,
        max_results: u32,
        order: CommentOrder,
    ) -> Result<Vec<CommentThread>> {
        let max_results = max_results.clamp(1, MAX_COMMENT_PAGE_SIZE).to_string();
        let response: CommentThreadListResponse = self
            .get(
                "commentThreads",
                &[
                    ("part", "snippet"),
                    ("videoId", video_id),
                    ("maxResults", max_results.as_str()),
                    ("order", order.as_str()),
                    ("textFormat", "plainText"),
                ],
            )
            .await?;

        tracing::debug!(
            video_id,
            count = response.items.len(),
            has_more = response.next_page_token.is_some(),
            "Listed comment threads"
        );
        Ok(response.items)
    }

    async fn get<T: DeserializeOwned>(&self, resource: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}/{}", self.base_url, resource);
        let resp = self
            .client
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let err = api_error(status.as_u16(), &body);
            tracing::warn!(resource, error = %err, reason = ?err.reason(), "YouTube API error");
            return Err(err);
        }

        let body = resp.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| YouTubeError::Parse(format!("Failed to decode {} response: {}", resource, e)))
    }
}

/// Build an [`YouTubeError::Api`] from a non-2xx status and its body.
///
/// Bodies that are not the standard Google error envelope keep the raw text as
/// the message and carry no reason.
pub fn api_error(status: u16, body: &str) -> YouTubeError {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(parsed) => YouTubeError::Api {
            status,
            reason: parsed.error.errors.iter().find_map(|e| e.reason.clone()),
            message: parsed.error.message,
        },
        Err(_) => YouTubeError::Api {
            status,
            reason: None,
            message: body.chars().take(200).collect(),
        },
    }
}
