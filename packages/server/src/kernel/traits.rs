// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Filtering, prompting and parsing live in the analysis domain and use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseVideoPlatform, BaseTextGenerator)

use async_trait::async_trait;
use futures::stream::BoxStream;
use thiserror::Error;

use crate::domains::analysis::VideoInfo;

// =============================================================================
// Video Platform Trait (Infrastructure - metadata and comments)
// =============================================================================

/// Failures a video platform can report, already classified.
#[derive(Debug, Clone, Error)]
pub enum PlatformError {
    #[error("video not found")]
    NotFound,

    #[error("comments are disabled")]
    CommentsDisabled,

    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("platform request failed: {0}")]
    Failed(String),
}

#[async_trait]
pub trait BaseVideoPlatform: Send + Sync {
    /// Title and channel for a video. `Ok(None)` when the platform knows no such video.
    async fn video_info(&self, video_id: &str) -> Result<Option<VideoInfo>, PlatformError>;

    /// Up to `limit` top-level comment texts in relevance order.
    async fn top_level_comments(
        &self,
        video_id: &str,
        limit: usize,
    ) -> Result<Vec<String>, PlatformError>;
}

// =============================================================================
// Text Generator Trait (Infrastructure - streaming LLM output)
// =============================================================================

#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    /// The request was rejected before any output arrived.
    #[error("generation request failed: {0}")]
    Request(String),

    /// The stream broke after it was opened.
    #[error("generation stream failed: {0}")]
    Stream(String),
}

/// Text fragments in arrival order.
pub type TextStream = BoxStream<'static, Result<String, GenerationError>>;

#[async_trait]
pub trait BaseTextGenerator: Send + Sync {
    /// Start generating a response to `prompt`.
    ///
    /// Returns once the stream is open; the caller decides how long to read.
    async fn stream_text(&self, prompt: &str) -> Result<TextStream, GenerationError>;
}
