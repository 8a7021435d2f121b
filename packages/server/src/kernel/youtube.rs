//! YouTube Data API adapter for [`BaseVideoPlatform`].

use async_trait::async_trait;
use tracing::warn;
use youtube_client::{CommentOrder, YouTubeClient, YouTubeError};

use super::{BaseVideoPlatform, PlatformError};
use crate::domains::analysis::VideoInfo;

/// Wrapper around YouTubeClient that implements BaseVideoPlatform trait
pub struct YouTubeVideoPlatform(pub YouTubeClient);

impl YouTubeVideoPlatform {
    pub fn new(client: YouTubeClient) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BaseVideoPlatform for YouTubeVideoPlatform {
    async fn video_info(&self, video_id: &str) -> Result<Option<VideoInfo>, PlatformError> {
        let videos = self.0.list_videos(video_id).await.map_err(classify)?;

        let Some(video) = videos.into_iter().next() else {
            return Ok(None);
        };

        let snippet = video
            .snippet
            .ok_or_else(|| PlatformError::Failed(format!("video {} has no snippet", video_id)))?;

        Ok(Some(VideoInfo {
            title: snippet.title,
            channel_title: snippet.channel_title,
        }))
    }

    async fn top_level_comments(
        &self,
        video_id: &str,
        limit: usize,
    ) -> Result<Vec<String>, PlatformError> {
        let page_size = u32::try_from(limit).unwrap_or(u32::MAX);
        let threads = self
            .0
            .list_comment_threads(video_id, page_size, CommentOrder::Relevance)
            .await
            .map_err(classify)?;

        Ok(threads
            .iter()
            .map(|thread| thread.text().to_string())
            .collect())
    }
}

/// Comments-disabled is checked first: the platform reports it as a 403,
/// which would otherwise read as a quota problem.
fn classify(err: YouTubeError) -> PlatformError {
    if err.is_comments_disabled() {
        PlatformError::CommentsDisabled
    } else if err.is_not_found() {
        PlatformError::NotFound
    } else if err.is_quota_exceeded() {
        PlatformError::QuotaExceeded(err.to_string())
    } else {
        if err.is_timeout() {
            warn!(error = %err, "YouTube request timed out");
        }
        PlatformError::Failed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use youtube_client::api_error;

    fn google_error(status: u16, reason: &str) -> YouTubeError {
        let body = serde_json::json!({
            "error": {
                "code": status,
                "message": "details",
                "errors": [{"reason": reason, "message": "details"}]
            }
        });
        api_error(status, &body.to_string())
    }

    #[test]
    fn test_comments_disabled_wins_over_forbidden_status() {
        let err = classify(google_error(403, "commentsDisabled"));
        assert!(matches!(err, PlatformError::CommentsDisabled));
    }

    #[test]
    fn test_quota_reasons() {
        assert!(matches!(
            classify(google_error(403, "quotaExceeded")),
            PlatformError::QuotaExceeded(_)
        ));
        assert!(matches!(
            classify(google_error(429, "rateLimitExceeded")),
            PlatformError::QuotaExceeded(_)
        ));
    }

    #[test]
    fn test_video_not_found_reason() {
        assert!(matches!(
            classify(google_error(404, "videoNotFound")),
            PlatformError::NotFound
        ));
    }

    #[test]
    fn test_other_errors_fail_generically() {
        assert!(matches!(
            classify(google_error(500, "backendError")),
            PlatformError::Failed(_)
        ));
        assert!(matches!(
            classify(YouTubeError::Parse("bad json".into())),
            PlatformError::Failed(_)
        ));
    }
}
