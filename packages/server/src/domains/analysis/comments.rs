//! Metadata and comment fetching on top of [`BaseVideoPlatform`].

use tracing::{debug, info};

use super::errors::AnalysisError;
use super::models::VideoInfo;
use crate::kernel::BaseVideoPlatform;

/// Comments shorter than this ("lol", "nice") are dropped before analysis.
pub const MIN_COMMENT_CHARS: usize = 10;

/// Maximum number of comments sent to the model.
pub const MAX_COMMENTS: usize = 50;

/// Look up title and channel. Zero results is `VideoNotFound`.
pub async fn fetch_video_info(
    platform: &dyn BaseVideoPlatform,
    video_id: &str,
) -> Result<VideoInfo, AnalysisError> {
    let info = platform
        .video_info(video_id)
        .await?
        .ok_or(AnalysisError::VideoNotFound)?;

    info!(video_id, title = %info.title, channel = %info.channel_title, "Fetched video metadata");
    Ok(info)
}

/// Fetch up to [`MAX_COMMENTS`] top-level comments in relevance order.
///
/// An empty result is valid; the caller decides what to do with it.
pub async fn fetch_comments(
    platform: &dyn BaseVideoPlatform,
    video_id: &str,
) -> Result<Vec<String>, AnalysisError> {
    let raw = platform.top_level_comments(video_id, MAX_COMMENTS).await?;
    let fetched = raw.len();
    let comments = select_comments(raw);

    debug!(video_id, fetched, kept = comments.len(), "Filtered comments");
    Ok(comments)
}

/// Drop short comments, then cap at [`MAX_COMMENTS`]. Order is preserved.
pub fn select_comments(raw: impl IntoIterator<Item = String>) -> Vec<String> {
    raw.into_iter()
        .filter(|comment| comment.chars().count() >= MIN_COMMENT_CHARS)
        .take(MAX_COMMENTS)
        .collect()
}
