use serde::{Deserialize, Serialize};

/// Response of `videos.list`.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<Video>,
}

/// A single video resource (only the parts this client requests).
#[derive(Debug, Clone, Deserialize)]
pub struct Video {
    pub id: String,
    pub snippet: Option<VideoSnippet>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    pub title: String,
    #[serde(default)]
    pub channel_title: String,
}

/// Response of `commentThreads.list`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadListResponse {
    #[serde(default)]
    pub items: Vec<CommentThread>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentThread {
    pub id: Option<String>,
    pub snippet: CommentThreadSnippet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadSnippet {
    pub top_level_comment: Comment,
    #[serde(default)]
    pub total_reply_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    pub snippet: CommentSnippet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentSnippet {
    #[serde(default)]
    pub text_display: String,
    pub text_original: Option<String>,
    pub author_display_name: Option<String>,
    #[serde(default)]
    pub like_count: u64,
}

impl CommentThread {
    /// Displayed text of the top-level comment.
    pub fn text(&self) -> &str {
        &self.snippet.top_level_comment.snippet.text_display
    }
}

/// Ordering accepted by `commentThreads.list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CommentOrder {
    #[default]
    Relevance,
    Time,
}

impl CommentOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommentOrder::Relevance => "relevance",
            CommentOrder::Time => "time",
        }
    }
}

/// Error envelope returned by Google APIs on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    pub reason: Option<String>,
    pub domain: Option<String>,
    pub message: Option<String>,
}
