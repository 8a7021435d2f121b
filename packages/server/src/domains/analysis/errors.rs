use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use super::models::ResponseEnvelope;
use crate::kernel::{GenerationError, PlatformError};

/// Every way an analysis request can fail.
///
/// Display strings are for logs. Clients only ever see [`code`](Self::code)
/// and [`public_message`](Self::public_message).
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Request body must contain videoUrl field")]
    InvalidRequest,

    #[error("Invalid YouTube URL: {0}")]
    InvalidUrl(String),

    #[error("Video not found")]
    VideoNotFound,

    #[error("Comments disabled")]
    CommentsDisabled,

    #[error("API quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("Failed to fetch from video platform: {0}")]
    FetchFailed(String),

    #[error("AI service error: {0}")]
    AiService(String),

    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl AnalysisError {
    pub fn status(&self) -> StatusCode {
        match self {
            AnalysisError::InvalidRequest
            | AnalysisError::InvalidUrl(_)
            | AnalysisError::CommentsDisabled => StatusCode::BAD_REQUEST,
            AnalysisError::VideoNotFound => StatusCode::NOT_FOUND,
            AnalysisError::QuotaExceeded(_) => StatusCode::TOO_MANY_REQUESTS,
            AnalysisError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AnalysisError::FetchFailed(_) | AnalysisError::AiService(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            AnalysisError::InvalidRequest => "INVALID_REQUEST",
            AnalysisError::InvalidUrl(_) => "INVALID_URL",
            AnalysisError::VideoNotFound => "VIDEO_NOT_FOUND",
            AnalysisError::CommentsDisabled => "COMMENTS_DISABLED",
            AnalysisError::QuotaExceeded(_) => "API_QUOTA_EXCEEDED",
            AnalysisError::AiService(_) => "AI_SERVICE_ERROR",
            AnalysisError::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            AnalysisError::FetchFailed(_) => "INTERNAL_ERROR",
        }
    }

    pub fn public_message(&self) -> &'static str {
        match self {
            AnalysisError::InvalidRequest => "Request body must contain videoUrl field",
            AnalysisError::InvalidUrl(_) => "Invalid or unsupported YouTube URL format",
            AnalysisError::VideoNotFound => "Video does not exist or is private",
            AnalysisError::CommentsDisabled => "Comments are disabled for this video",
            AnalysisError::QuotaExceeded(_) => {
                "YouTube API quota exceeded. Please try again later."
            }
            AnalysisError::AiService(_) => "Error in AI analysis service",
            AnalysisError::MethodNotAllowed => "Only POST requests are allowed",
            AnalysisError::FetchFailed(_) => "An unexpected error occurred",
        }
    }
}

impl From<PlatformError> for AnalysisError {
    fn from(err: PlatformError) -> Self {
        match err {
            PlatformError::NotFound => AnalysisError::VideoNotFound,
            PlatformError::CommentsDisabled => AnalysisError::CommentsDisabled,
            PlatformError::QuotaExceeded(detail) => AnalysisError::QuotaExceeded(detail),
            PlatformError::Failed(detail) => AnalysisError::FetchFailed(detail),
        }
    }
}

impl From<GenerationError> for AnalysisError {
    fn from(err: GenerationError) -> Self {
        AnalysisError::AiService(err.to_string())
    }
}

impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        let body = ResponseEnvelope::failure(self.code(), self.public_message());
        (self.status(), Json(body)).into_response()
    }
}
