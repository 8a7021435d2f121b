//! Error types for the YouTube client.

use thiserror::Error;

/// Result type for YouTube client operations.
pub type Result<T> = std::result::Result<T, YouTubeError>;

/// Reasons the Data API uses for quota and key problems.
const QUOTA_REASONS: &[&str] = &[
    "quotaExceeded",
    "dailyLimitExceeded",
    "rateLimitExceeded",
    "userRateLimitExceeded",
    "forbidden",
    "keyInvalid",
    "keyExpired",
    "accessNotConfigured",
];

/// YouTube client errors.
#[derive(Debug, Error)]
pub enum YouTubeError {
    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response. `reason` is the first `error.errors[].reason` the platform sent.
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        reason: Option<String>,
        message: String,
    },

    /// Parse error (unexpected response format)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl YouTubeError {
    /// HTTP status of an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            YouTubeError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Platform reason code of an API error, e.g. `commentsDisabled`.
    pub fn reason(&self) -> Option<&str> {
        match self {
            YouTubeError::Api { reason, .. } => reason.as_deref(),
            _ => None,
        }
    }

    pub fn is_comments_disabled(&self) -> bool {
        self.reason() == Some("commentsDisabled")
    }

    /// Quota or authorization denial.
    ///
    /// A 403 without a more specific reason is treated as quota-class, which is
    /// how the API reports a missing or restricted key.
    pub fn is_quota_exceeded(&self) -> bool {
        if let Some(reason) = self.reason() {
            if QUOTA_REASONS.contains(&reason) {
                return true;
            }
            if reason == "commentsDisabled" || reason == "videoNotFound" {
                return false;
            }
        }
        matches!(self.status(), Some(403) | Some(429))
    }

    pub fn is_not_found(&self) -> bool {
        self.reason() == Some("videoNotFound") || self.status() == Some(404)
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, YouTubeError::Network(e) if e.is_timeout())
    }
}
