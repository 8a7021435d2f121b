//! Request-scoped data carried through one analysis.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Title metadata from the metadata fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoInfo {
    pub title: String,
    pub channel_title: String,
}

/// Sentiment label plus topics. Both are non-empty once they leave the extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub sentiment: String,
    pub topics: Vec<String>,
}

impl AnalysisResult {
    pub fn new(sentiment: impl Into<String>, topics: Vec<String>) -> Self {
        Self {
            sentiment: sentiment.into(),
            topics,
        }
    }

    /// Canned result for a video with nothing to analyze.
    pub fn no_comments() -> Self {
        Self::new("Mixed", vec!["No comments available for analysis".to_string()])
    }
}

/// Payload of a successful response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisData {
    pub video_id: String,
    pub video_title: String,
    pub comments_analyzed: usize,
    pub analysis: AnalysisResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: &'static str,
}

/// Exactly one of `data` / `error` is present on the wire.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Payload {
    Data(AnalysisData),
    Error(ErrorBody),
}

/// JSON body of every response this service produces.
///
/// ```json
/// {"success": true, "data": {...}, "timestamp": "2024-05-01T12:00:00.000Z"}
/// {"success": false, "error": {"code": "INVALID_URL", "message": "..."}, "timestamp": "..."}
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ResponseEnvelope {
    pub success: bool,
    #[serde(flatten)]
    pub payload: Payload,
    pub timestamp: String,
}

impl ResponseEnvelope {
    pub fn success(data: AnalysisData) -> Self {
        Self {
            success: true,
            payload: Payload::Data(data),
            timestamp: now_timestamp(),
        }
    }

    pub fn failure(code: &'static str, message: &'static str) -> Self {
        Self {
            success: false,
            payload: Payload::Error(ErrorBody { code, message }),
            timestamp: now_timestamp(),
        }
    }
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let envelope = ResponseEnvelope::success(AnalysisData {
            video_id: "abc".into(),
            video_title: "Title".into(),
            comments_analyzed: 3,
            analysis: AnalysisResult::new("Positive", vec!["music".into()]),
        });

        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["videoId"], "abc");
        assert_eq!(json["data"]["commentsAnalyzed"], 3);
        assert_eq!(json["data"]["analysis"]["topics"][0], "music");
        assert!(json.get("error").is_none());
        assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_failure_envelope_shape() {
        let envelope = ResponseEnvelope::failure("INVALID_URL", "bad url");

        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "INVALID_URL");
        assert_eq!(json["error"]["message"], "bad url");
        assert!(json.get("data").is_none());
    }
}
