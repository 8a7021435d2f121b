//! Video identifier extraction from user-supplied URLs.

use lazy_static::lazy_static;
use regex::Regex;

use super::errors::AnalysisError;

lazy_static! {
    // watch?v=<id>, youtu.be/<id>, embed/<id>
    static ref COMBINED_PATTERN: Regex = Regex::new(
        r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)([^&\n?#]+)"
    ).unwrap();

    // watch?...&v=<id> with other query parameters first
    static ref WATCH_QUERY_PATTERN: Regex = Regex::new(
        r"youtube\.com/watch\?.*v=([^&\n?#]+)"
    ).unwrap();

    static ref SHORT_LINK_PATTERN: Regex = Regex::new(
        r"youtu\.be/([^&\n?#]+)"
    ).unwrap();
}

/// A user-supplied URL and the identifier captured from it.
///
/// The identifier is taken as captured, without validating it against the
/// platform's id grammar. A bogus id surfaces later as "video not found".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoReference {
    pub raw_url: String,
    pub video_id: String,
}

impl VideoReference {
    pub fn parse(raw_url: &str) -> Result<Self, AnalysisError> {
        extract_video_id(raw_url)
            .map(|video_id| Self {
                raw_url: raw_url.to_string(),
                video_id: video_id.to_string(),
            })
            .ok_or_else(|| AnalysisError::InvalidUrl(raw_url.to_string()))
    }
}

/// First identifier captured by the accepted URL shapes, tried in order.
pub fn extract_video_id(url: &str) -> Option<&str> {
    [&*COMBINED_PATTERN, &*WATCH_QUERY_PATTERN, &*SHORT_LINK_PATTERN]
        .into_iter()
        .find_map(|pattern| pattern.captures(url))
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}
