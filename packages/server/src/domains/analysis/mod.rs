pub mod activities;
pub mod collector;
pub mod comments;
pub mod errors;
pub mod json_extract;
pub mod models;
pub mod prompt;
pub mod video_url;

// Re-export commonly used types
pub use activities::analyze_video;
pub use errors::AnalysisError;
pub use json_extract::{extract_analysis, BalanceRepair, JsonExtractor, JsonRepair};
pub use models::{AnalysisData, AnalysisResult, ResponseEnvelope, VideoInfo};
pub use video_url::{extract_video_id, VideoReference};
