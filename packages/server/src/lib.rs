// YouTube Comment Analyzer - API Core
//
// Fetches comments for a video, asks Gemini for sentiment and topics, and
// returns a JSON envelope. External platforms sit behind kernel traits so the
// analysis domain can be exercised without network access.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
