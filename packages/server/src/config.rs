use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

use crate::kernel::GEMINI_2_5_PRO;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub youtube_api_key: String,
    pub youtube_timeout: Duration,
    pub google_cloud_project: String,
    pub vertex_ai_location: String,
    pub google_cloud_access_token: Option<String>,
    pub gemini_model: String,
    pub ai_stream_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            youtube_api_key: env::var("YOUTUBE_API_KEY")
                .context("YOUTUBE_API_KEY must be set")?,
            youtube_timeout: seconds_var("YOUTUBE_TIMEOUT_SECS", 10)?,
            google_cloud_project: env::var("GOOGLE_CLOUD_PROJECT")
                .context("GOOGLE_CLOUD_PROJECT must be set")?,
            vertex_ai_location: env::var("VERTEX_AI_LOCATION")
                .context("VERTEX_AI_LOCATION must be set")?,
            google_cloud_access_token: env::var("GOOGLE_CLOUD_ACCESS_TOKEN").ok(),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| GEMINI_2_5_PRO.to_string()),
            ai_stream_timeout: seconds_var("AI_STREAM_TIMEOUT_SECS", 30)?,
        })
    }
}

fn seconds_var(name: &str, default: u64) -> Result<Duration> {
    let secs = match env::var(name) {
        Ok(value) => value
            .parse()
            .with_context(|| format!("{} must be a whole number of seconds", name))?,
        Err(_) => default,
    };
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Only test in the crate that touches the process environment
    #[test]
    fn test_defaults_for_optional_settings() {
        env::set_var("YOUTUBE_API_KEY", "yt-key");
        env::set_var("GOOGLE_CLOUD_PROJECT", "proj");
        env::set_var("VERTEX_AI_LOCATION", "global");
        for name in [
            "GEMINI_MODEL",
            "PORT",
            "AI_STREAM_TIMEOUT_SECS",
            "YOUTUBE_TIMEOUT_SECS",
            "GOOGLE_CLOUD_ACCESS_TOKEN",
        ] {
            env::remove_var(name);
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.gemini_model, GEMINI_2_5_PRO);
        assert_eq!(config.port, 8080);
        assert_eq!(config.ai_stream_timeout, Duration::from_secs(30));
        assert_eq!(config.youtube_timeout, Duration::from_secs(10));
        assert_eq!(config.google_cloud_access_token, None);
    }
}
