//! Server dependencies (using traits for testability)
//!
//! The analysis domain only sees trait objects, so tests swap in the mocks
//! from `test_dependencies` without touching the network.

use std::sync::Arc;
use std::time::Duration;

use vertex_client::VertexClient;
use youtube_client::YouTubeClient;

use crate::config::Config;
use crate::kernel::{
    BaseTextGenerator, BaseVideoPlatform, VertexTextGenerator, YouTubeVideoPlatform,
};

/// Server dependencies accessible to request handlers
#[derive(Clone)]
pub struct ServerDeps {
    pub video_platform: Arc<dyn BaseVideoPlatform>,
    pub text_generator: Arc<dyn BaseTextGenerator>,
    /// Wall-clock budget for reading one model response.
    pub ai_stream_budget: Duration,
}

impl ServerDeps {
    pub fn new(
        video_platform: Arc<dyn BaseVideoPlatform>,
        text_generator: Arc<dyn BaseTextGenerator>,
        ai_stream_budget: Duration,
    ) -> Self {
        Self {
            video_platform,
            text_generator,
            ai_stream_budget,
        }
    }

    /// Production wiring: YouTube Data API plus Gemini on Vertex AI.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let youtube = YouTubeClient::new(config.youtube_api_key.clone())
            .with_timeout(config.youtube_timeout)?;

        let mut vertex = VertexClient::new(
            config.google_cloud_project.clone(),
            config.vertex_ai_location.clone(),
        );
        if let Some(token) = &config.google_cloud_access_token {
            vertex = vertex.with_access_token(token.clone());
        }

        Ok(Self::new(
            Arc::new(YouTubeVideoPlatform::new(youtube)),
            Arc::new(VertexTextGenerator::new(vertex, config.gemini_model.clone())),
            config.ai_stream_timeout,
        ))
    }
}
