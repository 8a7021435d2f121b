//! Pure Vertex AI Gemini REST client
//!
//! A minimal client for `publishers/google/models/*:streamGenerateContent` with
//! no domain-specific logic. Authentication is an optional OAuth access token;
//! minting one is the caller's concern.
//!
//! # Example
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use vertex_client::{GenerateContentRequest, GenerationConfig, VertexClient};
//!
//! let client = VertexClient::new("my-project", "global").with_access_token(token);
//!
//! let request = GenerateContentRequest::user("Say hello")
//!     .generation_config(GenerationConfig::default().temperature(0.1));
//!
//! let mut stream = client.stream_generate_content("gemini-2.5-pro", &request).await?;
//! while let Some(chunk) = stream.next().await {
//!     print!("{}", chunk?.text);
//! }
//! ```

pub mod error;
pub mod streaming;
pub mod types;

pub use error::{Result, VertexError};
pub use streaming::{GenerateContentChunk, GenerateContentStream};
pub use types::*;

use reqwest::Client;
use tracing::{debug, warn};

/// Pure Vertex AI client.
#[derive(Clone)]
pub struct VertexClient {
    http_client: Client,
    project: String,
    location: String,
    access_token: Option<String>,
    base_url: String,
}

impl VertexClient {
    /// Create a client for `project` in `location` (e.g. "global", "us-central1").
    pub fn new(project: impl Into<String>, location: impl Into<String>) -> Self {
        let location = location.into();
        Self {
            http_client: Client::new(),
            project: project.into(),
            base_url: default_base_url(&location),
            location,
            access_token: None,
        }
    }

    /// Send `Authorization: Bearer <token>` with every request.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Set a custom base URL (for proxies or a local mock).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of a model method, e.g. `streamGenerateContent`.
    pub fn model_url(&self, model: &str, method: &str) -> String {
        format!(
            "{}/v1/projects/{}/locations/{}/publishers/google/models/{}:{}",
            self.base_url, self.project, self.location, model, method
        )
    }

    /// Streaming generation.
    ///
    /// Sends the request and returns a stream of text chunks parsed from the
    /// SSE response. The caller decides how long to keep reading.
    pub async fn stream_generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentStream> {
        let url = format!("{}?alt=sse", self.model_url(model, "streamGenerateContent"));

        let mut builder = self.http_client.post(&url).json(request);
        if let Some(token) = &self.access_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(error = %e, "Vertex AI streaming request failed");
            VertexError::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = error_message(&error_text);
            warn!(status = %status, error = %message, "Vertex AI streaming API error");
            return Err(VertexError::Api {
                status: status.as_u16(),
                message,
            });
        }

        debug!(model, "Vertex AI stream opened");
        Ok(GenerateContentStream::new(response.bytes_stream()))
    }
}

fn default_base_url(location: &str) -> String {
    if location == "global" {
        "https://aiplatform.googleapis.com".to_string()
    } else {
        format!("https://{}-aiplatform.googleapis.com", location)
    }
}

/// Pull `error.message` out of a Google error envelope, falling back to the raw body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<types::ErrorResponse>(body) {
        Ok(parsed) => match parsed.error.status {
            Some(status) => format!("{}: {}", status, parsed.error.message),
            None => parsed.error.message,
        },
        Err(_) => body.chars().take(200).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_location_host() {
        let client = VertexClient::new("my-project", "global");
        assert_eq!(
            client.model_url("gemini-2.5-pro", "streamGenerateContent"),
            "https://aiplatform.googleapis.com/v1/projects/my-project/locations/global/publishers/google/models/gemini-2.5-pro:streamGenerateContent"
        );
    }

    #[test]
    fn test_regional_location_host() {
        let client = VertexClient::new("my-project", "us-central1");
        assert_eq!(client.base_url(), "https://us-central1-aiplatform.googleapis.com");
        assert_eq!(client.location(), "us-central1");
    }

    #[test]
    fn test_client_builder() {
        let client = VertexClient::new("p", "global")
            .with_base_url("http://localhost:9000")
            .with_access_token("ya29.token");

        assert_eq!(client.base_url(), "http://localhost:9000");
        assert_eq!(client.access_token.as_deref(), Some("ya29.token"));
        assert_eq!(client.project(), "p");
    }

    #[test]
    fn test_error_message() {
        let body = r#"{"error":{"code":429,"message":"Resource exhausted","status":"RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(error_message(body), "RESOURCE_EXHAUSTED: Resource exhausted");
        assert_eq!(error_message("upstream down"), "upstream down");
    }
}
