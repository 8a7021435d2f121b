//! Gemini on Vertex AI adapter for [`BaseTextGenerator`].

use async_trait::async_trait;
use futures::{future, StreamExt};
use tracing::{debug, warn};
use vertex_client::{GenerateContentRequest, GenerationConfig, SafetySetting, VertexClient};

use super::{BaseTextGenerator, GenerationError, TextStream};

/// Default model for comment analysis.
pub const GEMINI_2_5_PRO: &str = "gemini-2.5-pro";

const MAX_OUTPUT_TOKENS: u32 = 1024;

/// Streams Gemini output as plain text fragments.
pub struct VertexTextGenerator {
    client: VertexClient,
    model: String,
}

impl VertexTextGenerator {
    pub fn new(client: VertexClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Near-deterministic sampling, all safety filters off.
    pub fn request(prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest::user(prompt)
            .generation_config(
                GenerationConfig::default()
                    .temperature(0.1)
                    .top_p(0.8)
                    .seed(0)
                    .max_output_tokens(MAX_OUTPUT_TOKENS),
            )
            .safety_settings(SafetySetting::all_off())
    }
}

#[async_trait]
impl BaseTextGenerator for VertexTextGenerator {
    async fn stream_text(&self, prompt: &str) -> Result<TextStream, GenerationError> {
        debug!(model = %self.model, prompt_chars = prompt.len(), "Opening Gemini stream");

        let stream = self
            .client
            .stream_generate_content(&self.model, &Self::request(prompt))
            .await
            .map_err(|e| GenerationError::Request(e.to_string()))?;

        let text = stream.filter_map(|chunk| {
            future::ready(match chunk {
                Ok(chunk) => {
                    if let Some(reason) = &chunk.finish_reason {
                        debug!(finish_reason = %reason, "Gemini stream finished");
                    }
                    (!chunk.text.is_empty()).then(|| Ok(chunk.text))
                }
                Err(e) => {
                    warn!(error = %e, "Gemini stream chunk failed");
                    Some(Err(GenerationError::Stream(e.to_string())))
                }
            })
        });

        Ok(text.boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_deterministic_sampling() {
        let request = serde_json::to_value(VertexTextGenerator::request("hello")).unwrap();

        assert_eq!(request["contents"][0]["role"], "user");
        assert_eq!(request["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(request["generationConfig"]["seed"], 0);
        assert_eq!(request["generationConfig"]["maxOutputTokens"], 1024);
        assert_eq!(request["safetySettings"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_model_name() {
        let generator = VertexTextGenerator::new(VertexClient::new("proj", "global"), GEMINI_2_5_PRO);
        assert_eq!(generator.model(), "gemini-2.5-pro");
    }
}
