//! Gemini `generateContent` request and response types.

use serde::{Deserialize, Serialize};

// =============================================================================
// Request
// =============================================================================

/// Body of `generateContent` / `streamGenerateContent`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation turns
    pub contents: Vec<Content>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub safety_settings: Vec<SafetySetting>,
}

impl GenerateContentRequest {
    /// Single-turn request with one user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            contents: vec![Content::user(text)],
            ..Default::default()
        }
    }

    /// Set the generation config.
    pub fn generation_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = Some(config);
        self
    }

    /// Replace the safety settings.
    pub fn safety_settings(mut self, settings: Vec<SafetySetting>) -> Self {
        self.safety_settings = settings;
        self
    }
}

/// One conversation turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// "user" or "model"
    #[serde(default)]
    pub role: String,

    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![Part { text: Some(text.into()) }],
        }
    }

    /// Concatenated text of all text parts.
    pub fn text(&self) -> String {
        self.parts.iter().filter_map(|p| p.text.as_deref()).collect()
    }
}

/// Content part. Only text parts are modelled; other kinds deserialize with `text: None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Sampling parameters.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

impl GenerationConfig {
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn seed(mut self, seed: i32) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HarmCategory {
    #[serde(rename = "HARM_CATEGORY_HATE_SPEECH")]
    HateSpeech,
    #[serde(rename = "HARM_CATEGORY_DANGEROUS_CONTENT")]
    DangerousContent,
    #[serde(rename = "HARM_CATEGORY_SEXUALLY_EXPLICIT")]
    SexuallyExplicit,
    #[serde(rename = "HARM_CATEGORY_HARASSMENT")]
    Harassment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmBlockThreshold {
    Off,
    BlockNone,
    BlockOnlyHigh,
    BlockMediumAndAbove,
    BlockLowAndAbove,
}

#[derive(Debug, Clone, Serialize)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: HarmBlockThreshold,
}

impl SafetySetting {
    /// Every configurable category with filtering turned off.
    pub fn all_off() -> Vec<SafetySetting> {
        [
            HarmCategory::HateSpeech,
            HarmCategory::DangerousContent,
            HarmCategory::SexuallyExplicit,
            HarmCategory::Harassment,
        ]
        .into_iter()
        .map(|category| SafetySetting {
            category,
            threshold: HarmBlockThreshold::Off,
        })
        .collect()
    }
}

// =============================================================================
// Response
// =============================================================================

/// One `generateContent` response, or one SSE event of a streamed response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,

    pub usage_metadata: Option<UsageMetadata>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, empty when the event carries none.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(Content::text)
            .unwrap_or_default()
    }

    pub fn finish_reason(&self) -> Option<&str> {
        self.candidates.first().and_then(|c| c.finish_reason.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

/// Token usage statistics.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
    #[serde(default)]
    pub total_token_count: u32,
}

/// Google API error envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: String,
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let req = GenerateContentRequest::user("Hello")
            .generation_config(
                GenerationConfig::default()
                    .temperature(0.1)
                    .top_p(0.8)
                    .seed(0)
                    .max_output_tokens(1024),
            )
            .safety_settings(SafetySetting::all_off());

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "Hello");
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 1024);
        assert_eq!(json["generationConfig"]["seed"], 0);
        assert_eq!(json["safetySettings"].as_array().unwrap().len(), 4);
        assert_eq!(json["safetySettings"][0]["category"], "HARM_CATEGORY_HATE_SPEECH");
        assert_eq!(json["safetySettings"][0]["threshold"], "OFF");
    }

    #[test]
    fn test_minimal_request_omits_optional_fields() {
        let json = serde_json::to_value(GenerateContentRequest::user("hi")).unwrap();
        assert!(json.get("generationConfig").is_none());
        assert!(json.get("safetySettings").is_none());
    }

    #[test]
    fn test_response_text_joins_parts() {
        let raw = r#"{
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "{\"sent"}, {"text": "iment\""}]}}
            ]
        }"#;
        let resp: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.text(), "{\"sentiment\"");
        assert_eq!(resp.finish_reason(), None);
    }

    #[test]
    fn test_response_without_candidates() {
        let raw = r#"{"usageMetadata": {"promptTokenCount": 10, "totalTokenCount": 10}}"#;
        let resp: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.text(), "");
        assert_eq!(resp.usage_metadata.unwrap().prompt_token_count, 10);
    }
}
