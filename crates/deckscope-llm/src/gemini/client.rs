// Gemini-specific client implementation

use crate::traits::{
    CompletionClient, CompletionRequest, CompletionResponse, TokenUsage,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini client (HTTP direct, no SDK)
pub struct GeminiClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl GeminiClient {
    /// Create new client with API key
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(&api_key).context("Invalid API key format")?,
        );

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            base_url: GEMINI_API_BASE.to_string(),
        })
    }

    /// Override the API base URL (useful for testing)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build generateContent request payload
    fn build_request(request: &CompletionRequest, response_schema: Option<&Value>) -> Value {
        let mut payload = serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": request.prompt }],
            }],
        });

        let mut generation_config = serde_json::Map::new();
        if let Some(temp) = request.options.temperature {
            generation_config.insert("temperature".to_string(), serde_json::json!(temp));
        }
        if let Some(max_tokens) = request.options.max_output_tokens {
            generation_config.insert("maxOutputTokens".to_string(), serde_json::json!(max_tokens));
        }
        if let Some(schema) = response_schema {
            generation_config.insert(
                "responseMimeType".to_string(),
                serde_json::json!("application/json"),
            );
            generation_config.insert("responseSchema".to_string(), schema.clone());
        }

        if !generation_config.is_empty() {
            if let Some(obj) = payload.as_object_mut() {
                obj.insert(
                    "generationConfig".to_string(),
                    Value::Object(generation_config),
                );
            }
        }

        payload
    }

    async fn generate(&self, model: &str, payload: &Value) -> Result<GenerateContentResponse> {
        let response = self
            .http_client
            .post(format!("{}/models/{}:generateContent", self.base_url, model))
            .json(payload)
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API error ({}): {}", status, error_text);
        }

        response.json().await.context("Failed to parse response")
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let payload = Self::build_request(&request, None);
        let raw = self.generate(&request.model, &payload).await?;

        let candidate = raw.candidates.first();
        Ok(CompletionResponse {
            text: candidate.and_then(Candidate::text),
            usage: raw.usage_metadata.as_ref().map(|u| TokenUsage {
                input_tokens: u.prompt_token_count,
                output_tokens: u.candidates_token_count,
                total_tokens: u.total_token_count,
            }),
            finish_reason: candidate.and_then(|c| c.finish_reason.clone()),
            raw: serde_json::to_value(raw)?,
        })
    }

    async fn complete_json(&self, request: CompletionRequest, schema: Value) -> Result<Value> {
        let payload = Self::build_request(&request, Some(&schema));
        let raw = self.generate(&request.model, &payload).await?;

        let text = raw
            .candidates
            .first()
            .and_then(Candidate::text)
            .context("Gemini returned no content for structured request")?;

        serde_json::from_str(&text).context("Structured response is not valid JSON")
    }
}

// ============================================================================
// GEMINI-SPECIFIC RESPONSE TYPES
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(rename = "usageMetadata")]
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Candidate {
    pub content: Option<CandidateContent>,
    #[serde(rename = "finishReason")]
    pub finish_reason: Option<String>,
}

impl Candidate {
    /// Concatenated text across the candidate's parts
    fn text(&self) -> Option<String> {
        let parts = &self.content.as_ref()?.parts;
        let text: String = parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect::<Vec<_>>()
            .join("");
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Part {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount", default)]
    pub prompt_token_count: u32,
    #[serde(rename = "candidatesTokenCount", default)]
    pub candidates_token_count: u32,
    #[serde(rename = "totalTokenCount", default)]
    pub total_token_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::CompletionOptions;

    #[test]
    fn test_build_request_plain() {
        let request = CompletionRequest::new("gemini-2.5-flash", "Hello")
            .with_options(CompletionOptions::new().temperature(0.5).max_output_tokens(1000));

        let payload = GeminiClient::build_request(&request, None);

        assert_eq!(payload["contents"][0]["parts"][0]["text"], "Hello");
        assert_eq!(payload["generationConfig"]["temperature"], 0.5);
        assert_eq!(payload["generationConfig"]["maxOutputTokens"], 1000);
        assert!(payload["generationConfig"].get("responseSchema").is_none());
    }

    #[test]
    fn test_build_request_without_options() {
        let request = CompletionRequest::new("gemini-2.5-flash", "Hello");
        let payload = GeminiClient::build_request(&request, None);

        assert!(payload.get("generationConfig").is_none());
    }

    #[test]
    fn test_build_request_with_schema() {
        let schema = serde_json::json!({"type": "OBJECT", "properties": {}});
        let request = CompletionRequest::new("gemini-2.5-flash", "Analyze");
        let payload = GeminiClient::build_request(&request, Some(&schema));

        assert_eq!(
            payload["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(payload["generationConfig"]["responseSchema"], schema);
    }

    #[test]
    fn test_candidate_text_joins_parts() {
        let candidate = Candidate {
            content: Some(CandidateContent {
                parts: vec![
                    Part { text: Some("Hello ".to_string()) },
                    Part { text: Some("world".to_string()) },
                ],
            }),
            finish_reason: None,
        };

        assert_eq!(candidate.text().as_deref(), Some("Hello world"));
    }

    #[test]
    fn test_candidate_text_empty() {
        let candidate = Candidate {
            content: Some(CandidateContent { parts: vec![] }),
            finish_reason: Some("STOP".to_string()),
        };

        assert_eq!(candidate.text(), None);
    }

    #[test]
    fn test_response_deserialization() {
        let json = r#"{
            "candidates": [{
                "content": {"parts": [{"text": "hi"}], "role": "model"},
                "finishReason": "STOP"
            }],
            "usageMetadata": {
                "promptTokenCount": 10,
                "candidatesTokenCount": 5,
                "totalTokenCount": 15
            }
        }"#;

        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.candidates.len(), 1);
        let usage = response.usage_metadata.unwrap();
        assert_eq!(usage.prompt_token_count, 10);
        assert_eq!(usage.total_token_count, 15);
    }
}
