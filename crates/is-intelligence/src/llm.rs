//! Text-generation provider abstraction.
//!
//! A single async trait over "instruction in, text out" plus the Gemini
//! `generateContent` implementation and a mock for tests. Structured output
//! is requested through the API's response-schema mechanism, so a
//! conforming service returns raw JSON in the candidate text.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::AnalysisError;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// One generation request.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Natural-language instruction, sample payload included.
    pub instruction: String,
    pub model: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
    /// When present, the provider must ask the service for JSON output
    /// conforming to this schema.
    pub response_schema: Option<Value>,
}

/// Raw result of one generation request.
#[derive(Debug, Clone)]
pub struct GenerationResponse {
    pub text: String,
    pub model: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// Async trait for text-generation backends.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Issue exactly one request. No caching, no retry.
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, AnalysisError>;
}

// ---------------------------------------------------------------------------
// GeminiProvider
// ---------------------------------------------------------------------------

/// Provider for the Gemini `generateContent` REST API.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            api_key: api_key.into(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
        }
    }

    /// Override the base URL (for tests against a stub server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn generate_content_url(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }

    /// Build the JSON request body.
    ///
    /// A response schema switches the request into structured-output mode
    /// via `generationConfig.responseMimeType` + `responseSchema`.
    pub fn build_request_body(request: &GenerationRequest) -> Value {
        let mut generation_config = serde_json::json!({
            "maxOutputTokens": request.max_output_tokens,
            "temperature": request.temperature,
        });

        if let Some(schema) = &request.response_schema {
            generation_config["responseMimeType"] = Value::String("application/json".into());
            generation_config["responseSchema"] = schema.clone();
        }

        serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": request.instruction }],
            }],
            "generationConfig": generation_config,
        })
    }
}

/// Deserialize helpers for the `generateContent` response envelope.
#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(rename = "modelVersion")]
    model_version: Option<String>,
    #[serde(rename = "usageMetadata")]
    usage: Option<GeminiUsage>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct GeminiUsage {
    #[serde(rename = "promptTokenCount")]
    prompt_tokens: Option<u64>,
    #[serde(rename = "candidatesTokenCount")]
    candidate_tokens: Option<u64>,
}

#[async_trait]
impl TextGenerator for GeminiProvider {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, AnalysisError> {
        let body = Self::build_request_body(request);
        let url = self.generate_content_url(&request.model);

        let resp = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(AnalysisError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: GeminiResponse = resp
            .json()
            .await
            .map_err(|e| AnalysisError::Parse(format!("invalid response envelope: {e}")))?;

        let candidate = envelope
            .candidates
            .first()
            .ok_or_else(|| AnalysisError::Parse("no candidates in response".into()))?;

        let text: String = candidate
            .content
            .as_ref()
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let usage = envelope.usage.as_ref();

        Ok(GenerationResponse {
            text,
            model: envelope
                .model_version
                .unwrap_or_else(|| request.model.clone()),
            input_tokens: usage.and_then(|u| u.prompt_tokens).unwrap_or(0),
            output_tokens: usage.and_then(|u| u.candidate_tokens).unwrap_or(0),
        })
    }
}

// ---------------------------------------------------------------------------
// MockGenerator
// ---------------------------------------------------------------------------

/// Test double: pops queued responses and captures every request.
///
/// An empty queue yields a default response, so tests that only care about
/// the captured request need no setup.
#[derive(Default)]
pub struct MockGenerator {
    responses: Mutex<VecDeque<Result<GenerationResponse, AnalysisError>>>,
    captured: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response with the given text.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.responses
            .lock()
            .expect("mock queue poisoned")
            .push_back(Ok(GenerationResponse {
                text: text.into(),
                model: "mock".into(),
                input_tokens: 10,
                output_tokens: 5,
            }));
        self
    }

    /// Queue an error response.
    pub fn with_error(self, error: AnalysisError) -> Self {
        self.responses
            .lock()
            .expect("mock queue poisoned")
            .push_back(Err(error));
        self
    }

    /// Requests seen so far, in order.
    pub fn captured_requests(&self) -> Vec<GenerationRequest> {
        self.captured.lock().expect("mock capture poisoned").clone()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, AnalysisError> {
        self.captured
            .lock()
            .expect("mock capture poisoned")
            .push(request.clone());

        let mut queue = self.responses.lock().expect("mock queue poisoned");
        match queue.pop_front() {
            Some(result) => result,
            None => Ok(GenerationResponse {
                text: "{}".into(),
                model: request.model.clone(),
                input_tokens: 10,
                output_tokens: 5,
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
