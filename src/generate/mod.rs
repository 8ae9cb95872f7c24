use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::Config;
use crate::{NotesError, Result};

pub mod prompt;

/// Capability that turns a prompt into generated text
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for the whole prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Model used for generation
    fn model_name(&self) -> String;
}

/// Client for the Gemini `generateContent` endpoint
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
    status: Option<String>,
}

impl GeminiClient {
    /// Build a client from configuration; fails immediately without an API key
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config.api_key()?.to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(config.gemini.timeout_secs))
            .build()
            .map_err(|e| NotesError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            model: config.gemini.model.clone(),
            base_url: config.gemini.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        tracing::debug!(model = %self.model, prompt_chars = prompt.len(), "Sending generateContent request");

        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))
            .map_err(|e| NotesError::GenerationFailed(format!("Request to Gemini failed: {}", e)))?;

        let status = response.status();
        let payload = response
            .text()
            .await
            .map_err(|e| NotesError::GenerationFailed(format!("Failed to read Gemini response: {}", e)))?;

        if !status.is_success() {
            return Err(NotesError::GenerationFailed(api_error_message(status.as_u16(), &payload)).into());
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&payload)
            .map_err(|e| NotesError::GenerationFailed(format!("Unexpected Gemini response: {}", e)))?;

        response_text(parsed)
    }

    fn model_name(&self) -> String {
        self.model.clone()
    }
}

/// Describe a non-success response, preferring the API's own message
fn api_error_message(status: u16, payload: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(payload) {
        Ok(body) => match body.error.status {
            Some(code) => format!("Gemini API error {} ({}): {}", status, code, body.error.message),
            None => format!("Gemini API error {}: {}", status, body.error.message),
        },
        Err(_) => format!("Gemini API error {}: {}", status, payload.trim()),
    }
}

/// Text of the first candidate, all parts concatenated
fn response_text(response: GenerateContentResponse) -> Result<String> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
            .unwrap_or_else(|| "no candidates returned".to_string());
        return Err(NotesError::GenerationFailed(format!("Gemini returned no answer: {}", reason)).into());
    };

    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "empty response".to_string());
        return Err(NotesError::GenerationFailed(format!("Gemini returned no text: {}", reason)).into());
    }

    Ok(text)
}
