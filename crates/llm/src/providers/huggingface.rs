//! Hugging Face chat-completion provider.
//!
//! Talks to the OpenAI-compatible chat-completions route of the Hugging Face
//! inference router. API: https://huggingface.co/docs/inference-providers

use crate::client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
use crate::types::ChatMessage;
use docqa_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Default router URL for hosted inference.
pub const DEFAULT_HF_ENDPOINT: &str = "https://router.huggingface.co";

const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Chat-completions request body.
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    stream: bool,
}

/// Chat-completions response body.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

/// Hugging Face chat-completion client.
pub struct HuggingFaceClient {
    /// Router base URL
    base_url: String,

    /// Bearer token
    api_key: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HuggingFaceClient {
    /// Create a client against the public router.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_HF_ENDPOINT, api_key)
    }

    /// Create a client against a custom base URL.
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    fn to_wire_request<'a>(&self, request: &'a LlmRequest) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &request.model,
            messages: &request.messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            stream: false,
        }
    }

    /// Convert the wire response, keeping only the first choice.
    fn convert_response(&self, request: &LlmRequest, response: ChatCompletionResponse) -> LlmResponse {
        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|text| text.trim().to_string())
            .unwrap_or_default();

        let usage = response
            .usage
            .map(|u| LlmUsage::new(u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default();

        LlmResponse {
            content,
            model: response.model.unwrap_or_else(|| request.model.clone()),
            usage,
        }
    }
}

#[async_trait::async_trait]
impl LlmClient for HuggingFaceClient {
    fn provider_name(&self) -> &str {
        "huggingface"
    }

    #[tracing::instrument(skip(self, request), fields(model = %request.model))]
    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        tracing::debug!("Sending chat completion with {} messages", request.messages.len());

        let url = format!("{}{}", self.base_url, CHAT_COMPLETIONS_PATH);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.to_wire_request(request))
            .send()
            .await
            .map_err(|e| AppError::Completion(format!("Failed to send request to Hugging Face: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Completion(format!(
                "Hugging Face API error ({}): {}",
                status, error_text
            )));
        }

        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::Completion(format!("Failed to parse Hugging Face response: {}", e)))?;

        let converted = self.convert_response(request, body);
        tracing::debug!("Received {} chars from {}", converted.content.len(), converted.model);

        Ok(converted)
    }
}
