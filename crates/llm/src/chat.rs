//! Direct chat with the hosted model.
//!
//! A single-turn chat: one system message, one user message, one answer.
//! Parameters are validated before any remote call is made.

use crate::client::{LlmClient, LlmRequest};
use docqa_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// System prompt used when the caller does not provide one.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Default generation budget for direct chat.
pub const DEFAULT_CHAT_MAX_TOKENS: u32 = 400;

/// Default sampling temperature for direct chat.
pub const DEFAULT_CHAT_TEMPERATURE: f32 = 0.3;

/// Upper bound accepted for `max_tokens`.
pub const MAX_TOKENS_LIMIT: u32 = 4096;

/// Parameters of a direct chat request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatParams {
    /// User message
    pub message: String,

    /// System prompt override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Sampling temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl ChatParams {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    /// Reject blank messages and out-of-range generation settings.
    pub fn validate(&self) -> AppResult<()> {
        if self.message.trim().is_empty() {
            return Err(AppError::Validation("message is required".to_string()));
        }
        validate_generation(self.max_tokens, self.temperature)
    }
}

/// Validate generation settings shared by chat and document questions.
///
/// `max_tokens` must lie in `1..=4096` and `temperature` in `0.0..=1.0`.
pub fn validate_generation(max_tokens: Option<u32>, temperature: Option<f32>) -> AppResult<()> {
    if let Some(max_tokens) = max_tokens {
        if max_tokens == 0 || max_tokens > MAX_TOKENS_LIMIT {
            return Err(AppError::Validation(format!(
                "max_tokens must be between 1 and {}, got {}",
                MAX_TOKENS_LIMIT, max_tokens
            )));
        }
    }

    if let Some(temperature) = temperature {
        if !(0.0..=1.0).contains(&temperature) {
            return Err(AppError::Validation(format!(
                "temperature must be between 0 and 1, got {}",
                temperature
            )));
        }
    }

    Ok(())
}

/// Send a single-turn chat and return the trimmed answer.
pub async fn chat(client: &dyn LlmClient, model: &str, params: &ChatParams) -> AppResult<String> {
    params.validate()?;

    let start = Instant::now();
    tracing::info!("Chat completion via {} (model: {})", client.provider_name(), model);
    tracing::debug!("Chat message: {}", params.message);

    let request = LlmRequest::new(params.message.clone(), model)
        .with_system(params.system.as_deref().unwrap_or(DEFAULT_SYSTEM_PROMPT))
        .with_max_tokens(params.max_tokens.unwrap_or(DEFAULT_CHAT_MAX_TOKENS))
        .with_temperature(params.temperature.unwrap_or(DEFAULT_CHAT_TEMPERATURE));

    let response = client.complete(&request).await?;
    let answer = response.content.trim().to_string();

    tracing::info!(
        "Chat answer received (len={}) in {}ms",
        answer.chars().count(),
        start.elapsed().as_millis()
    );

    Ok(answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{LlmResponse, LlmUsage};
    use std::sync::Mutex;

    /// Records requests and answers with a canned reply.
    struct RecordingClient {
        reply: String,
        requests: Mutex<Vec<LlmRequest>>,
    }

    impl RecordingClient {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl LlmClient for RecordingClient {
        fn provider_name(&self) -> &str {
            "recording"
        }

        async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(LlmResponse {
                content: self.reply.clone(),
                model: request.model.clone(),
                usage: LlmUsage::default(),
            })
        }
    }

    #[tokio::test]
    async fn test_chat_applies_defaults() {
        let client = RecordingClient::new("  Hola!  ");
        let answer = chat(&client, "test-model", &ChatParams::new("Hi"))
            .await
            .unwrap();

        assert_eq!(answer, "Hola!");

        let requests = client.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].system(), Some(DEFAULT_SYSTEM_PROMPT));
        assert_eq!(requests[0].max_tokens, Some(400));
        assert_eq!(requests[0].temperature, Some(0.3));
        assert_eq!(requests[0].last_user_message(), Some("Hi"));
    }

    #[tokio::test]
    async fn test_chat_uses_overrides() {
        let client = RecordingClient::new("ok");
        let params = ChatParams {
            message: "Summarize".to_string(),
            system: Some("Reply in French".to_string()),
            max_tokens: Some(50),
            temperature: Some(0.0),
        };

        chat(&client, "m", &params).await.unwrap();

        let requests = client.requests.lock().unwrap();
        assert_eq!(requests[0].system(), Some("Reply in French"));
        assert_eq!(requests[0].max_tokens, Some(50));
        assert_eq!(requests[0].temperature, Some(0.0));
    }

    #[tokio::test]
    async fn test_multibyte_answer_kept_intact() {
        let client = RecordingClient::new(" ¿Qué tal? 日本語 ");
        let answer = chat(&client, "m", &ChatParams::new("Hola")).await.unwrap();

        assert_eq!(answer, "¿Qué tal? 日本語");
        assert_eq!(answer.chars().count(), 13);
    }

    #[tokio::test]
    async fn test_blank_message_rejected_before_call() {
        let client = RecordingClient::new("never");
        let err = chat(&client, "m", &ChatParams::new("   ")).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert!(client.requests.lock().unwrap().is_empty());
    }

    #[test]
    fn test_validate_generation_bounds() {
        assert!(validate_generation(Some(1), Some(0.0)).is_ok());
        assert!(validate_generation(Some(4096), Some(1.0)).is_ok());
        assert!(validate_generation(None, None).is_ok());
        assert!(validate_generation(Some(0), None).is_err());
        assert!(validate_generation(Some(4097), None).is_err());
        assert!(validate_generation(None, Some(1.5)).is_err());
        assert!(validate_generation(None, Some(-0.1)).is_err());
    }
}
