//! Hugging Face feature-extraction embedding provider.
//!
//! Calls the hosted `feature-extraction` pipeline of the inference router.
//! Depending on the model the response is either one vector or a matrix;
//! for a matrix the first row is used.

use crate::embeddings::provider::EmbeddingProvider;
use docqa_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Default router URL for hosted inference.
pub const DEFAULT_HF_ENDPOINT: &str = "https://router.huggingface.co";

#[derive(Debug, Serialize)]
struct FeatureExtractionRequest<'a> {
    inputs: &'a str,
}

/// Raw feature-extraction output.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FeatureExtractionResponse {
    Flat(Vec<f32>),
    Nested(Vec<Vec<f32>>),
}

impl FeatureExtractionResponse {
    fn into_vector(self) -> Option<Vec<f32>> {
        let vector = match self {
            Self::Flat(vector) => vector,
            Self::Nested(rows) => rows.into_iter().next()?,
        };
        (!vector.is_empty()).then_some(vector)
    }
}

/// Hugging Face embedding provider.
#[derive(Debug)]
pub struct HuggingFaceProvider {
    /// Router base URL
    base_url: String,

    /// Bearer token
    api_key: String,

    /// Model identifier, e.g. "intfloat/multilingual-e5-small"
    model: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HuggingFaceProvider {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_HF_ENDPOINT, api_key, model)
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            client: reqwest::Client::new(),
        }
    }

    fn pipeline_url(&self) -> String {
        format!(
            "{}/hf-inference/models/{}/pipeline/feature-extraction",
            self.base_url, self.model
        )
    }
}

/// Map a failed HTTP status to a retryable or a permanent error.
///
/// Timeouts, rate limits and server errors are worth another attempt; any
/// other 4xx means the request itself is wrong.
fn status_error(status: reqwest::StatusCode, body: &str) -> AppError {
    let message = format!("Hugging Face API error ({}): {}", status, body);
    let transient = status == reqwest::StatusCode::REQUEST_TIMEOUT
        || status == reqwest::StatusCode::TOO_MANY_REQUESTS
        || status.is_server_error();
    if transient {
        AppError::Embedding(message)
    } else {
        AppError::EmbeddingRejected(message)
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for HuggingFaceProvider {
    fn provider_name(&self) -> &str {
        "huggingface"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    #[tracing::instrument(skip(self, text), fields(model = %self.model, chars = text.chars().count()))]
    async fn embed(&self, text: &str) -> AppResult<Vec<f32>> {
        let response = self
            .client
            .post(self.pipeline_url())
            .bearer_auth(&self.api_key)
            .json(&FeatureExtractionRequest { inputs: text })
            .send()
            .await
            .map_err(|e| AppError::Embedding(format!("Failed to reach Hugging Face: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(status_error(status, &error_text));
        }

        let body: FeatureExtractionResponse = response.json().await.map_err(|e| {
            let message = format!("Unexpected feature-extraction response: {}", e);
            if e.is_decode() {
                AppError::EmbeddingRejected(message)
            } else {
                AppError::Embedding(message)
            }
        })?;

        body.into_vector()
            .ok_or_else(|| AppError::Embedding("Hugging Face returned an empty vector".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_url() {
        let provider = HuggingFaceProvider::with_base_url(
            "http://localhost:9000/",
            "hf_x",
            "intfloat/multilingual-e5-small",
        );
        assert_eq!(
            provider.pipeline_url(),
            "http://localhost:9000/hf-inference/models/intfloat/multilingual-e5-small/pipeline/feature-extraction"
        );
    }

    #[test]
    fn test_flat_response() {
        let body: FeatureExtractionResponse = serde_json::from_str("[0.1, 0.2, 0.3]").unwrap();
        assert_eq!(body.into_vector(), Some(vec![0.1, 0.2, 0.3]));
    }

    #[test]
    fn test_nested_response_takes_first_row() {
        let body: FeatureExtractionResponse =
            serde_json::from_str("[[0.5, 0.5], [9.0, 9.0]]").unwrap();
        assert_eq!(body.into_vector(), Some(vec![0.5, 0.5]));
    }

    #[test]
    fn test_empty_response() {
        let body: FeatureExtractionResponse = serde_json::from_str("[]").unwrap();
        assert_eq!(body.into_vector(), None);
    }

    #[test]
    fn test_status_classification() {
        use reqwest::StatusCode;

        for status in [
            StatusCode::REQUEST_TIMEOUT,
            StatusCode::TOO_MANY_REQUESTS,
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::SERVICE_UNAVAILABLE,
        ] {
            assert!(matches!(status_error(status, ""), AppError::Embedding(_)), "{}", status);
        }

        for status in [
            StatusCode::BAD_REQUEST,
            StatusCode::UNAUTHORIZED,
            StatusCode::FORBIDDEN,
            StatusCode::NOT_FOUND,
        ] {
            assert!(
                matches!(status_error(status, ""), AppError::EmbeddingRejected(_)),
                "{}",
                status
            );
        }

        let err = status_error(StatusCode::UNAUTHORIZED, "invalid token");
        assert!(err.to_string().contains("401"));
        assert!(err.to_string().contains("invalid token"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transient() {
        let provider = HuggingFaceProvider::with_base_url("http://127.0.0.1:9", "hf_x", "m");
        let err = provider.embed("hello").await.unwrap_err();
        assert!(matches!(err, AppError::Embedding(_)));
    }

    #[test]
    fn test_non_numeric_response_rejected() {
        let result = serde_json::from_str::<FeatureExtractionResponse>(r#"{"error": "loading"}"#);
        assert!(result.is_err());
    }
}
