//! Embedding provider trait and factory.

use crate::embeddings::providers::{HuggingFaceProvider, MockProvider};
use docqa_core::{AppError, AppResult};
use std::sync::Arc;

/// Dimensions of vectors produced by the offline mock provider.
pub const MOCK_DIMENSIONS: usize = 384;

/// A remote or local source of raw embedding vectors.
///
/// Providers make exactly one attempt per call and return the vector as
/// the backend produced it. Timeouts, retries, pooling and normalization
/// belong to [`crate::embeddings::EmbeddingClient`].
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync + std::fmt::Debug {
    /// Get provider name (e.g., "huggingface", "mock")
    fn provider_name(&self) -> &str;

    /// Get model identifier
    fn model_name(&self) -> &str;

    /// Embed a single text.
    async fn embed(&self, text: &str) -> AppResult<Vec<f32>>;
}

/// Create an embedding provider by name.
pub fn create_provider(
    provider: &str,
    model: &str,
    endpoint: Option<&str>,
    api_key: Option<&str>,
) -> AppResult<Arc<dyn EmbeddingProvider>> {
    match provider {
        "huggingface" | "hf" => {
            let api_key = api_key.ok_or_else(|| {
                AppError::Config("Hugging Face embeddings require an API token".to_string())
            })?;
            let provider = match endpoint {
                Some(url) => HuggingFaceProvider::with_base_url(url, api_key, model),
                None => HuggingFaceProvider::new(api_key, model),
            };
            Ok(Arc::new(provider))
        }

        "mock" => Ok(Arc::new(MockProvider::new(MOCK_DIMENSIONS))),

        _ => Err(AppError::Config(format!(
            "Unknown embedding provider: '{}'. Supported providers: huggingface, mock",
            provider
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_mock_provider() {
        let provider = create_provider("mock", "ignored", None, None).unwrap();
        assert_eq!(provider.provider_name(), "mock");
        assert_eq!(provider.model_name(), "trigram-v1");
    }

    #[test]
    fn test_create_huggingface_provider() {
        let provider = create_provider(
            "huggingface",
            "intfloat/multilingual-e5-small",
            None,
            Some("hf_test"),
        )
        .unwrap();
        assert_eq!(provider.provider_name(), "huggingface");
        assert_eq!(provider.model_name(), "intfloat/multilingual-e5-small");
    }

    #[test]
    fn test_huggingface_requires_token() {
        let result = create_provider("hf", "m", None, None);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_create_unknown_provider() {
        let result = create_provider("openai", "m", None, None);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Unknown embedding provider"));
    }

    #[tokio::test]
    async fn test_provider_embed_single() {
        let provider = create_provider("mock", "", None, None).unwrap();
        let embedding = provider.embed("test text").await.unwrap();
        assert_eq!(embedding.len(), MOCK_DIMENSIONS);
    }
}
