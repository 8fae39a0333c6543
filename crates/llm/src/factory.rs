//! LLM provider factory.
//!
//! This module creates chat-completion clients from the configured provider
//! name, injecting the endpoint and API token.

use crate::client::LlmClient;
use crate::providers::huggingface::{HuggingFaceClient, DEFAULT_HF_ENDPOINT};
use docqa_core::{AppError, AppResult};
use std::sync::Arc;

/// Create an LLM client based on the provider name.
///
/// # Arguments
/// * `provider` - Provider identifier ("huggingface", alias "hf")
/// * `endpoint` - Optional custom endpoint URL
/// * `api_key` - API token (required by the hosted provider)
///
/// # Errors
/// Returns `AppError::Config` if the provider is unknown or the token is missing.
pub fn create_client(
    provider: &str,
    endpoint: Option<&str>,
    api_key: Option<&str>,
) -> AppResult<Arc<dyn LlmClient>> {
    match provider.to_lowercase().as_str() {
        "huggingface" | "hf" => {
            let api_key = api_key.ok_or_else(|| {
                AppError::Config("Hugging Face provider requires an API token".to_string())
            })?;
            let base_url = endpoint.unwrap_or(DEFAULT_HF_ENDPOINT);
            Ok(Arc::new(HuggingFaceClient::with_base_url(base_url, api_key)))
        }
        _ => Err(AppError::Config(format!("Unknown provider: {}", provider))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_huggingface_client() {
        let client = create_client("huggingface", None, Some("hf_x")).unwrap();
        assert_eq!(client.provider_name(), "huggingface");
    }

    #[test]
    fn test_alias_and_custom_endpoint() {
        let client = create_client("HF", Some("http://localhost:8080"), Some("hf_x"));
        assert!(client.is_ok());
    }

    #[test]
    fn test_huggingface_requires_api_key() {
        match create_client("huggingface", None, None) {
            Err(err) => assert!(err.to_string().contains("requires an API token")),
            Ok(_) => panic!("Expected error for Hugging Face without API token"),
        }
    }

    #[test]
    fn test_unknown_provider() {
        match create_client("unknown", None, Some("key")) {
            Err(err) => assert!(err.to_string().contains("Unknown provider")),
            Ok(_) => panic!("Expected error for unknown provider"),
        }
    }
}
