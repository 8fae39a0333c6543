//! Chat-completion integration for DocQA.
//!
//! This crate provides a provider-agnostic abstraction over hosted chat
//! models, the Hugging Face provider, and the single-turn chat operation.
//!
//! # Example
//! ```no_run
//! use docqa_llm::{chat, ChatParams, HuggingFaceClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HuggingFaceClient::new("hf_token");
//! let params = ChatParams::new("Hello, world!");
//! let answer = chat(&client, "meta-llama/Llama-3.1-8B-Instruct", &params).await?;
//! println!("{}", answer);
//! # Ok(())
//! # }
//! ```

pub mod chat;
pub mod client;
pub mod factory;
pub mod providers;
pub mod types;

// Re-export main types
pub use chat::{chat, validate_generation, ChatParams, DEFAULT_SYSTEM_PROMPT};
pub use client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
pub use factory::create_client;
pub use providers::HuggingFaceClient;
pub use types::{ChatMessage, Role};
