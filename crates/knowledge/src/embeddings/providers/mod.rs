//! Embedding provider implementations.

pub mod huggingface;
pub mod mock;

pub use huggingface::HuggingFaceProvider;
pub use mock::MockProvider;
