//! Retrieval-augmented answering over uploaded documents.
//!
//! [`DocumentService`] owns the pipeline: indexing turns uploaded bytes into
//! stored chunks and vectors, answering retrieves the closest chunks for a
//! question and asks the chat model to answer from them only.

mod ask;
mod ingest;

pub use ask::number_excerpts;

use crate::config::RagConfig;
use crate::embeddings::{EmbeddingClient, EmbeddingProvider};
use crate::store::DocumentStore;
use crate::types::{DocumentId, DocumentSummary};
use docqa_core::{AppError, AppResult};
use docqa_llm::LlmClient;
use docqa_prompt::{builtin_prompt, PromptDefinition, GROUNDED_PROMPT_ID};
use std::sync::Arc;

/// Document indexing and question answering.
///
/// Cheap to share behind an `Arc`; concurrent calls for different documents
/// are independent, and a question racing a re-index of the same document
/// sees either the old record or the new one in full.
pub struct DocumentService {
    config: RagConfig,
    embedder: EmbeddingClient,
    llm: Arc<dyn LlmClient>,
    store: Arc<dyn DocumentStore>,
    prompt: PromptDefinition,
}

impl DocumentService {
    /// Build a service using the built-in grounded-answer prompt.
    pub fn new(
        config: RagConfig,
        embeddings: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LlmClient>,
        store: Arc<dyn DocumentStore>,
    ) -> AppResult<Self> {
        config.validate()?;

        let prompt = builtin_prompt(GROUNDED_PROMPT_ID).ok_or_else(|| {
            AppError::Prompt(format!("Built-in prompt missing: {}", GROUNDED_PROMPT_ID))
        })?;

        let embedder = EmbeddingClient::new(embeddings, config.embedding_config());

        tracing::debug!(
            "Document service ready (embeddings: {}/{}, chat: {}/{})",
            embedder.provider().provider_name(),
            embedder.provider().model_name(),
            llm.provider_name(),
            config.chat_model
        );

        Ok(Self {
            config,
            embedder,
            llm,
            store,
            prompt,
        })
    }

    /// Replace the answer prompt, e.g. with a workspace override.
    pub fn with_prompt(mut self, prompt: PromptDefinition) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Forget an indexed document.
    pub async fn remove_document(&self, id: &DocumentId) -> AppResult<()> {
        self.store.delete(id).await?;
        tracing::info!("Removed document {}", id);
        Ok(())
    }

    /// Summaries of all indexed documents.
    pub async fn documents(&self) -> AppResult<Vec<DocumentSummary>> {
        self.store.list().await
    }
}
