//! Command handlers for the DocQA CLI.
//!
//! This module organizes all CLI commands into separate submodules and holds
//! the wiring shared by the document commands.

pub mod ask;
pub mod chat;
pub mod index;
pub mod prompts;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use chat::ChatCommand;
pub use index::IndexCommand;
pub use prompts::PromptsCommand;

use docqa_core::{config::AppConfig, AppResult};
use docqa_knowledge::{config::load_config_from, create_provider, DocumentService, InMemoryDocumentStore, MediaKind};
use docqa_llm::{create_client, LlmClient};
use docqa_prompt::{load_prompt, GROUNDED_PROMPT_ID};
use std::path::Path;
use std::sync::Arc;

/// Create the chat client for the configured provider.
pub(crate) fn chat_client(config: &AppConfig) -> AppResult<Arc<dyn LlmClient>> {
    create_client(&config.provider, config.endpoint.as_deref(), config.api_key.as_deref())
}

/// Wire a document service from workspace configuration.
///
/// Model identifiers come from the application config (file `llm:` section,
/// environment, flags); every other pipeline knob from the `rag:` section.
pub(crate) fn document_service(config: &AppConfig) -> AppResult<DocumentService> {
    let mut rag = load_config_from(&config.config_path())?;
    rag.chat_model = config.model.clone();
    rag.embedding_model = config.embedding_model.clone();

    let embeddings = create_provider(
        &config.embedding_provider,
        &rag.embedding_model,
        config.endpoint.as_deref(),
        config.api_key.as_deref(),
    )?;
    let prompt = load_prompt(&config.workspace, GROUNDED_PROMPT_ID)?;

    let service = DocumentService::new(
        rag,
        embeddings,
        chat_client(config)?,
        Arc::new(InMemoryDocumentStore::new()),
    )?;

    Ok(service.with_prompt(prompt))
}

/// Read a file and resolve its media type.
pub(crate) async fn read_upload(
    path: &Path,
    media_type: Option<&str>,
) -> AppResult<(Vec<u8>, String, String)> {
    let bytes = tokio::fs::read(path).await?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let media_type = media_type
        .map(str::to_string)
        .unwrap_or_else(|| MediaKind::guess_media_type(&name).to_string());

    Ok((bytes, name, media_type))
}
