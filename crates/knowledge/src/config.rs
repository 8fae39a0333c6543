//! Pipeline configuration.
//!
//! Every tunable of the indexing and answering pipeline lives in
//! [`RagConfig`]. Values come from the `rag:` section of
//! `.docqa/config.yaml`; anything missing falls back to its default.

use crate::chunker::ChunkerConfig;
use crate::embeddings::EmbeddingConfig;
use crate::types::AskOptions;
use docqa_core::config::{DEFAULT_CHAT_MODEL, DEFAULT_EMBEDDING_MODEL};
use docqa_core::{AppError, AppResult};
use docqa_llm::{validate_generation, DEFAULT_SYSTEM_PROMPT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Tunables for indexing and answering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RagConfig {
    /// Chat model used for answers
    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    /// Embedding model used for chunks and questions
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Extracted text is capped at this many characters before chunking
    #[serde(default = "default_max_document_chars")]
    pub max_document_chars: usize,

    /// Target upper bound of a chunk, in characters
    #[serde(default = "default_max_chunk_length")]
    pub max_chunk_length: usize,

    /// Hard cap on chunks per document
    #[serde(default = "default_max_chunks")]
    pub max_chunks: usize,

    /// Number of chunks retrieved per question
    #[serde(default = "default_top_k")]
    pub default_top_k: usize,

    /// Each retrieved chunk is cut to this many characters in the prompt
    #[serde(default = "default_context_char_limit")]
    pub context_char_limit: usize,

    /// Per-attempt deadline of an embedding call, in milliseconds
    #[serde(default = "default_embedding_timeout_ms")]
    pub embedding_timeout_ms: u64,

    /// Total attempts per embedding call
    #[serde(default = "default_embedding_retries")]
    pub embedding_retries: u32,

    /// Base backoff between embedding attempts, in milliseconds
    #[serde(default = "default_embedding_backoff_ms")]
    pub embedding_backoff_ms: u64,

    /// Embedding calls allowed in flight at once
    #[serde(default = "default_embedding_concurrency")]
    pub embedding_concurrency: usize,

    /// System prompt for answers when the caller gives none
    #[serde(default = "default_system_prompt")]
    pub default_system_prompt: String,

    /// Generation budget for answers
    #[serde(default = "default_max_tokens")]
    pub default_max_tokens: u32,

    /// Sampling temperature for answers
    #[serde(default = "default_temperature")]
    pub default_temperature: f32,
}

fn default_chat_model() -> String {
    DEFAULT_CHAT_MODEL.to_string()
}

fn default_embedding_model() -> String {
    DEFAULT_EMBEDDING_MODEL.to_string()
}

fn default_max_document_chars() -> usize {
    200_000
}

fn default_max_chunk_length() -> usize {
    900
}

fn default_max_chunks() -> usize {
    48
}

fn default_top_k() -> usize {
    4
}

fn default_context_char_limit() -> usize {
    1200
}

fn default_embedding_timeout_ms() -> u64 {
    20_000
}

fn default_embedding_retries() -> u32 {
    3
}

fn default_embedding_backoff_ms() -> u64 {
    800
}

fn default_embedding_concurrency() -> usize {
    2
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

fn default_max_tokens() -> u32 {
    350
}

fn default_temperature() -> f32 {
    0.2
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            chat_model: default_chat_model(),
            embedding_model: default_embedding_model(),
            max_document_chars: default_max_document_chars(),
            max_chunk_length: default_max_chunk_length(),
            max_chunks: default_max_chunks(),
            default_top_k: default_top_k(),
            context_char_limit: default_context_char_limit(),
            embedding_timeout_ms: default_embedding_timeout_ms(),
            embedding_retries: default_embedding_retries(),
            embedding_backoff_ms: default_embedding_backoff_ms(),
            embedding_concurrency: default_embedding_concurrency(),
            default_system_prompt: default_system_prompt(),
            default_max_tokens: default_max_tokens(),
            default_temperature: default_temperature(),
        }
    }
}

impl RagConfig {
    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> AppResult<()> {
        let positive = [
            ("maxDocumentChars", self.max_document_chars),
            ("maxChunkLength", self.max_chunk_length),
            ("maxChunks", self.max_chunks),
            ("defaultTopK", self.default_top_k),
            ("contextCharLimit", self.context_char_limit),
            ("embeddingConcurrency", self.embedding_concurrency),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(AppError::Config(format!("rag.{} must be at least 1", name)));
            }
        }

        if self.embedding_retries == 0 {
            return Err(AppError::Config(
                "rag.embeddingRetries must be at least 1".to_string(),
            ));
        }

        if self.embedding_timeout_ms == 0 {
            return Err(AppError::Config(
                "rag.embeddingTimeoutMs must be at least 1".to_string(),
            ));
        }

        if self.chat_model.trim().is_empty() || self.embedding_model.trim().is_empty() {
            return Err(AppError::Config("rag model identifiers cannot be empty".to_string()));
        }

        validate_generation(Some(self.default_max_tokens), Some(self.default_temperature))
            .map_err(|e| AppError::Config(format!("rag defaults: {}", e)))
    }

    pub fn chunker_config(&self) -> ChunkerConfig {
        ChunkerConfig {
            max_document_chars: self.max_document_chars,
            max_chunk_length: self.max_chunk_length,
            max_chunks: self.max_chunks,
        }
    }

    pub fn embedding_config(&self) -> EmbeddingConfig {
        EmbeddingConfig {
            timeout: Duration::from_millis(self.embedding_timeout_ms),
            max_attempts: self.embedding_retries,
            backoff_base: Duration::from_millis(self.embedding_backoff_ms),
            concurrency: self.embedding_concurrency,
        }
    }

    /// Question options seeded from the configured defaults.
    pub fn ask_options(&self) -> AskOptions {
        AskOptions {
            top_k: self.default_top_k,
            context_char_limit: self.context_char_limit,
            system_prompt: None,
            max_tokens: self.default_max_tokens,
            temperature: self.default_temperature,
        }
    }
}

/// Top-level layout of the workspace config file; only `rag:` is read here.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    rag: Option<RagConfig>,
}

/// Path of the workspace config file.
pub fn get_config_path(workspace: &Path) -> PathBuf {
    workspace.join(".docqa").join("config.yaml")
}

/// Load pipeline config for a workspace, falling back to defaults.
pub fn load_config(workspace: &Path) -> AppResult<RagConfig> {
    load_config_from(&get_config_path(workspace))
}

/// Load pipeline config from an explicit file path.
pub fn load_config_from(path: &Path) -> AppResult<RagConfig> {
    if !path.exists() {
        tracing::debug!("No config file at {:?}, using default pipeline config", path);
        return Ok(RagConfig::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("Failed to read config at {:?}: {}", path, e)))?;

    let file: ConfigFile = serde_yaml::from_str(&content)
        .map_err(|e| AppError::Config(format!("Failed to parse config at {:?}: {}", path, e)))?;

    let config = file.rag.unwrap_or_default();
    config.validate()?;

    tracing::debug!("Loaded pipeline config from {:?}", path);

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = RagConfig::default();
        assert_eq!(config.max_document_chars, 200_000);
        assert_eq!(config.max_chunk_length, 900);
        assert_eq!(config.max_chunks, 48);
        assert_eq!(config.default_top_k, 4);
        assert_eq!(config.context_char_limit, 1200);
        assert_eq!(config.embedding_timeout_ms, 20_000);
        assert_eq!(config.embedding_retries, 3);
        assert_eq!(config.embedding_backoff_ms, 800);
        assert_eq!(config.embedding_concurrency, 2);
        assert_eq!(config.default_max_tokens, 350);
        assert_eq!(config.default_temperature, 0.2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(temp.path()).unwrap();
        assert_eq!(config, RagConfig::default());
    }

    #[test]
    fn test_partial_rag_section() {
        let temp = TempDir::new().unwrap();
        let path = get_config_path(temp.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            &path,
            "llm:\n  provider: huggingface\nrag:\n  maxChunks: 10\n  defaultTopK: 2\n",
        )
        .unwrap();

        let config = load_config(temp.path()).unwrap();
        assert_eq!(config.max_chunks, 10);
        assert_eq!(config.default_top_k, 2);
        assert_eq!(config.max_chunk_length, 900);
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let temp = TempDir::new().unwrap();
        let path = get_config_path(temp.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "rag:\n  embeddingConcurrency: 0\n").unwrap();

        let err = load_config(temp.path()).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("embeddingConcurrency"));
    }

    #[test]
    fn test_out_of_range_temperature_rejected() {
        let config = RagConfig {
            default_temperature: 1.5,
            ..RagConfig::default()
        };
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_derived_configs() {
        let config = RagConfig::default();

        let embedding = config.embedding_config();
        assert_eq!(embedding.timeout, Duration::from_secs(20));
        assert_eq!(embedding.max_attempts, 3);
        assert_eq!(embedding.backoff_base, Duration::from_millis(800));
        assert_eq!(embedding.concurrency, 2);

        let ask = config.ask_options();
        assert_eq!(ask.top_k, 4);
        assert_eq!(ask.context_char_limit, 1200);
        assert!(ask.system_prompt.is_none());
    }
}
