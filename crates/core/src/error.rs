//! Error types for DocQA.
//!
//! This module defines a unified error enum covering the document pipeline
//! (extraction, chunking, embedding, retrieval, completion) and the ambient
//! concerns around it (configuration, I/O, prompts, serialization).

use thiserror::Error;

/// Unified error type for DocQA.
///
/// All fallible functions in the workspace return `Result<T, AppError>`.
/// Each pipeline failure has its own variant so callers can tell the kinds
/// apart without inspecting messages.
#[derive(Error, Debug)]
pub enum AppError {
    /// The uploaded bytes could not be parsed by the matching extractor
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Extraction succeeded but produced no text
    #[error("Empty document: {0}")]
    EmptyDocument(String),

    /// Chunking produced no chunks
    #[error("No usable content: {0}")]
    NoUsableContent(String),

    /// Remote embedding call failed after exhausting retries
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Embedding backend refused the request; retrying cannot help
    #[error("Embedding rejected: {0}")]
    EmbeddingRejected(String),

    /// Unknown document identifier
    #[error("Not found: {0}")]
    NotFound(String),

    /// Remote chat-completion call failed
    #[error("Completion error: {0}")]
    Completion(String),

    /// Caller input rejected before any remote call
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Prompt system errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Stable machine-readable code for this error kind.
    ///
    /// Ambient failures collapse into `INTERNAL_ERROR`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Extraction(_) => "EXTRACTION_ERROR",
            Self::EmptyDocument(_) => "EMPTY_DOCUMENT",
            Self::NoUsableContent(_) => "NO_USABLE_CONTENT",
            Self::Embedding(_) | Self::EmbeddingRejected(_) => "EMBEDDING_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Completion(_) => "COMPLETION_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Config(_)
            | Self::Io(_)
            | Self::Prompt(_)
            | Self::Serialization(_)
            | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the error was caused by the caller rather than the system.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::NotFound(_)
                | Self::Extraction(_)
                | Self::EmptyDocument(_)
                | Self::NoUsableContent(_)
        )
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
