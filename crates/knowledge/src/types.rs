//! Document pipeline type definitions.

use chrono::{DateTime, Utc};
use docqa_core::{AppError, AppResult};
use docqa_llm::validate_generation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of an indexed document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Generate a fresh identifier: 8 random bytes as 16 lowercase hex characters.
    pub fn generate() -> Self {
        let uuid = uuid::Uuid::new_v4();
        let bytes = uuid.as_bytes();
        // Bytes 6 and 8 carry the version and variant bits; skip them.
        let hex: String = bytes[..6]
            .iter()
            .chain(&bytes[10..12])
            .map(|b| format!("{:02x}", b))
            .collect();
        Self(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for DocumentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// An indexed document: its text, chunks and one unit vector per chunk.
///
/// Built once per indexing call and never mutated afterwards; re-indexing
/// under the same id replaces the whole record.
#[derive(Debug, Clone)]
pub struct DocumentRecord {
    name: String,
    full_text: String,
    chunks: Vec<String>,
    vectors: Vec<Vec<f32>>,
    indexed_at: DateTime<Utc>,
}

impl DocumentRecord {
    /// Assemble a record; chunks and vectors must pair up one to one.
    pub fn new(
        name: impl Into<String>,
        full_text: impl Into<String>,
        chunks: Vec<String>,
        vectors: Vec<Vec<f32>>,
    ) -> AppResult<Self> {
        if chunks.len() != vectors.len() {
            return Err(AppError::Other(format!(
                "Chunk/vector count mismatch: {} chunks, {} vectors",
                chunks.len(),
                vectors.len()
            )));
        }

        Ok(Self {
            name: name.into(),
            full_text: full_text.into(),
            chunks,
            vectors,
            indexed_at: Utc::now(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    pub fn chunks(&self) -> &[String] {
        &self.chunks
    }

    pub fn vectors(&self) -> &[Vec<f32>] {
        &self.vectors
    }

    pub fn indexed_at(&self) -> DateTime<Utc> {
        self.indexed_at
    }
}

/// Result of indexing a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexedDocument {
    /// Display name given at upload
    pub name: String,

    /// Number of chunks stored
    pub chunk_count: usize,
}

/// Listing entry for a stored document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    pub id: DocumentId,
    pub name: String,
    pub chunk_count: usize,
    pub char_count: usize,
    pub indexed_at: DateTime<Utc>,
}

/// Per-question settings.
///
/// `Default` matches the stock pipeline defaults; services seed their own
/// defaults from [`crate::config::RagConfig::ask_options`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AskOptions {
    /// Chunks retrieved as context
    pub top_k: usize,

    /// Characters kept from each retrieved chunk
    pub context_char_limit: usize,

    /// System prompt override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,

    /// Generation budget
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,
}

impl Default for AskOptions {
    fn default() -> Self {
        Self {
            top_k: 4,
            context_char_limit: 1200,
            system_prompt: None,
            max_tokens: 350,
            temperature: 0.2,
        }
    }
}

impl AskOptions {
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.top_k == 0 {
            return Err(AppError::Validation("top_k must be at least 1".to_string()));
        }
        if self.context_char_limit == 0 {
            return Err(AppError::Validation(
                "context_char_limit must be at least 1".to_string(),
            ));
        }
        validate_generation(Some(self.max_tokens), Some(self.temperature))
    }
}

/// Answer to a document question plus the excerpts it was grounded on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AskAnswer {
    pub answer: String,

    /// Truncated chunks given to the model, most relevant first
    pub context_used: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_id_shape() {
        let id = DocumentId::generate();
        assert_eq!(id.as_str().len(), 16);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_ne!(DocumentId::generate(), id);
    }

    #[test]
    fn test_generated_id_has_no_fixed_positions() {
        let ids: Vec<DocumentId> = (0..200).map(|_| DocumentId::generate()).collect();
        for pos in 0..16 {
            let first = ids[0].as_str().as_bytes()[pos];
            assert!(
                ids.iter().any(|id| id.as_str().as_bytes()[pos] != first),
                "hex position {} never varies",
                pos
            );
        }
    }

    #[test]
    fn test_record_rejects_mismatch() {
        let result = DocumentRecord::new("a.txt", "text", vec!["text".to_string()], vec![]);
        assert!(result.is_err());
    }

    #[test]
    fn test_record_accessors() {
        let record =
            DocumentRecord::new("a.txt", "text", vec!["text".to_string()], vec![vec![1.0]]).unwrap();
        assert_eq!(record.name(), "a.txt");
        assert_eq!(record.full_text(), "text");
        assert_eq!(record.chunks().len(), record.vectors().len());
    }

    #[test]
    fn test_ask_options_validation() {
        assert!(AskOptions::default().validate().is_ok());
        assert!(AskOptions::default().with_top_k(0).validate().is_err());

        let hot = AskOptions {
            temperature: 2.0,
            ..AskOptions::default()
        };
        assert!(matches!(hot.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_wire_names() {
        let indexed = IndexedDocument {
            name: "contract.pdf".to_string(),
            chunk_count: 3,
        };
        let json = serde_json::to_value(&indexed).unwrap();
        assert_eq!(json["chunkCount"], 3);

        let answer = AskAnswer {
            answer: "20 EUR".to_string(),
            context_used: vec!["The fee is 20 EUR.".to_string()],
        };
        let json = serde_json::to_value(&answer).unwrap();
        assert_eq!(json["contextUsed"][0], "The fee is 20 EUR.");
    }
}
