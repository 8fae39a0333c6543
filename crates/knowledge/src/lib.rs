//! Document ingestion and retrieval-augmented answering.
//!
//! The pipeline turns an uploaded file into text ([`parser`]), splits it into
//! paragraph-aligned chunks ([`chunker`]), embeds every chunk ([`embeddings`])
//! and keeps the result in a [`store::DocumentStore`]. Questions are embedded
//! the same way, ranked against the stored vectors ([`ranker`]) and answered
//! by the chat model from the best excerpts ([`rag`]).
//!
//! # Example
//! ```no_run
//! use docqa_knowledge::{
//!     create_provider, AskOptions, DocumentService, InMemoryDocumentStore, RagConfig,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RagConfig::default();
//! let embeddings = create_provider("huggingface", &config.embedding_model, None, Some("hf_token"))?;
//! let llm = docqa_llm::create_client("huggingface", None, Some("hf_token"))?;
//! let service = DocumentService::new(config, embeddings, llm, Arc::new(InMemoryDocumentStore::new()))?;
//!
//! let (id, indexed) = service
//!     .ingest(b"The monthly fee is 20 EUR.".to_vec(), "text/plain", "fees.txt")
//!     .await?;
//! println!("{} chunks", indexed.chunk_count);
//!
//! let answer = service
//!     .answer_question(&id, "How much is the fee?", &AskOptions::default())
//!     .await?;
//! println!("{}", answer.answer);
//! # Ok(())
//! # }
//! ```

pub mod chunker;
pub mod config;
pub mod embeddings;
pub mod parser;
pub mod rag;
pub mod ranker;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use chunker::{chunk_text, ChunkerConfig};
pub use config::{load_config, RagConfig};
pub use embeddings::{create_provider, EmbeddingClient, EmbeddingConfig, EmbeddingProvider};
pub use parser::{extract_text, MediaKind};
pub use rag::DocumentService;
pub use ranker::{top_k, ScoredChunk};
pub use store::{DocumentStore, InMemoryDocumentStore};
pub use types::{
    AskAnswer, AskOptions, DocumentId, DocumentRecord, DocumentSummary, IndexedDocument,
};
