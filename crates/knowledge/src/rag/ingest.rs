//! Document indexing.

use super::DocumentService;
use crate::chunker::chunk_text;
use crate::parser::extract_text;
use crate::types::{DocumentId, DocumentRecord, IndexedDocument};
use docqa_core::{AppError, AppResult};
use std::time::Instant;

impl DocumentService {
    /// Index an upload under a freshly generated id.
    pub async fn ingest(
        &self,
        bytes: Vec<u8>,
        media_type: &str,
        name: &str,
    ) -> AppResult<(DocumentId, IndexedDocument)> {
        let id = DocumentId::generate();
        let indexed = self.index_document(&id, bytes, media_type, name).await?;
        Ok((id, indexed))
    }

    /// Extract, chunk and embed a document, then store it under `id`.
    ///
    /// Any earlier record under the same id is replaced only once the new
    /// one is complete; a failure at any stage leaves the store untouched.
    pub async fn index_document(
        &self,
        id: &DocumentId,
        bytes: Vec<u8>,
        media_type: &str,
        name: &str,
    ) -> AppResult<IndexedDocument> {
        let start = Instant::now();
        tracing::info!("Indexing {} as {} ({} bytes, {})", name, id, bytes.len(), media_type);

        let text = {
            let media_type = media_type.to_string();
            let name = name.to_string();
            tokio::task::spawn_blocking(move || extract_text(&bytes, &media_type, &name))
                .await
                .map_err(|e| AppError::Extraction(format!("Extractor aborted: {}", e)))??
        };

        if text.is_empty() {
            return Err(AppError::EmptyDocument(format!("No text could be extracted from {}", name)));
        }

        let chunks = chunk_text(&text, &self.config.chunker_config());
        if chunks.is_empty() {
            return Err(AppError::NoUsableContent(format!("{} produced no chunks", name)));
        }

        let text_chars = text.chars().count();
        if text_chars > self.config.max_document_chars || chunks.len() >= self.config.max_chunks {
            tracing::warn!(
                "{} reached indexing limits: {} chars extracted, {} chunks kept",
                name,
                text_chars,
                chunks.len()
            );
        }

        let embed_start = Instant::now();
        let vectors = self.embedder.embed_many(&chunks).await?;
        let embed_ms = embed_start.elapsed().as_millis();

        let record = DocumentRecord::new(name, text, chunks, vectors)?;
        let chunk_count = record.chunks().len();
        self.store.put(id, record).await?;

        tracing::info!(
            "Indexed {}: chunks={} embed_ms={} total_ms={}",
            name,
            chunk_count,
            embed_ms,
            start.elapsed().as_millis()
        );

        Ok(IndexedDocument {
            name: name.to_string(),
            chunk_count,
        })
    }
}
