//! Document storage.
//!
//! The pipeline talks to storage through [`DocumentStore`] so a persistent
//! backend can replace the in-memory map without touching the service.

use crate::types::{DocumentId, DocumentRecord, DocumentSummary};
use async_trait::async_trait;
use docqa_core::{AppError, AppResult};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Keyed storage of indexed documents.
///
/// Records are handed out as shared, read-only snapshots; replacing a
/// record never affects a reader already holding the previous one.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert or replace the record stored under `id`.
    async fn put(&self, id: &DocumentId, record: DocumentRecord) -> AppResult<()>;

    /// Fetch a record; unknown ids are [`AppError::NotFound`].
    async fn get(&self, id: &DocumentId) -> AppResult<Arc<DocumentRecord>>;

    /// Remove a record; unknown ids are [`AppError::NotFound`].
    async fn delete(&self, id: &DocumentId) -> AppResult<()>;

    /// Summaries of every stored record, oldest first.
    async fn list(&self) -> AppResult<Vec<DocumentSummary>>;
}

/// Process-local store backed by a `HashMap`.
///
/// Contents are lost on restart and nothing is ever evicted.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<HashMap<DocumentId, Arc<DocumentRecord>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn put(&self, id: &DocumentId, record: DocumentRecord) -> AppResult<()> {
        let mut documents = self.documents.write().await;
        if documents.insert(id.clone(), Arc::new(record)).is_some() {
            tracing::debug!("Replaced document {}", id);
        }
        Ok(())
    }

    async fn get(&self, id: &DocumentId) -> AppResult<Arc<DocumentRecord>> {
        let documents = self.documents.read().await;
        documents
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Document '{}' does not exist", id)))
    }

    async fn delete(&self, id: &DocumentId) -> AppResult<()> {
        let mut documents = self.documents.write().await;
        documents
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Document '{}' does not exist", id)))
    }

    async fn list(&self) -> AppResult<Vec<DocumentSummary>> {
        let documents = self.documents.read().await;
        let mut summaries: Vec<DocumentSummary> = documents
            .iter()
            .map(|(id, record)| DocumentSummary {
                id: id.clone(),
                name: record.name().to_string(),
                chunk_count: record.chunks().len(),
                char_count: record.full_text().chars().count(),
                indexed_at: record.indexed_at(),
            })
            .collect();

        summaries.sort_by(|a, b| a.indexed_at.cmp(&b.indexed_at).then_with(|| a.id.cmp(&b.id)));
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, chunks: &[&str]) -> DocumentRecord {
        let chunks: Vec<String> = chunks.iter().map(|c| c.to_string()).collect();
        let vectors = chunks.iter().map(|_| vec![1.0, 0.0]).collect();
        DocumentRecord::new(name, chunks.join("\n\n"), chunks, vectors).unwrap()
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let store = InMemoryDocumentStore::new();
        let id = DocumentId::from("abc");

        store.put(&id, record("a.txt", &["one", "two"])).await.unwrap();

        let fetched = store.get(&id).await.unwrap();
        assert_eq!(fetched.name(), "a.txt");
        assert_eq!(fetched.chunks().len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_id_not_found() {
        let store = InMemoryDocumentStore::new();
        let id = DocumentId::from("missing");

        assert!(matches!(store.get(&id).await, Err(AppError::NotFound(_))));
        assert!(matches!(store.delete(&id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_put_replaces_but_old_snapshot_survives() {
        let store = InMemoryDocumentStore::new();
        let id = DocumentId::from("abc");

        store.put(&id, record("v1.txt", &["old"])).await.unwrap();
        let before = store.get(&id).await.unwrap();

        store.put(&id, record("v2.txt", &["new", "newer"])).await.unwrap();
        let after = store.get(&id).await.unwrap();

        assert_eq!(before.name(), "v1.txt");
        assert_eq!(after.name(), "v2.txt");
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_and_list() {
        let store = InMemoryDocumentStore::new();
        store.put(&DocumentId::from("a"), record("a.txt", &["x"])).await.unwrap();
        store.put(&DocumentId::from("b"), record("b.txt", &["y", "z"])).await.unwrap();

        store.delete(&DocumentId::from("a")).await.unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id.as_str(), "b");
        assert_eq!(listed[0].chunk_count, 2);
        assert_eq!(listed[0].char_count, "y\n\nz".len());
    }
}
