//! Index command handler.
//!
//! Extracts, chunks and embeds a file and reports what would be stored.
//! The store lives for the duration of the process only.

use super::{document_service, read_upload};
use clap::Args;
use docqa_core::{config::AppConfig, AppResult};
use std::path::PathBuf;

/// Index a document and report its chunks
#[derive(Args, Debug)]
pub struct IndexCommand {
    /// File to index (PDF, DOCX or text)
    pub file: PathBuf,

    /// Media type override (guessed from the extension otherwise)
    #[arg(long)]
    pub media_type: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl IndexCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing index command for {:?}", self.file);

        let (bytes, name, media_type) = read_upload(&self.file, self.media_type.as_deref()).await?;
        let service = document_service(config)?;

        let (id, indexed) = service.ingest(bytes, &media_type, &name).await?;

        if self.json {
            let output = serde_json::json!({
                "docId": id,
                "name": indexed.name,
                "chunkCount": indexed.chunk_count,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("Indexed {} as {} ({} chunks)", indexed.name, id, indexed.chunk_count);
        }

        Ok(())
    }
}
