//! Ask command handler.
//!
//! Indexes a document and answers one or more questions from it.

use super::{document_service, read_upload};
use clap::Args;
use docqa_core::{config::AppConfig, AppResult};
use std::path::PathBuf;

/// Ask questions about a document
#[derive(Args, Debug)]
pub struct AskCommand {
    /// File to question (PDF, DOCX or text)
    pub file: PathBuf,

    /// Question to answer (repeatable)
    #[arg(short, long, required = true)]
    pub question: Vec<String>,

    /// Number of excerpts given to the model
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Characters kept from each excerpt
    #[arg(long)]
    pub context_chars: Option<usize>,

    /// System prompt
    #[arg(short, long)]
    pub system: Option<String>,

    /// Maximum tokens in response (1-4096)
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Temperature for response generation (0.0-1.0)
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Media type override (guessed from the extension otherwise)
    #[arg(long)]
    pub media_type: Option<String>,

    /// Show the excerpts each answer was based on
    #[arg(long)]
    pub show_context: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command for {:?}", self.file);

        let service = document_service(config)?;

        let mut options = service.config().ask_options();
        if let Some(top_k) = self.top_k {
            options.top_k = top_k;
        }
        if let Some(chars) = self.context_chars {
            options.context_char_limit = chars;
        }
        if let Some(max_tokens) = self.max_tokens {
            options.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.temperature {
            options.temperature = temperature;
        }
        options.system_prompt = self.system.clone();
        options.validate()?;

        let (bytes, name, media_type) = read_upload(&self.file, self.media_type.as_deref()).await?;
        let (id, indexed) = service.ingest(bytes, &media_type, &name).await?;
        tracing::debug!("Indexed {} as {} ({} chunks)", indexed.name, id, indexed.chunk_count);

        let mut results = Vec::with_capacity(self.question.len());
        for question in &self.question {
            let answer = service.answer_question(&id, question, &options).await?;

            if !self.json {
                if self.question.len() > 1 {
                    println!("Q: {}", question);
                }
                println!("{}", answer.answer);
                if self.show_context {
                    for (i, excerpt) in answer.context_used.iter().enumerate() {
                        println!("\n[{}] {}", i + 1, excerpt);
                    }
                }
                if self.question.len() > 1 {
                    println!();
                }
            }

            results.push(serde_json::json!({
                "question": question,
                "answer": answer.answer,
                "contextUsed": answer.context_used,
            }));
        }

        if self.json {
            let output = serde_json::json!({
                "docId": id,
                "name": indexed.name,
                "chunkCount": indexed.chunk_count,
                "answers": results,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Ok(())
    }
}
