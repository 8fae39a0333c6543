//! Question answering over an indexed document.

use super::DocumentService;
use crate::chunker::truncate_chars;
use crate::ranker::top_k;
use crate::types::{AskAnswer, AskOptions, DocumentId};
use docqa_core::{AppError, AppResult};
use docqa_llm::LlmRequest;
use docqa_prompt::build_prompt;
use std::collections::HashMap;
use std::time::Instant;

impl DocumentService {
    /// Answer a question from the closest chunks of one document.
    ///
    /// Options are validated before any remote call. The returned
    /// `context_used` holds exactly the excerpts shown to the model.
    pub async fn answer_question(
        &self,
        id: &DocumentId,
        question: &str,
        options: &AskOptions,
    ) -> AppResult<AskAnswer> {
        if question.trim().is_empty() {
            return Err(AppError::Validation("question is required".to_string()));
        }
        options.validate()?;

        let start = Instant::now();
        let record = self.store.get(id).await?;

        let query = self.embedder.embed_one(question).await?;
        let picks = top_k(&query, record.vectors(), options.top_k);

        tracing::debug!(
            "Retrieved {} of {} chunks from {} (scores: {:?})",
            picks.len(),
            record.chunks().len(),
            record.name(),
            picks.iter().map(|p| p.score).collect::<Vec<_>>()
        );

        let context_used: Vec<String> = picks
            .iter()
            .map(|pick| truncate_chars(&record.chunks()[pick.index], options.context_char_limit).to_string())
            .collect();

        let mut variables = HashMap::new();
        variables.insert("context".to_string(), number_excerpts(&context_used));
        variables.insert("question".to_string(), question.to_string());
        let built = build_prompt(&self.prompt, variables)?;

        let system = options
            .system_prompt
            .clone()
            .or(built.system)
            .unwrap_or_else(|| self.config.default_system_prompt.clone());

        let request = LlmRequest::new(built.user, &self.config.chat_model)
            .with_system(system)
            .with_max_tokens(options.max_tokens)
            .with_temperature(options.temperature);

        let response = self.llm.complete(&request).await?;
        let answer = response.content.trim().to_string();

        tracing::info!(
            "Answered question on {} (excerpts={}, answer_len={}) in {}ms",
            record.name(),
            context_used.len(),
            answer.chars().count(),
            start.elapsed().as_millis()
        );

        Ok(AskAnswer {
            answer,
            context_used,
        })
    }
}

/// Render excerpts as a numbered list, `[1]` first, separated by blank lines.
pub fn number_excerpts(excerpts: &[String]) -> String {
    excerpts
        .iter()
        .enumerate()
        .map(|(i, excerpt)| format!("[{}]\n{}", i + 1, excerpt))
        .collect::<Vec<_>>()
        .join("\n\n")
}
