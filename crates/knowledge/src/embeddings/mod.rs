//! Embedding engine for document chunks and questions.
//!
//! [`EmbeddingClient`] wraps a provider with a per-attempt timeout, retries
//! with exponential backoff, a bounded worker pool for batches and L2
//! normalization of every returned vector.

pub mod config;
pub mod provider;
pub mod providers;

pub use config::EmbeddingConfig;
pub use provider::{create_provider, EmbeddingProvider};

use docqa_core::{AppError, AppResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Embeds texts through a provider with timeout, retry and bounded concurrency.
#[derive(Debug, Clone)]
pub struct EmbeddingClient {
    provider: Arc<dyn EmbeddingProvider>,
    config: EmbeddingConfig,
}

impl EmbeddingClient {
    pub fn new(provider: Arc<dyn EmbeddingProvider>, config: EmbeddingConfig) -> Self {
        Self { provider, config }
    }

    pub fn provider(&self) -> &dyn EmbeddingProvider {
        self.provider.as_ref()
    }

    pub fn config(&self) -> &EmbeddingConfig {
        &self.config
    }

    /// Embed one text, returning a unit-length vector.
    ///
    /// Each attempt is bounded by the configured timeout. Transient failures
    /// are retried after `backoff_base * 2^(attempt - 1)` until `max_attempts`
    /// is used up, then the last failure is reported as [`AppError::Embedding`].
    /// An [`AppError::EmbeddingRejected`] from the provider fails immediately.
    pub async fn embed_one(&self, text: &str) -> AppResult<Vec<f32>> {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 1u32;

        loop {
            let failure = match tokio::time::timeout(self.config.timeout, self.provider.embed(text))
                .await
            {
                Ok(Ok(vector)) if !vector.is_empty() => return Ok(normalize(vector)),
                Ok(Ok(_)) => "provider returned an empty vector".to_string(),
                Ok(Err(AppError::EmbeddingRejected(reason))) => {
                    return Err(AppError::Embedding(format!(
                        "{} rejected the request on attempt {}: {}",
                        self.provider.provider_name(),
                        attempt,
                        reason
                    )));
                }
                Ok(Err(e)) => e.to_string(),
                Err(_) => format!("timed out after {}ms", self.config.timeout.as_millis()),
            };

            if attempt >= max_attempts {
                return Err(AppError::Embedding(format!(
                    "{} failed after {} attempt(s): {}",
                    self.provider.provider_name(),
                    attempt,
                    failure
                )));
            }

            let delay = self.config.backoff_delay(attempt);
            tracing::warn!(
                "Embedding attempt {}/{} failed ({}), retrying in {}ms",
                attempt,
                max_attempts,
                failure,
                delay.as_millis()
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    /// Embed many texts, preserving input order.
    ///
    /// At most `concurrency` calls are in flight at once. Workers pull the
    /// next unclaimed index from a shared counter, so a slow text never
    /// blocks the others. The first text that exhausts its retries fails the
    /// whole batch. A single text skips the pool.
    pub async fn embed_many(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        match texts {
            [] => return Ok(Vec::new()),
            [only] => return Ok(vec![self.embed_one(only).await?]),
            _ => {}
        }

        let workers = self.config.concurrency.clamp(1, texts.len());
        let next = AtomicUsize::new(0);

        tracing::debug!(
            "Embedding {} texts with {} workers via {} ({})",
            texts.len(),
            workers,
            self.provider.provider_name(),
            self.provider.model_name()
        );

        let batches =
            futures::future::try_join_all((0..workers).map(|_| self.drain(texts, &next))).await?;

        let mut slots: Vec<Option<Vec<f32>>> = vec![None; texts.len()];
        for (idx, vector) in batches.into_iter().flatten() {
            slots[idx] = Some(vector);
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(idx, slot)| {
                slot.ok_or_else(|| AppError::Embedding(format!("No embedding produced for text {}", idx)))
            })
            .collect()
    }

    /// Worker loop: claim indices until none remain.
    async fn drain(
        &self,
        texts: &[String],
        next: &AtomicUsize,
    ) -> AppResult<Vec<(usize, Vec<f32>)>> {
        let mut done = Vec::new();
        loop {
            let idx = next.fetch_add(1, Ordering::Relaxed);
            let Some(text) = texts.get(idx) else {
                return Ok(done);
            };
            done.push((idx, self.embed_one(text).await?));
        }
    }
}

/// Scale a vector to unit length; a zero vector is returned unchanged.
pub fn normalize(mut vector: Vec<f32>) -> Vec<f32> {
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    let divisor = if norm > 0.0 { norm } else { 1.0 };
    for v in &mut vector {
        *v /= divisor;
    }
    vector
}
