//! Offline embedding provider built from word trigrams.

use crate::embeddings::provider::EmbeddingProvider;
use docqa_core::AppResult;
use std::collections::HashMap;

const STOP_WORDS: &[&str] = &[
    "the", "is", "at", "which", "on", "a", "an", "as", "are", "was", "were", "for", "to", "of",
    "in", "and", "or", "but", "with", "by", "from", "this", "that", "be", "have", "has", "had",
    "it", "its", "their", "they", "them", "what", "how", "does", "do",
];

/// Deterministic, content-dependent embeddings with no network access.
///
/// Texts sharing words land close together, which is enough to exercise
/// retrieval end to end in development and tests. Vectors are returned
/// unnormalized, like a remote backend would.
#[derive(Debug)]
pub struct MockProvider {
    dimensions: usize,
}

impl MockProvider {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    fn bucket(&self, bytes: impl Iterator<Item = u8>, seed: u64) -> usize {
        let hash = bytes.fold(0u64, |acc, b| acc.wrapping_mul(seed).wrapping_add(b as u64));
        (hash % self.dimensions as u64) as usize
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0; self.dimensions];
        let lower = text.to_lowercase();

        let mut frequencies: HashMap<&str, u32> = HashMap::new();
        for word in lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.chars().count() > 2 && !STOP_WORDS.contains(w))
        {
            *frequencies.entry(word).or_insert(0) += 1;
        }

        for (word, freq) in frequencies {
            let chars: Vec<char> = word.chars().collect();
            for window in chars.windows(3) {
                let trigram: String = window.iter().collect();
                let idx = self.bucket(trigram.bytes(), 37);
                vector[idx] += (freq as f32).sqrt();
            }

            let idx = self.bucket(word.bytes(), 31);
            vector[idx] += freq as f32;
        }

        vector
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for MockProvider {
    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "trigram-v1"
    }

    async fn embed(&self, text: &str) -> AppResult<Vec<f32>> {
        Ok(self.vectorize(text))
    }
}
