//! Embedding call policy.

use std::time::Duration;

/// How the embedding client calls its provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbeddingConfig {
    /// Deadline of a single attempt
    pub timeout: Duration,

    /// Total attempts per text, first call included
    pub max_attempts: u32,

    /// Delay after the first failed attempt; doubles after each further one
    pub backoff_base: Duration,

    /// Calls allowed in flight during a batch
    pub concurrency: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(20),
            max_attempts: 3,
            backoff_base: Duration::from_millis(800),
            concurrency: 2,
        }
    }
}

impl EmbeddingConfig {
    /// Delay before retrying after failed attempt number `attempt` (1-based).
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.backoff_base.saturating_mul(1u32 << exponent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles() {
        let config = EmbeddingConfig::default();
        assert_eq!(config.backoff_delay(1), Duration::from_millis(800));
        assert_eq!(config.backoff_delay(2), Duration::from_millis(1600));
        assert_eq!(config.backoff_delay(3), Duration::from_millis(3200));
    }

    #[test]
    fn test_backoff_saturates() {
        let config = EmbeddingConfig {
            backoff_base: Duration::MAX,
            ..EmbeddingConfig::default()
        };
        assert_eq!(config.backoff_delay(40), Duration::MAX);
    }
}
