use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry policy for remote embedding calls.
///
/// Exponential backoff with a hard cap; attempt 0 runs immediately.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetryConfig {
    /// Maximum number of retry attempts after the first try.
    pub max_retries: u32,
    /// Base delay (milliseconds) for the exponential backoff.
    pub base_delay_ms: u64,
    /// Cap on any single delay (milliseconds).
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay_ms: 100,
            max_delay_ms: 2_000,
        }
    }
}

impl RetryConfig {
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Delay before attempt `attempt` (0-indexed; attempt 0 has no delay).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        let exp = self.base_delay_ms.saturating_mul(1u64 << (attempt - 1).min(16));
        Duration::from_millis(exp.min(self.max_delay_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_attempt_has_no_delay() {
        assert_eq!(RetryConfig::default().delay_for(0), Duration::ZERO);
    }

    #[test]
    fn delays_double_then_cap() {
        let cfg = RetryConfig {
            max_retries: 5,
            base_delay_ms: 100,
            max_delay_ms: 300,
        };
        assert_eq!(cfg.delay_for(1), Duration::from_millis(100));
        assert_eq!(cfg.delay_for(2), Duration::from_millis(200));
        assert_eq!(cfg.delay_for(3), Duration::from_millis(300));
        assert_eq!(cfg.delay_for(4), Duration::from_millis(300));
    }
}
