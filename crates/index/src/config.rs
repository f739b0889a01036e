use serde::{Deserialize, Serialize};

use crate::IndexError;

/// Tuning knobs for [`VectorIndex`](crate::VectorIndex).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Oldest documents are evicted once this many are held. `None` keeps
    /// everything for the life of the process.
    #[serde(default)]
    pub max_documents: Option<usize>,

    /// Ring capacity of the streaming upsert log.
    #[serde(default = "default_log_capacity")]
    pub upsert_log_capacity: usize,

    /// Result count used when a caller does not pass an explicit `k`.
    #[serde(default = "default_top_k")]
    pub default_top_k: usize,

    /// Minimum cosine similarity a hit must reach to be returned.
    #[serde(default = "default_threshold")]
    pub default_threshold: f32,
}

fn default_log_capacity() -> usize {
    128
}

fn default_top_k() -> usize {
    5
}

fn default_threshold() -> f32 {
    0.3
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            max_documents: None,
            upsert_log_capacity: default_log_capacity(),
            default_top_k: default_top_k(),
            default_threshold: default_threshold(),
        }
    }
}

impl IndexConfig {
    pub fn with_max_documents(mut self, max: usize) -> Self {
        self.max_documents = Some(max);
        self
    }

    pub fn with_upsert_log_capacity(mut self, capacity: usize) -> Self {
        self.upsert_log_capacity = capacity;
        self
    }

    pub fn with_default_top_k(mut self, k: usize) -> Self {
        self.default_top_k = k;
        self
    }

    pub fn with_default_threshold(mut self, threshold: f32) -> Self {
        self.default_threshold = threshold;
        self
    }

    pub fn validate(&self) -> Result<(), IndexError> {
        if self.upsert_log_capacity == 0 {
            return Err(IndexError::InvalidConfig(
                "upsert_log_capacity must be at least 1".into(),
            ));
        }
        if let Some(0) = self.max_documents {
            return Err(IndexError::InvalidConfig(
                "max_documents must be at least 1 when set".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.default_threshold) {
            return Err(IndexError::InvalidConfig(format!(
                "default_threshold must be within [0, 1], got {}",
                self.default_threshold
            )));
        }
        Ok(())
    }
}
