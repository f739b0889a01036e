use serde::{Deserialize, Serialize};

use crate::retry::RetryConfig;

/// Which provider to build.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingMode {
    /// Deterministic signed feature hashing (local, no dependencies).
    #[default]
    Hashed,
    /// Remote HTTP feature-extraction endpoint with hashed fallback.
    Remote,
}

/// Runtime configuration for embedding generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddingConfig {
    pub mode: EmbeddingMode,
    /// Fixed output dimension D. Every vector the provider emits has exactly
    /// this many components.
    pub dimension: usize,
    /// Friendly label surfaced in index stats and logs.
    pub model_name: String,
    /// Normalize vectors to unit length (required for cosine-as-dot-product).
    pub normalize: bool,
    /// Remote endpoint when [`mode`](Self::mode) is `remote`.
    pub api_url: Option<String>,
    /// Authorization header value (e.g., `"Bearer hf_xxx"`).
    pub api_auth_header: Option<String>,
    /// Overall per-request timeout in seconds for the remote provider.
    pub api_timeout_secs: u64,
    /// Retry policy for remote calls.
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            mode: EmbeddingMode::Hashed,
            dimension: 384,
            model_name: "hashed-bow-v1".into(),
            normalize: true,
            api_url: None,
            api_auth_header: None,
            api_timeout_secs: 10,
            retry: RetryConfig::default(),
        }
    }
}

impl EmbeddingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: EmbeddingMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    pub fn with_api_url(mut self, url: &str) -> Self {
        self.api_url = Some(url.to_string());
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}
