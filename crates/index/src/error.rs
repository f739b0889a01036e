use thiserror::Error;

/// Errors surfaced by index construction and ingestion.
///
/// Query paths deliberately do not return these: a search against a bad or
/// empty state degrades to an empty result set instead of failing the caller.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("embedding failed: {0}")]
    Embedding(#[from] embedding::EmbeddingError),

    #[error("embedding dimension mismatch: index expects {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("invalid index configuration: {0}")]
    InvalidConfig(String),
}
