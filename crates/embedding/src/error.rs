use thiserror::Error;

/// Errors surfaced by embedding providers.
#[derive(Debug, Error, Clone)]
pub enum EmbeddingError {
    /// Input text was empty or whitespace-only. Callers treat this as a
    /// per-record failure, not a pipeline-fatal condition.
    #[error("cannot embed empty text")]
    EmptyInput,
    /// Remote endpoint returned a non-success status or unusable body.
    #[error("embedding api error: {0}")]
    Api(String),
    /// Remote endpoint returned a vector of the wrong dimension.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
    /// Provider configuration is inconsistent (e.g., remote mode without a URL).
    #[error("invalid embedding config: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_mismatch_message_names_both_sizes() {
        let err = EmbeddingError::DimensionMismatch { expected: 384, got: 768 };
        assert!(err.to_string().contains("384"));
        assert!(err.to_string().contains("768"));
    }
}
