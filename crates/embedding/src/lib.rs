//! # chainsight Embedding Provider (`embedding`)
//!
//! Turns free text into fixed-dimension dense vectors for similarity search.
//! Two providers are available:
//!
//! - **Hashed mode** (default) - deterministic signed feature hashing over
//!   word tokens. No model assets, no network, fully reproducible. Cosine
//!   similarity between hashed vectors tracks token overlap, which is enough
//!   for the index's ranking contract.
//! - **Remote mode** - calls an HTTP feature-extraction endpoint. Failures
//!   degrade to the hashed provider instead of propagating, so the pipeline
//!   keeps running when the model service is down.
//!
//! The [`Embedder`] trait is the seam the vector index consumes; it is sync
//! because index insert/search are sync. The remote provider bridges into the
//! async HTTP client via the current tokio runtime when one exists.
//!
//! ## Quick example
//!
//! ```
//! use embedding::{build_embedder, EmbeddingConfig};
//!
//! let embedder = build_embedder(&EmbeddingConfig::default());
//! let vector = embedder.embed("container ship aground in the Suez Canal").unwrap();
//! assert_eq!(vector.len(), 384);
//! let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
//! assert!((norm - 1.0).abs() < 1e-4);
//! ```

mod config;
mod error;
mod hashed;
mod normalize;
mod remote;
mod retry;

pub use crate::config::{EmbeddingConfig, EmbeddingMode};
pub use crate::error::EmbeddingError;
pub use crate::hashed::HashedEmbedder;
pub use crate::normalize::l2_normalize_in_place;
pub use crate::remote::RemoteEmbedder;
pub use crate::retry::RetryConfig;

use std::sync::Arc;

/// Capability of turning text into a fixed-dimension dense vector.
///
/// Implementations must be deterministic for identical input within a process
/// lifetime and must return vectors of exactly [`Embedder::dimension`]
/// components, unit-normalized when the provider is configured to normalize.
pub trait Embedder: Send + Sync {
    /// Fixed output dimension D.
    fn dimension(&self) -> usize;

    /// Embed one text. Empty or whitespace-only input is an error; the
    /// caller decides whether that is a drop or a retry.
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}

/// Build the provider described by `cfg`.
///
/// Remote mode wraps the HTTP provider around a hashed fallback; hashed mode
/// (and any unknown mode) returns the deterministic hashed provider.
pub fn build_embedder(cfg: &EmbeddingConfig) -> Arc<dyn Embedder> {
    match cfg.mode {
        EmbeddingMode::Remote => Arc::new(RemoteEmbedder::new(cfg.clone())),
        EmbeddingMode::Hashed => Arc::new(HashedEmbedder::new(cfg.dimension, cfg.normalize)),
    }
}
