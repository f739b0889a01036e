//! Relevance gating and context retrieval for the disruption pipeline.
//!
//! The gate decides cheaply whether an event deserves analysis at all; the
//! retriever then assembles a [`ContextBundle`] combining curated
//! supply-chain knowledge with a similarity search over the live index.

pub mod knowledge;

mod context;
mod relevance;

pub use crate::context::{ContextBundle, ContextConfig, ContextRetriever, SupplyChainInsights};
pub use crate::relevance::{
    keyword_relevant, ClassifierError, RelevanceClassifier, RelevanceGate, RELEVANCE_VOCABULARY,
};
