use detector::DetectorConfig;
use embedding::EmbeddingConfig;
use retriever::ContextConfig;
use serde::{Deserialize, Serialize};
use vindex::IndexConfig;

use crate::PipelineError;

/// Top-level pipeline configuration; sub-configs carry their own defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Impact score at or above which the alert sink is invoked.
    pub alert_threshold: f32,
    /// Insert curated base-knowledge documents at construction.
    pub seed_base_knowledge: bool,
    pub embedding: EmbeddingConfig,
    pub index: IndexConfig,
    pub context: ContextConfig,
    pub detector: DetectorConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            alert_threshold: 0.5,
            seed_base_knowledge: true,
            embedding: EmbeddingConfig::default(),
            index: IndexConfig::default(),
            context: ContextConfig::default(),
            detector: DetectorConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn with_alert_threshold(mut self, threshold: f32) -> Self {
        self.alert_threshold = threshold;
        self
    }

    pub fn with_seed_base_knowledge(mut self, seed: bool) -> Self {
        self.seed_base_knowledge = seed;
        self
    }

    pub fn with_embedding(mut self, embedding: EmbeddingConfig) -> Self {
        self.embedding = embedding;
        self
    }

    pub fn with_index(mut self, index: IndexConfig) -> Self {
        self.index = index;
        self
    }

    pub fn with_context(mut self, context: ContextConfig) -> Self {
        self.context = context;
        self
    }

    pub fn with_detector(mut self, detector: DetectorConfig) -> Self {
        self.detector = detector;
        self
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if !(0.0..=1.0).contains(&self.alert_threshold) {
            return Err(PipelineError::Config(format!(
                "alert_threshold must be within [0, 1], got {}",
                self.alert_threshold
            )));
        }
        self.index.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(PipelineConfig::default().validate().is_ok());
    }

    #[test]
    fn bad_alert_threshold_rejected() {
        assert!(PipelineConfig::default().with_alert_threshold(1.5).validate().is_err());
    }
}
