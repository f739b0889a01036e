//! Disruption detection: turns a gated raw event plus its retrieved context
//! into a scored [`DisruptionEvent`], or nothing when the evidence is weak.
//!
//! Two scoring paths exist. With an [`AnalysisClient`] configured, a model
//! produces a structured [`EventAnalysis`] that feeds the weighted scorer.
//! Without one, or when the model fails or times out, a deterministic
//! keyword heuristic takes over, so detection never depends on an external
//! service being up.

mod analysis;
mod client;
pub mod heuristic;
mod score;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use event::{DisruptionEvent, RawEvent};
use retriever::ContextBundle;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use crate::analysis::EventAnalysis;
pub use crate::client::{AnalysisClient, AnalysisError, RemoteAnalysisClient, RemoteAnalysisConfig};
pub use crate::score::weighted_score;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Events scoring below this are dropped.
    pub score_threshold: f32,
    /// Upper bound on one model analysis call.
    pub analysis_timeout_secs: u64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            score_threshold: 0.3,
            analysis_timeout_secs: 15,
        }
    }
}

impl DetectorConfig {
    pub fn with_score_threshold(mut self, threshold: f32) -> Self {
        self.score_threshold = threshold;
        self
    }

    pub fn with_analysis_timeout_secs(mut self, secs: u64) -> Self {
        self.analysis_timeout_secs = secs;
        self
    }
}

pub struct DisruptionDetector {
    client: Option<Arc<dyn AnalysisClient>>,
    cfg: DetectorConfig,
}

impl DisruptionDetector {
    pub fn heuristic_only(cfg: DetectorConfig) -> Self {
        Self { client: None, cfg }
    }

    pub fn with_client(client: Arc<dyn AnalysisClient>, cfg: DetectorConfig) -> Self {
        Self { client: Some(client), cfg }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.cfg
    }

    /// Score one event against its context. Returns `None` when the score
    /// stays below the retention threshold.
    pub async fn detect(
        &self,
        event: &RawEvent,
        context: &ContextBundle,
    ) -> Option<DisruptionEvent> {
        let (score, analysis) = match self.analyze(event, context).await {
            Some(analysis) => (weighted_score(&analysis, context), Some(analysis)),
            None => (heuristic::score(event), None),
        };

        if score < self.cfg.score_threshold {
            debug!(score, title = %event.title, "event below disruption threshold");
            return None;
        }

        let disruption = match analysis {
            Some(analysis) => DisruptionEvent {
                id: DisruptionEvent::make_id(&event.source),
                source_data: event.clone(),
                disruption_score: score,
                disruption_type: analysis.disruption_type,
                affected_sectors: analysis.affected_sectors,
                geographic_scope: analysis.geographic_scope,
                urgency_level: analysis.urgency_level,
                matched_keywords: heuristic::matched_keywords(event),
                detected_at: Utc::now(),
            },
            None => DisruptionEvent {
                id: DisruptionEvent::make_id(&event.source),
                source_data: event.clone(),
                disruption_score: score,
                disruption_type: heuristic::classify_type(event),
                affected_sectors: heuristic::affected_sectors(event),
                geographic_scope: heuristic::geographic_scope(event),
                urgency_level: heuristic::urgency(event, score),
                matched_keywords: heuristic::matched_keywords(event),
                detected_at: Utc::now(),
            },
        };

        debug!(
            id = %disruption.id,
            score = disruption.disruption_score,
            kind = disruption.disruption_type.as_str(),
            "disruption detected"
        );
        Some(disruption)
    }

    async fn analyze(&self, event: &RawEvent, context: &ContextBundle) -> Option<EventAnalysis> {
        let client = self.client.as_ref()?;
        let deadline = Duration::from_secs(self.cfg.analysis_timeout_secs);
        match tokio::time::timeout(deadline, client.analyze(event, context)).await {
            Ok(Ok(analysis)) => Some(analysis),
            Ok(Err(e)) => {
                warn!(error = %e, "model analysis failed, falling back to heuristic");
                None
            }
            Err(_) => {
                warn!(timeout_secs = deadline.as_secs(), "model analysis timed out, falling back to heuristic");
                None
            }
        }
    }
}
