//! End-to-end disruption pipeline: gate, retrieve, score, assess, alert.
//!
//! The pipeline owns the live vector index and wires the stages together
//! with explicit dependency injection; nothing here is process-global, so
//! tests (and multi-tenant embedders) can run independent instances side by
//! side. Detected disruptions are fed back into the index as historical
//! knowledge, closing the loop so the very next event can retrieve them.

mod alert;
mod config;

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use detector::{AnalysisClient, DisruptionDetector};
use embedding::build_embedder;
use event::{DisruptionEvent, RawEvent};
use impact::{ImpactAssessment, ImpactAssessor};
use retriever::{ContextRetriever, RelevanceClassifier, RelevanceGate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{info, warn};
use vindex::{DocumentMetadata, IndexStats, VectorIndex};

pub use crate::alert::{AlertError, AlertSink};
pub use crate::config::PipelineConfig;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid pipeline configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Index(#[from] vindex::IndexError),
}

/// Result of feeding one raw event through the pipeline.
#[derive(Debug)]
pub enum ProcessOutcome {
    /// Identical content already processed in this pipeline's lifetime.
    Duplicate,
    /// Failed the relevance gate.
    Irrelevant,
    /// Relevant but scored below the retention threshold.
    BelowThreshold,
    Detected(Box<ProcessedDisruption>),
}

#[derive(Debug)]
pub struct ProcessedDisruption {
    pub disruption: DisruptionEvent,
    pub assessment: ImpactAssessment,
    /// True when the impact cleared the alert threshold and a sink delivered.
    pub alert_sent: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineStatus {
    pub index: IndexStats,
    pub events_processed: u64,
    pub disruptions_detected: u64,
    pub duplicates_skipped: u64,
    pub irrelevant_skipped: u64,
    pub alerts_sent: u64,
}

#[derive(Default)]
struct Counters {
    processed: AtomicU64,
    detected: AtomicU64,
    duplicates: AtomicU64,
    irrelevant: AtomicU64,
    alerts: AtomicU64,
}

pub struct PipelineBuilder {
    cfg: PipelineConfig,
    classifier: Option<Arc<dyn RelevanceClassifier>>,
    analysis_client: Option<Arc<dyn AnalysisClient>>,
    alert_sink: Option<Arc<dyn AlertSink>>,
}

impl PipelineBuilder {
    pub fn new(cfg: PipelineConfig) -> Self {
        Self {
            cfg,
            classifier: None,
            analysis_client: None,
            alert_sink: None,
        }
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn RelevanceClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn with_analysis_client(mut self, client: Arc<dyn AnalysisClient>) -> Self {
        self.analysis_client = Some(client);
        self
    }

    pub fn with_alert_sink(mut self, sink: Arc<dyn AlertSink>) -> Self {
        self.alert_sink = Some(sink);
        self
    }

    pub fn build(self) -> Result<Pipeline, PipelineError> {
        self.cfg.validate()?;

        let embedder = build_embedder(&self.cfg.embedding);
        let index = Arc::new(VectorIndex::new(embedder, self.cfg.index.clone())?);

        if self.cfg.seed_base_knowledge {
            for (text, metadata) in retriever::knowledge::base_knowledge() {
                index.insert(&text, metadata)?;
            }
            info!(documents = index.len(), "base knowledge seeded");
        }

        let gate = match self.classifier {
            Some(classifier) => RelevanceGate::with_classifier(classifier),
            None => RelevanceGate::keyword_only(),
        };
        let detector = match self.analysis_client {
            Some(client) => DisruptionDetector::with_client(client, self.cfg.detector.clone()),
            None => DisruptionDetector::heuristic_only(self.cfg.detector.clone()),
        };
        let retriever = ContextRetriever::new(Arc::clone(&index), self.cfg.context.clone());

        Ok(Pipeline {
            cfg: self.cfg,
            index,
            gate,
            retriever,
            detector,
            assessor: ImpactAssessor::new(),
            alert_sink: self.alert_sink,
            seen: Mutex::new(HashSet::new()),
            counters: Counters::default(),
        })
    }
}

pub struct Pipeline {
    cfg: PipelineConfig,
    index: Arc<VectorIndex>,
    gate: RelevanceGate,
    retriever: ContextRetriever,
    detector: DisruptionDetector,
    assessor: ImpactAssessor,
    alert_sink: Option<Arc<dyn AlertSink>>,
    seen: Mutex<HashSet<u64>>,
    counters: Counters,
}

impl Pipeline {
    pub fn builder(cfg: PipelineConfig) -> PipelineBuilder {
        PipelineBuilder::new(cfg)
    }

    /// Shared handle to the live index, for direct search/insert access.
    pub fn index(&self) -> &Arc<VectorIndex> {
        &self.index
    }

    /// Feed one raw event through the full pipeline.
    pub async fn process(&self, event: &RawEvent) -> ProcessOutcome {
        self.counters.processed.fetch_add(1, Ordering::Relaxed);

        if !self.mark_seen(event) {
            self.counters.duplicates.fetch_add(1, Ordering::Relaxed);
            return ProcessOutcome::Duplicate;
        }

        if !self.gate.is_relevant(event).await {
            self.counters.irrelevant.fetch_add(1, Ordering::Relaxed);
            return ProcessOutcome::Irrelevant;
        }

        let context = self.retriever.retrieve(event);
        let Some(disruption) = self.detector.detect(event, &context).await else {
            return ProcessOutcome::BelowThreshold;
        };

        let assessment = self.assessor.assess(&disruption);
        self.feed_back(&disruption, &assessment);
        self.counters.detected.fetch_add(1, Ordering::Relaxed);

        let alert_sent = self.maybe_alert(&disruption, &assessment).await;

        info!(
            id = %disruption.id,
            disruption_score = disruption.disruption_score,
            impact_score = assessment.impact_score,
            alert_sent,
            "disruption processed"
        );
        ProcessOutcome::Detected(Box::new(ProcessedDisruption {
            disruption,
            assessment,
            alert_sent,
        }))
    }

    /// Process a batch in arrival order; one bad event never halts the rest.
    pub async fn process_batch(&self, events: &[RawEvent]) -> Vec<ProcessedDisruption> {
        let mut retained = Vec::new();
        for event in events {
            if let ProcessOutcome::Detected(processed) = self.process(event).await {
                retained.push(*processed);
            }
        }
        info!(
            batch = events.len(),
            retained = retained.len(),
            "batch processed"
        );
        retained
    }

    pub fn status(&self) -> PipelineStatus {
        PipelineStatus {
            index: self.index.stats(),
            events_processed: self.counters.processed.load(Ordering::Relaxed),
            disruptions_detected: self.counters.detected.load(Ordering::Relaxed),
            duplicates_skipped: self.counters.duplicates.load(Ordering::Relaxed),
            irrelevant_skipped: self.counters.irrelevant.load(Ordering::Relaxed),
            alerts_sent: self.counters.alerts.load(Ordering::Relaxed),
        }
    }

    /// True the first time this content key is seen.
    fn mark_seen(&self, event: &RawEvent) -> bool {
        let key = event.dedup_key();
        self.seen
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key)
    }

    /// Index the detected disruption as historical knowledge. Failures are
    /// logged; a missing feedback document must not fail the detection that
    /// produced it.
    fn feed_back(&self, disruption: &DisruptionEvent, assessment: &ImpactAssessment) {
        let source = &disruption.source_data;
        let text = format!(
            "{}. {} Location: {}",
            source.title, source.description, source.location
        );
        let metadata = DocumentMetadata::new(source.source.clone())
            .with_kind("historical_disruption")
            .with_location(source.location.clone())
            .with_severity(source.severity.as_str())
            .with_extra("disruption_id", json!(disruption.id))
            .with_extra("disruption_score", json!(disruption.disruption_score))
            .with_extra("disruption_type", json!(disruption.disruption_type.as_str()))
            .with_extra("impact_score", json!(assessment.impact_score));

        if let Err(e) = self.index.insert(&text, metadata) {
            warn!(id = %disruption.id, error = %e, "failed to index disruption feedback");
        }
    }

    async fn maybe_alert(
        &self,
        disruption: &DisruptionEvent,
        assessment: &ImpactAssessment,
    ) -> bool {
        if assessment.impact_score < self.cfg.alert_threshold {
            return false;
        }
        let Some(sink) = &self.alert_sink else {
            return false;
        };
        match sink.send(disruption, assessment).await {
            Ok(()) => {
                self.counters.alerts.fetch_add(1, Ordering::Relaxed);
                true
            }
            Err(e) => {
                warn!(id = %disruption.id, error = %e, "alert delivery failed");
                false
            }
        }
    }
}
