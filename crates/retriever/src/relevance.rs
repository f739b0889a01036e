//! Two-stage relevance gate.
//!
//! Stage one is a cheap keyword scan over a fixed vocabulary; events that
//! fail it are dropped without ever reaching a model. Stage two, when a
//! classifier is configured, can veto keyword false positives. A classifier
//! failure degrades to the stage-one verdict instead of blocking the feed.

use std::sync::Arc;

use async_trait::async_trait;
use event::RawEvent;
use thiserror::Error;
use tracing::warn;

/// Supply-chain vocabulary, grouped by semantic category. One hit anywhere
/// passes stage one.
pub static RELEVANCE_VOCABULARY: [(&str, &[&str]); 6] = [
    ("logistics", &["supply chain", "logistics", "shipping", "transport", "cargo", "freight"]),
    ("infrastructure", &["port", "airport", "highway", "rail", "truck", "vessel", "container"]),
    ("operations", &["warehouse", "distribution", "manufacturing", "production", "assembly"]),
    ("disruptions", &["delay", "disruption", "shortage", "bottleneck", "congestion", "closure"]),
    ("events", &["strike", "accident", "weather", "storm", "flood", "earthquake", "fire"]),
    ("geopolitical", &["sanctions", "trade war", "border", "customs", "tariff", "embargo"]),
];

#[derive(Debug, Error)]
#[error("relevance classifier failed: {0}")]
pub struct ClassifierError(pub String);

/// Model-assisted stage-two check. Implementations decide whether an event
/// that already passed the keyword scan is genuinely supply-chain relevant.
#[async_trait]
pub trait RelevanceClassifier: Send + Sync {
    async fn is_relevant(&self, event: &RawEvent) -> Result<bool, ClassifierError>;
}

/// Keyword scan over title and description.
pub fn keyword_relevant(event: &RawEvent) -> bool {
    let text = event.searchable_text();
    RELEVANCE_VOCABULARY
        .iter()
        .flat_map(|(_, keywords)| keywords.iter())
        .any(|keyword| text.contains(keyword))
}

pub struct RelevanceGate {
    classifier: Option<Arc<dyn RelevanceClassifier>>,
}

impl RelevanceGate {
    pub fn keyword_only() -> Self {
        Self { classifier: None }
    }

    pub fn with_classifier(classifier: Arc<dyn RelevanceClassifier>) -> Self {
        Self { classifier: Some(classifier) }
    }

    /// Gate an event. The classifier is only consulted for events that pass
    /// the keyword scan, so irrelevant volume never incurs model calls.
    pub async fn is_relevant(&self, event: &RawEvent) -> bool {
        if !keyword_relevant(event) {
            return false;
        }
        match &self.classifier {
            None => true,
            Some(classifier) => match classifier.is_relevant(event).await {
                Ok(verdict) => verdict,
                Err(e) => {
                    warn!(error = %e, "classifier unavailable, keeping keyword verdict");
                    true
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(title: &str, description: &str) -> RawEvent {
        RawEvent::new("test", "news", title, description)
    }

    struct AlwaysNo;

    #[async_trait]
    impl RelevanceClassifier for AlwaysNo {
        async fn is_relevant(&self, _event: &RawEvent) -> Result<bool, ClassifierError> {
            Ok(false)
        }
    }

    struct AlwaysFails;

    #[async_trait]
    impl RelevanceClassifier for AlwaysFails {
        async fn is_relevant(&self, _event: &RawEvent) -> Result<bool, ClassifierError> {
            Err(ClassifierError("timeout".into()))
        }
    }

    #[test]
    fn keyword_scan_accepts_supply_chain_text() {
        assert!(keyword_relevant(&raw("Port congestion worsens", "container backlog grows")));
        assert!(keyword_relevant(&raw("Workers strike", "assembly halted at plant")));
    }

    #[test]
    fn keyword_scan_rejects_unrelated_text() {
        assert!(!keyword_relevant(&raw("Local team wins championship", "fans celebrate downtown")));
    }

    #[tokio::test]
    async fn classifier_is_skipped_for_keyword_misses() {
        // A vetoing classifier behind the gate: a keyword miss must be
        // dropped without asking it.
        let gate = RelevanceGate::with_classifier(Arc::new(AlwaysNo));
        assert!(!gate.is_relevant(&raw("Celebrity gossip", "nothing relevant here")).await);
    }

    #[tokio::test]
    async fn classifier_can_veto_keyword_hits() {
        let gate = RelevanceGate::with_classifier(Arc::new(AlwaysNo));
        assert!(!gate.is_relevant(&raw("Traffic delay downtown", "commuters annoyed")).await);
    }

    #[tokio::test]
    async fn classifier_failure_degrades_to_keyword_verdict() {
        let gate = RelevanceGate::with_classifier(Arc::new(AlwaysFails));
        assert!(gate.is_relevant(&raw("Port closure announced", "shipping suspended")).await);
    }

    #[tokio::test]
    async fn keyword_only_gate_passes_hits() {
        let gate = RelevanceGate::keyword_only();
        assert!(gate.is_relevant(&raw("Freight rates spike", "cargo demand surges")).await);
    }
}
