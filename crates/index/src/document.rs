use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Structured attributes attached to every indexed document.
///
/// The typed fields are the ones the scoring pipeline keys on; anything else
/// a source wants to carry rides along in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Feed or subsystem that produced the document.
    #[serde(default)]
    pub source: String,

    /// Free-form location string, e.g. "Suez Canal, Egypt".
    #[serde(default)]
    pub location: String,

    /// Document kind, e.g. "event", "base_knowledge", "historical_disruption".
    #[serde(default)]
    pub kind: String,

    /// Source-reported severity label, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,

    /// Strategic importance on a 0-10 scale, for base-knowledge entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<f64>,

    /// When the document entered the index. Set at insert time.
    #[serde(default = "Utc::now")]
    pub added_at: DateTime<Utc>,

    /// Sequence number of the insert that produced this document.
    #[serde(default)]
    pub update_id: u64,

    /// Passthrough attributes not modeled above.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

impl DocumentMetadata {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            added_at: Utc::now(),
            ..Self::default()
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_severity(mut self, severity: impl Into<String>) -> Self {
        self.severity = Some(severity.into());
        self
    }

    pub fn with_importance(mut self, importance: f64) -> Self {
        self.importance = Some(importance);
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// An indexed document: the original text, its unit-normalized embedding, and
/// structured metadata. Ids are assigned by the index and never reused.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: u64,
    pub text: String,
    pub embedding: Vec<f32>,
    pub metadata: DocumentMetadata,
}
