use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::DocumentMetadata;

/// Age bucket of a document relative to query time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Freshness {
    /// Added within the last minute.
    Live,
    /// Added within the last hour.
    Recent,
    /// Added within the last day.
    Today,
    Historical,
}

impl Freshness {
    pub fn from_age(age: Duration) -> Self {
        if age < Duration::seconds(60) {
            Freshness::Live
        } else if age < Duration::hours(1) {
            Freshness::Recent
        } else if age < Duration::days(1) {
            Freshness::Today
        } else {
            Freshness::Historical
        }
    }

    pub fn at(added_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self::from_age(now.signed_duration_since(added_at))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Freshness::Live => "live",
            Freshness::Recent => "recent",
            Freshness::Today => "today",
            Freshness::Historical => "historical",
        }
    }
}

/// One search result. `rank` is 1-based within the returned set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: u64,
    pub text: String,
    pub score: f32,
    pub rank: usize,
    pub freshness: Freshness,
    pub metadata: DocumentMetadata,
}

/// Both sides are unit-normalized, so the dot product is the cosine.
pub(crate) fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
