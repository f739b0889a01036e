use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry in the bounded upsert log. Kept small on purpose: the log is a
/// live feed of "what just landed", not a second copy of the corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRecord {
    pub update_id: u64,
    pub document_id: u64,
    /// First characters of the document text, for display.
    pub text_preview: String,
    pub source: String,
    pub timestamp: DateTime<Utc>,
}

pub(crate) const PREVIEW_LEN: usize = 100;

pub(crate) fn preview(text: &str) -> String {
    if text.len() <= PREVIEW_LEN {
        return text.to_string();
    }
    let mut end = PREVIEW_LEN;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].to_string()
}
