//! Streaming in-memory vector index.
//!
//! Documents are embedded on insert, held behind a single [`RwLock`], and
//! searched by exact cosine similarity over unit-normalized vectors. Inserts
//! are visible to the next search with no refresh step, ids are monotonic and
//! never reused, and a bounded upsert log exposes what landed recently.
//!
//! Brute-force scan is the deliberate choice here: corpora in the tens of
//! thousands of documents scan in well under a millisecond, and exactness
//! removes a whole class of recall tuning.

mod config;
mod document;
mod error;
mod log;
mod query;

use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};
use embedding::Embedder;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use crate::config::IndexConfig;
pub use crate::document::{Document, DocumentMetadata};
pub use crate::error::IndexError;
pub use crate::log::UpdateRecord;
pub use crate::query::{Freshness, SearchHit};

/// Point-in-time counters for monitoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexStats {
    pub total_documents: usize,
    pub update_counter: u64,
    /// Entries currently held in the bounded upsert log.
    pub recent_updates: usize,
    pub last_update: Option<DateTime<Utc>>,
    pub dimension: usize,
}

struct IndexInner {
    documents: VecDeque<Document>,
    upsert_log: VecDeque<UpdateRecord>,
    update_counter: u64,
    next_id: u64,
    last_update: Option<DateTime<Utc>>,
}

/// Thread-safe vector index with read-your-writes semantics.
///
/// A write lock is held only for the in-memory append; embedding happens
/// before the lock is taken so slow providers never block readers.
pub struct VectorIndex {
    embedder: Arc<dyn Embedder>,
    cfg: IndexConfig,
    inner: RwLock<IndexInner>,
}

impl VectorIndex {
    pub fn new(embedder: Arc<dyn Embedder>, cfg: IndexConfig) -> Result<Self, IndexError> {
        cfg.validate()?;
        Ok(Self {
            embedder,
            cfg,
            inner: RwLock::new(IndexInner {
                documents: VecDeque::new(),
                upsert_log: VecDeque::new(),
                update_counter: 0,
                next_id: 0,
                last_update: None,
            }),
        })
    }

    pub fn config(&self) -> &IndexConfig {
        &self.cfg
    }

    pub fn dimension(&self) -> usize {
        self.embedder.dimension()
    }

    /// Embed and append a document. Returns the assigned id.
    ///
    /// The new document is visible to any search that starts after this call
    /// returns. If `max_documents` is set, the oldest document is evicted to
    /// make room; evicted ids are never reassigned.
    pub fn insert(&self, text: &str, metadata: DocumentMetadata) -> Result<u64, IndexError> {
        let embedding = self.embedder.embed(text)?;
        if embedding.len() != self.embedder.dimension() {
            return Err(IndexError::DimensionMismatch {
                expected: self.embedder.dimension(),
                got: embedding.len(),
            });
        }

        let now = Utc::now();
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let id = inner.next_id;
        inner.next_id += 1;
        inner.update_counter += 1;
        let update_id = inner.update_counter;

        let mut metadata = metadata;
        metadata.added_at = now;
        metadata.update_id = update_id;

        inner.upsert_log.push_back(UpdateRecord {
            update_id,
            document_id: id,
            text_preview: log::preview(text),
            source: metadata.source.clone(),
            timestamp: now,
        });
        while inner.upsert_log.len() > self.cfg.upsert_log_capacity {
            inner.upsert_log.pop_front();
        }

        inner.documents.push_back(Document {
            id,
            text: text.to_string(),
            embedding,
            metadata,
        });
        if let Some(max) = self.cfg.max_documents {
            while inner.documents.len() > max {
                inner.documents.pop_front();
            }
        }
        inner.last_update = Some(now);

        debug!(id, update_id, total = inner.documents.len(), "document indexed");
        Ok(id)
    }

    /// Exact top-`k` cosine search at the configured defaults.
    pub fn search_default(&self, query: &str) -> Vec<SearchHit> {
        self.search(query, self.cfg.default_top_k, self.cfg.default_threshold)
    }

    /// Exact top-`k` cosine search.
    ///
    /// Ties are broken by insertion order, earlier documents first. Query
    /// failures (empty text, provider errors) and an empty index both yield
    /// an empty result set rather than an error.
    pub fn search(&self, query: &str, k: usize, threshold: f32) -> Vec<SearchHit> {
        if k == 0 {
            return Vec::new();
        }
        let query_vec = match self.embedder.embed(query) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "query embedding failed, returning empty result");
                return Vec::new();
            }
        };

        let now = Utc::now();
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        let mut scored: Vec<(f32, &Document)> = inner
            .documents
            .iter()
            .map(|doc| (query::dot(&query_vec, &doc.embedding), doc))
            .filter(|(score, _)| *score >= threshold)
            .collect();

        scored.sort_by(|(sa, da), (sb, db)| {
            sb.partial_cmp(sa)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(da.id.cmp(&db.id))
        });
        scored.truncate(k);

        scored
            .into_iter()
            .enumerate()
            .map(|(i, (score, doc))| SearchHit {
                id: doc.id,
                text: doc.text.clone(),
                score,
                rank: i + 1,
                freshness: Freshness::at(doc.metadata.added_at, now),
                metadata: doc.metadata.clone(),
            })
            .collect()
    }

    /// Upsert-log entries no older than `within`, newest first.
    pub fn recent_updates(&self, within: Duration) -> Vec<UpdateRecord> {
        let cutoff = Utc::now() - within;
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner
            .upsert_log
            .iter()
            .rev()
            .take_while(|r| r.timestamp >= cutoff)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .documents
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> IndexStats {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        IndexStats {
            total_documents: inner.documents.len(),
            update_counter: inner.update_counter,
            recent_updates: inner.upsert_log.len(),
            last_update: inner.last_update,
            dimension: self.embedder.dimension(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedding::HashedEmbedder;

    fn make_index(cfg: IndexConfig) -> VectorIndex {
        let embedder = Arc::new(HashedEmbedder::new(64, true));
        VectorIndex::new(embedder, cfg).unwrap()
    }

    fn meta(source: &str) -> DocumentMetadata {
        DocumentMetadata::new(source)
    }

    #[test]
    fn insert_is_immediately_visible() {
        let index = make_index(IndexConfig::default());
        assert!(index.search("suez canal blockage", 5, 0.0).is_empty());

        index
            .insert("major blockage reported in the suez canal", meta("news"))
            .unwrap();
        let hits = index.search("suez canal blockage", 5, 0.0);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].rank, 1);
        assert_eq!(hits[0].freshness, Freshness::Live);
    }

    #[test]
    fn ids_are_monotonic() {
        let index = make_index(IndexConfig::default());
        let a = index.insert("port congestion in shanghai", meta("a")).unwrap();
        let b = index.insert("typhoon near taiwan strait", meta("b")).unwrap();
        let c = index.insert("rail strike in germany", meta("c")).unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn ties_break_by_insertion_order() {
        let index = make_index(IndexConfig::default());
        let first = index.insert("identical text", meta("a")).unwrap();
        let second = index.insert("identical text", meta("b")).unwrap();

        let hits = index.search("identical text", 5, 0.0);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, first);
        assert_eq!(hits[1].id, second);
        assert!((hits[0].score - hits[1].score).abs() < 1e-6);
    }

    #[test]
    fn zero_k_returns_nothing() {
        let index = make_index(IndexConfig::default());
        index.insert("anything at all", meta("x")).unwrap();
        assert!(index.search("anything at all", 0, 0.0).is_empty());
    }

    #[test]
    fn threshold_filters_low_scores() {
        let index = make_index(IndexConfig::default());
        index
            .insert("volcanic ash closes european airspace", meta("x"))
            .unwrap();
        let loose = index.search("completely unrelated query text", 5, 0.0);
        let strict = index.search("completely unrelated query text", 5, 0.9);
        assert!(strict.len() <= loose.len());
        assert!(strict.iter().all(|h| h.score >= 0.9));
    }

    #[test]
    fn empty_query_yields_empty_result() {
        let index = make_index(IndexConfig::default());
        index.insert("some document", meta("x")).unwrap();
        assert!(index.search("", 5, 0.0).is_empty());
    }

    #[test]
    fn eviction_respects_max_documents() {
        let cfg = IndexConfig::default().with_max_documents(2);
        let index = make_index(cfg);
        index.insert("first document", meta("a")).unwrap();
        index.insert("second document", meta("b")).unwrap();
        index.insert("third document", meta("c")).unwrap();

        assert_eq!(index.len(), 2);
        // Evicted documents no longer match, new ones still do.
        assert!(index.search("first document", 5, 0.9).is_empty());
        assert!(!index.search("third document", 5, 0.9).is_empty());
    }

    #[test]
    fn upsert_log_is_bounded_and_newest_first() {
        let cfg = IndexConfig::default().with_upsert_log_capacity(3);
        let index = make_index(cfg);
        for i in 0..5 {
            index.insert(&format!("document number {i}"), meta("feed")).unwrap();
        }

        let updates = index.recent_updates(Duration::minutes(30));
        assert_eq!(updates.len(), 3);
        assert!(updates[0].update_id > updates[1].update_id);
        assert!(updates[1].update_id > updates[2].update_id);
        assert_eq!(updates[0].update_id, 5);
    }

    #[test]
    fn stats_track_inserts() {
        let index = make_index(IndexConfig::default());
        assert_eq!(index.stats().total_documents, 0);
        assert!(index.stats().last_update.is_none());

        index.insert("a document", meta("x")).unwrap();
        let stats = index.stats();
        assert_eq!(stats.total_documents, 1);
        assert_eq!(stats.update_counter, 1);
        assert_eq!(stats.recent_updates, 1);
        assert!(stats.last_update.is_some());
        assert_eq!(stats.dimension, 64);
    }

    #[test]
    fn concurrent_inserts_and_searches() {
        let index = Arc::new(make_index(IndexConfig::default()));
        let mut handles = Vec::new();
        for t in 0..4 {
            let index = Arc::clone(&index);
            handles.push(std::thread::spawn(move || {
                for i in 0..25 {
                    index
                        .insert(&format!("thread {t} document {i}"), meta("load"))
                        .unwrap();
                    let hits = index.search("thread document", 5, 0.0);
                    for hit in &hits {
                        assert!(hit.score.is_finite());
                    }
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(index.len(), 100);
        assert_eq!(index.stats().update_counter, 100);
    }
}
