use fxhash::hash64;

use crate::normalize::l2_normalize_in_place;
use crate::{Embedder, EmbeddingError};

/// Deterministic signed feature-hashing embedder.
///
/// Each word token is hashed once; the low bits pick a bucket and one extra
/// bit picks the sign, so accidental bucket collisions cancel in expectation.
/// Token counts accumulate, which makes the cosine of two hashed vectors a
/// proxy for weighted token overlap: identical texts score ~1.0, disjoint
/// texts score ~0.0. That is exactly the ranking signal the index needs, with
/// zero model assets and fully reproducible output.
#[derive(Debug, Clone)]
pub struct HashedEmbedder {
    dimension: usize,
    normalize: bool,
}

impl HashedEmbedder {
    pub fn new(dimension: usize, normalize: bool) -> Self {
        Self { dimension, normalize }
    }

    /// Lowercased alphanumeric word tokens; everything else is a separator.
    fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(|t| t.to_lowercase())
    }
}

impl Embedder for HashedEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut v = vec![0f32; self.dimension];
        let mut token_count = 0usize;

        for token in Self::tokenize(text) {
            let h = hash64(token.as_bytes());
            let bucket = (h % self.dimension as u64) as usize;
            // One bit above the bucket range decides the sign.
            let sign = if (h >> 32) & 1 == 0 { 1.0 } else { -1.0 };
            v[bucket] += sign;
            token_count += 1;
        }

        if token_count == 0 {
            return Err(EmbeddingError::EmptyInput);
        }

        if self.normalize {
            l2_normalize_in_place(&mut v);
        }
        Ok(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cosine(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    #[test]
    fn identical_text_cosine_is_one() {
        let e = HashedEmbedder::new(384, true);
        let a = e.embed("Suez Canal traffic disruption, container ship aground").unwrap();
        let b = e.embed("Suez Canal traffic disruption, container ship aground").unwrap();
        assert!((cosine(&a, &b) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn overlapping_text_scores_above_half() {
        let e = HashedEmbedder::new(384, true);
        let doc = e.embed("Suez Canal traffic disruption, container ship aground").unwrap();
        let query = e.embed("Suez Canal disruption").unwrap();
        assert!(cosine(&doc, &query) > 0.5, "overlap cosine {}", cosine(&doc, &query));
    }

    #[test]
    fn unrelated_text_scores_low() {
        let e = HashedEmbedder::new(384, true);
        let a = e.embed("typhoon approaching Shanghai port operations").unwrap();
        let b = e.embed("local bakery wins pastry award").unwrap();
        assert!(cosine(&a, &b).abs() < 0.3);
    }

    #[test]
    fn tokenization_is_case_insensitive() {
        let e = HashedEmbedder::new(64, true);
        let a = e.embed("ROTTERDAM Port").unwrap();
        let b = e.embed("rotterdam port").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_and_punctuation_only_inputs_fail() {
        let e = HashedEmbedder::new(64, true);
        assert!(matches!(e.embed(""), Err(EmbeddingError::EmptyInput)));
        assert!(matches!(e.embed("!!! --- ..."), Err(EmbeddingError::EmptyInput)));
    }

    #[test]
    fn output_is_unit_normalized() {
        let e = HashedEmbedder::new(384, true);
        let v = e.embed("freight congestion at the port of Los Angeles").unwrap();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-4);
    }

    #[test]
    fn unnormalized_mode_keeps_raw_counts() {
        let e = HashedEmbedder::new(64, false);
        let v = e.embed("port port port").unwrap();
        let sum_abs: f32 = v.iter().map(|x| x.abs()).sum();
        assert!((sum_abs - 3.0).abs() < 1e-6);
    }
}
