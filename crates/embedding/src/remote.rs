use std::time::Duration;

use serde_json::json;
use tracing::warn;

use crate::hashed::HashedEmbedder;
use crate::normalize::l2_normalize_in_place;
use crate::{Embedder, EmbeddingConfig, EmbeddingError};

/// HTTP feature-extraction provider with a deterministic hashed fallback.
///
/// The endpoint contract is the common feature-extraction shape: POST
/// `{"inputs": "<text>"}`, response `[f32; D]` (or `[[f32; D]]` for batch
/// endpoints that always wrap). Any transport or shape failure falls back to
/// the hashed provider so ingestion never stalls on the model service.
pub struct RemoteEmbedder {
    cfg: EmbeddingConfig,
    client: reqwest::Client,
    fallback: HashedEmbedder,
}

impl RemoteEmbedder {
    pub fn new(cfg: EmbeddingConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.api_timeout_secs))
            .connect_timeout(Duration::from_secs(cfg.api_timeout_secs.min(5)))
            .build()
            .unwrap_or_default();
        let fallback = HashedEmbedder::new(cfg.dimension, cfg.normalize);
        Self { cfg, client, fallback }
    }

    /// Async path: call the endpoint with retry + backoff.
    pub async fn embed_async(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::EmptyInput);
        }
        let url = self
            .cfg
            .api_url
            .as_deref()
            .ok_or_else(|| EmbeddingError::InvalidConfig("api_url is required for remote mode".into()))?;

        let mut last_err = EmbeddingError::Api("no attempts made".into());
        for attempt in 0..=self.cfg.retry.max_retries {
            let delay = self.cfg.retry.delay_for(attempt);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            match self.call_endpoint(url, text).await {
                Ok(vector) => return self.finish(vector),
                Err(err) => {
                    warn!(attempt, error = %err, "remote embedding attempt failed");
                    last_err = err;
                }
            }
        }
        Err(last_err)
    }

    async fn call_endpoint(&self, url: &str, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut request = self.client.post(url).json(&json!({ "inputs": text }));
        if let Some(auth) = &self.cfg.api_auth_header {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request
            .send()
            .await
            .map_err(|e| EmbeddingError::Api(e.to_string()))?;
        if !response.status().is_success() {
            return Err(EmbeddingError::Api(format!(
                "endpoint returned status {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| EmbeddingError::Api(e.to_string()))?;
        parse_vector(&body)
    }

    fn finish(&self, mut vector: Vec<f32>) -> Result<Vec<f32>, EmbeddingError> {
        if vector.len() != self.cfg.dimension {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.cfg.dimension,
                got: vector.len(),
            });
        }
        if self.cfg.normalize {
            l2_normalize_in_place(&mut vector);
        }
        Ok(vector)
    }

    /// Run the async path from sync code, reusing the ambient runtime when
    /// one exists and spinning up a throwaway runtime otherwise.
    fn embed_blocking(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            tokio::task::block_in_place(|| handle.block_on(self.embed_async(text)))
        } else {
            let runtime = tokio::runtime::Runtime::new()
                .map_err(|e| EmbeddingError::Api(format!("failed to start runtime: {e}")))?;
            runtime.block_on(self.embed_async(text))
        }
    }
}

impl Embedder for RemoteEmbedder {
    fn dimension(&self) -> usize {
        self.cfg.dimension
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        match self.embed_blocking(text) {
            Ok(vector) => Ok(vector),
            Err(EmbeddingError::EmptyInput) => Err(EmbeddingError::EmptyInput),
            Err(err) => {
                warn!(error = %err, "remote embedding unavailable, using hashed fallback");
                self.fallback.embed(text)
            }
        }
    }
}

/// Accept `[f32]` or `[[f32]]` response bodies.
fn parse_vector(body: &serde_json::Value) -> Result<Vec<f32>, EmbeddingError> {
    let row = match body.as_array() {
        Some(outer) if outer.first().map(|v| v.is_array()).unwrap_or(false) => {
            outer.first().and_then(|v| v.as_array())
        }
        Some(_) => body.as_array(),
        None => None,
    };
    let row = row.ok_or_else(|| EmbeddingError::Api("response is not a vector".into()))?;

    let mut vector = Vec::with_capacity(row.len());
    for value in row {
        let f = value
            .as_f64()
            .ok_or_else(|| EmbeddingError::Api("non-numeric component in vector".into()))?;
        vector.push(f as f32);
    }
    Ok(vector)
}
