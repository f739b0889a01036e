use std::time::Duration;

use async_trait::async_trait;
use event::RawEvent;
use retriever::ContextBundle;
use serde_json::{json, Value};
use thiserror::Error;

use crate::EventAnalysis;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("analysis request failed: {0}")]
    Request(String),

    #[error("analysis response malformed: {0}")]
    Response(String),

    #[error("analysis timed out")]
    Timeout,
}

/// Model-assisted analysis of a gated event. Implementations return a full
/// [`EventAnalysis`]; callers treat any error as "use the heuristic instead".
#[async_trait]
pub trait AnalysisClient: Send + Sync {
    async fn analyze(
        &self,
        event: &RawEvent,
        context: &ContextBundle,
    ) -> Result<EventAnalysis, AnalysisError>;
}

#[derive(Debug, Clone)]
pub struct RemoteAnalysisConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub timeout_secs: u64,
}

impl RemoteAnalysisConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: None,
            model: "gpt-3.5-turbo".to_string(),
            timeout_secs: 20,
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Chat-completions backed analysis client.
pub struct RemoteAnalysisClient {
    cfg: RemoteAnalysisConfig,
    client: reqwest::Client,
}

impl RemoteAnalysisClient {
    pub fn new(cfg: RemoteAnalysisConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .unwrap_or_default();
        Self { cfg, client }
    }

    fn build_prompt(event: &RawEvent, context: &ContextBundle) -> String {
        let routes: Vec<&str> = context.relevant_routes.iter().map(|r| r.name).collect();
        let sectors: Vec<&str> = context.affected_sectors.iter().map(|s| s.name).collect();
        format!(
            "As a supply chain expert, analyze this disruption event:\n\n\
             EVENT DETAILS:\n\
             Title: {title}\n\
             Description: {description}\n\
             Location: {location}\n\
             Event Type: {event_type}\n\
             Severity: {severity}\n\n\
             CONTEXT:\n\
             Relevant Trade Routes: {routes:?}\n\
             Affected Sectors: {sectors:?}\n\
             Location Importance (1-10): {importance}\n\n\
             Provide analysis in JSON format:\n\
             {{\n\
               \"disruption_type\": \"weather_event|geopolitical|infrastructure|cyber_incident|labor_disruption|natural_disaster|other\",\n\
               \"affected_sectors\": [\"electronics\", \"automotive\", \"pharmaceuticals\", \"agriculture\", \"energy\", \"retail\"],\n\
               \"geographic_scope\": \"local|regional|national|international|global\",\n\
               \"urgency_level\": \"low|medium|high|critical\",\n\
               \"confidence_level\": 0.0,\n\
               \"predicted_duration_days\": 0,\n\
               \"impact_severity\": \"minor|moderate|major|severe\",\n\
               \"cascading_effects\": [],\n\
               \"mitigation_suggestions\": []\n\
             }}",
            title = event.title,
            description = event.description,
            location = event.location,
            event_type = event.event_type,
            severity = event.severity.as_str(),
            routes = routes,
            sectors = sectors,
            importance = context.location_importance,
        )
    }
}

#[async_trait]
impl AnalysisClient for RemoteAnalysisClient {
    async fn analyze(
        &self,
        event: &RawEvent,
        context: &ContextBundle,
    ) -> Result<EventAnalysis, AnalysisError> {
        let body = json!({
            "model": self.cfg.model,
            "messages": [{"role": "user", "content": Self::build_prompt(event, context)}],
            "max_tokens": 500,
            "temperature": 0.3,
        });

        let mut request = self.client.post(&self.cfg.api_url).json(&body);
        if let Some(key) = &self.cfg.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AnalysisError::Request(e.to_string()))?;
        if !response.status().is_success() {
            return Err(AnalysisError::Request(format!(
                "status {}",
                response.status()
            )));
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| AnalysisError::Response(e.to_string()))?;
        let content = value
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .ok_or_else(|| AnalysisError::Response("missing message content".into()))?;

        Ok(EventAnalysis::from_model_json(content))
    }
}
