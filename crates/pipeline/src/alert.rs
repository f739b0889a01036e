use async_trait::async_trait;
use event::DisruptionEvent;
use impact::ImpactAssessment;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("alert delivery failed: {0}")]
pub struct AlertError(pub String);

/// Outbound notification seam. The pipeline calls this for every retained
/// disruption whose impact score clears the alert threshold; delivery
/// failures are logged and never fail the event that triggered them.
#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn send(
        &self,
        disruption: &DisruptionEvent,
        assessment: &ImpactAssessment,
    ) -> Result<(), AlertError>;
}
