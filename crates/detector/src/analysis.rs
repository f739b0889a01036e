use event::{DisruptionType, GeographicScope, ImpactSeverity, UrgencyLevel};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structured analysis of one event, either produced by a model or derived
/// heuristically. Every field has a conservative default so a partial or
/// malformed model response degrades per-field instead of failing outright.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventAnalysis {
    pub disruption_type: DisruptionType,
    pub affected_sectors: Vec<String>,
    pub geographic_scope: GeographicScope,
    pub urgency_level: UrgencyLevel,
    pub confidence_level: f64,
    pub predicted_duration_days: u32,
    pub impact_severity: ImpactSeverity,
    pub cascading_effects: Vec<String>,
    pub mitigation_suggestions: Vec<String>,
}

impl Default for EventAnalysis {
    fn default() -> Self {
        Self {
            disruption_type: DisruptionType::GeneralDisruption,
            affected_sectors: vec!["general".to_string()],
            geographic_scope: GeographicScope::Regional,
            urgency_level: UrgencyLevel::Medium,
            confidence_level: 0.5,
            predicted_duration_days: 7,
            impact_severity: ImpactSeverity::Moderate,
            cascading_effects: Vec::new(),
            mitigation_suggestions: vec!["Monitor situation closely".to_string()],
        }
    }
}

impl EventAnalysis {
    /// Lenient parse of a model's JSON reply. Unknown enum labels and wrong
    /// value types fall back to the default for that field.
    pub fn from_model_json(raw: &str) -> Self {
        let Ok(value) = serde_json::from_str::<Value>(raw) else {
            return Self::default();
        };
        let mut analysis = Self::default();

        if let Some(s) = value.get("disruption_type").and_then(Value::as_str) {
            analysis.disruption_type = DisruptionType::parse_lenient(s);
        }
        if let Some(sectors) = value.get("affected_sectors").and_then(Value::as_array) {
            let parsed: Vec<String> = sectors
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect();
            if !parsed.is_empty() {
                analysis.affected_sectors = parsed;
            }
        }
        if let Some(s) = value.get("geographic_scope").and_then(Value::as_str) {
            analysis.geographic_scope = GeographicScope::parse_lenient(s);
        }
        if let Some(s) = value.get("urgency_level").and_then(Value::as_str) {
            analysis.urgency_level = UrgencyLevel::parse_lenient(s);
        }
        if let Some(c) = value.get("confidence_level").and_then(Value::as_f64) {
            analysis.confidence_level = c.clamp(0.0, 1.0);
        }
        if let Some(d) = value.get("predicted_duration_days").and_then(Value::as_u64) {
            analysis.predicted_duration_days = d.min(u32::MAX as u64) as u32;
        }
        if let Some(s) = value.get("impact_severity").and_then(Value::as_str) {
            analysis.impact_severity = ImpactSeverity::parse_lenient(s);
        }
        if let Some(effects) = value.get("cascading_effects").and_then(Value::as_array) {
            analysis.cascading_effects = effects
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect();
        }
        if let Some(suggestions) = value.get("mitigation_suggestions").and_then(Value::as_array) {
            let parsed: Vec<String> = suggestions
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect();
            if !parsed.is_empty() {
                analysis.mitigation_suggestions = parsed;
            }
        }

        analysis
    }
}
