use chrono::{DateTime, Utc};
use fxhash::hash64;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Feed-level severity tier carried by raw alerts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    #[default]
    Watch,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Watch => "watch",
        }
    }

    /// Lenient parse; anything unrecognized maps to the lowest tier.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "critical" => Severity::Critical,
            "warning" => Severity::Warning,
            _ => Severity::Watch,
        }
    }
}

/// A single normalized record from an external feed (weather, seismic, news).
///
/// Feeds deliver these at their own cadence. Construction goes through
/// [`RawEvent::new`] plus `with_*` setters so every field has a sane default
/// and downstream stages never see missing values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawEvent {
    /// Originating feed name (e.g., `"noaa"`, `"usgs"`, `"newsapi"`).
    pub source: String,
    /// Raw feed event type (e.g., `"earthquake"`, `"weather"`, `"news"`).
    pub event_type: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default)]
    pub severity: Severity,
    /// Source-assigned confidence in [0,1]; defaults to 0.5.
    #[serde(default = "RawEvent::default_confidence")]
    pub confidence_score: f32,
    /// Earthquake magnitude when the feed reports one.
    #[serde(default)]
    pub magnitude: Option<f64>,
    #[serde(default)]
    pub url: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl RawEvent {
    pub(crate) fn default_confidence() -> f32 {
        0.5
    }

    pub fn new(source: &str, event_type: &str, title: &str, description: &str) -> Self {
        Self {
            source: source.trim().to_string(),
            event_type: event_type.trim().to_string(),
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            location: String::new(),
            latitude: 0.0,
            longitude: 0.0,
            severity: Severity::Watch,
            confidence_score: Self::default_confidence(),
            magnitude: None,
            url: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_location(mut self, location: &str) -> Self {
        self.location = location.trim().to_string();
        self
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = latitude;
        self.longitude = longitude;
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence_score = confidence.clamp(0.0, 1.0);
        self
    }

    pub fn with_magnitude(mut self, magnitude: f64) -> Self {
        self.magnitude = Some(magnitude);
        self
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = Some(url.trim().to_string());
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Lowercased title + description, the text most heuristics scan.
    pub fn searchable_text(&self) -> String {
        let mut text = String::with_capacity(self.title.len() + self.description.len() + 1);
        text.push_str(&self.title);
        text.push(' ');
        text.push_str(&self.description);
        text.to_lowercase()
    }

    /// Idempotency key: identical content + timestamp hashes to the same key,
    /// so a late or duplicate delivery is a no-op at the pipeline layer.
    pub fn dedup_key(&self) -> u64 {
        let mut material = String::new();
        material.push_str(&self.title);
        material.push('\n');
        material.push_str(&self.description);
        material.push('\n');
        if let Some(url) = &self.url {
            material.push_str(url);
        }
        material.push('\n');
        material.push_str(&self.timestamp.to_rfc3339());
        hash64(material.as_bytes())
    }
}

/// Fixed classification of what kind of disruption an event represents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DisruptionType {
    WeatherEvent,
    NaturalDisaster,
    LaborDisruption,
    CyberIncident,
    FacilityIncident,
    TradePolicy,
    SupplyShortage,
    TransportationDisruption,
    Geopolitical,
    Infrastructure,
    #[default]
    GeneralDisruption,
}

impl DisruptionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisruptionType::WeatherEvent => "weather_event",
            DisruptionType::NaturalDisaster => "natural_disaster",
            DisruptionType::LaborDisruption => "labor_disruption",
            DisruptionType::CyberIncident => "cyber_incident",
            DisruptionType::FacilityIncident => "facility_incident",
            DisruptionType::TradePolicy => "trade_policy",
            DisruptionType::SupplyShortage => "supply_shortage",
            DisruptionType::TransportationDisruption => "transportation_disruption",
            DisruptionType::Geopolitical => "geopolitical",
            DisruptionType::Infrastructure => "infrastructure",
            DisruptionType::GeneralDisruption => "general_disruption",
        }
    }

    /// Lenient parse for model output; unknown labels fall back to
    /// `general_disruption` instead of failing the record.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "weather_event" | "weather" => DisruptionType::WeatherEvent,
            "natural_disaster" => DisruptionType::NaturalDisaster,
            "labor_disruption" | "labor" => DisruptionType::LaborDisruption,
            "cyber_incident" | "cyber" => DisruptionType::CyberIncident,
            "facility_incident" => DisruptionType::FacilityIncident,
            "trade_policy" => DisruptionType::TradePolicy,
            "supply_shortage" => DisruptionType::SupplyShortage,
            "transportation_disruption" => DisruptionType::TransportationDisruption,
            "geopolitical" => DisruptionType::Geopolitical,
            "infrastructure" => DisruptionType::Infrastructure,
            _ => DisruptionType::GeneralDisruption,
        }
    }
}

/// How quickly a disruption demands attention.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    Immediate,
    High,
    #[default]
    Medium,
    Low,
}

impl UrgencyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyLevel::Immediate => "immediate",
            UrgencyLevel::High => "high",
            UrgencyLevel::Medium => "medium",
            UrgencyLevel::Low => "low",
        }
    }

    /// Model output uses `critical` for the top tier; map it to `immediate`.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "immediate" | "critical" => UrgencyLevel::Immediate,
            "high" => UrgencyLevel::High,
            "low" => UrgencyLevel::Low,
            _ => UrgencyLevel::Medium,
        }
    }
}

/// Named macro-regions recognized by the heuristic scope classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacroRegion {
    AsiaPacific,
    Europe,
    NorthAmerica,
    MiddleEast,
}

impl MacroRegion {
    pub fn as_str(&self) -> &'static str {
        match self {
            MacroRegion::AsiaPacific => "asia_pacific",
            MacroRegion::Europe => "europe",
            MacroRegion::NorthAmerica => "north_america",
            MacroRegion::MiddleEast => "middle_east",
        }
    }
}

/// Geographic footprint of a disruption.
///
/// The model-assisted classifier emits one of the five graded scopes; the
/// heuristic classifier can additionally pin an event to a specific trade
/// route (`trade_route_suez_canal`) or macro-region (`asia_pacific`). The
/// string form round-trips through serde for persistence and APIs.
#[derive(Debug, Clone, PartialEq)]
pub enum GeographicScope {
    Local,
    Regional,
    National,
    International,
    Global,
    /// A named critical trade route, e.g. `suez_canal`.
    TradeRoute(String),
    MacroRegion(MacroRegion),
}

impl Default for GeographicScope {
    fn default() -> Self {
        GeographicScope::Regional
    }
}

impl GeographicScope {
    /// Scope term used by the weighted scorer. Route- and region-pinned
    /// scopes take the regional default; route impact is a separate bonus.
    pub fn multiplier(&self) -> f32 {
        match self {
            GeographicScope::Local => 0.2,
            GeographicScope::Regional => 0.4,
            GeographicScope::National => 0.6,
            GeographicScope::International => 0.8,
            GeographicScope::Global => 1.0,
            GeographicScope::TradeRoute(_) | GeographicScope::MacroRegion(_) => 0.4,
        }
    }

    pub fn to_label(&self) -> String {
        match self {
            GeographicScope::Local => "local".to_string(),
            GeographicScope::Regional => "regional".to_string(),
            GeographicScope::National => "national".to_string(),
            GeographicScope::International => "international".to_string(),
            GeographicScope::Global => "global".to_string(),
            GeographicScope::TradeRoute(route) => format!("trade_route_{route}"),
            GeographicScope::MacroRegion(region) => region.as_str().to_string(),
        }
    }

    /// Lenient parse; unknown labels fall back to `regional`.
    pub fn parse_lenient(value: &str) -> Self {
        let label = value.trim().to_ascii_lowercase();
        if let Some(route) = label.strip_prefix("trade_route_") {
            return GeographicScope::TradeRoute(route.to_string());
        }
        match label.as_str() {
            "local" => GeographicScope::Local,
            "national" => GeographicScope::National,
            "international" => GeographicScope::International,
            "global" => GeographicScope::Global,
            "asia_pacific" => GeographicScope::MacroRegion(MacroRegion::AsiaPacific),
            "europe" => GeographicScope::MacroRegion(MacroRegion::Europe),
            "north_america" => GeographicScope::MacroRegion(MacroRegion::NorthAmerica),
            "middle_east" => GeographicScope::MacroRegion(MacroRegion::MiddleEast),
            _ => GeographicScope::Regional,
        }
    }
}

impl Serialize for GeographicScope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_label())
    }
}

impl<'de> Deserialize<'de> for GeographicScope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(GeographicScope::parse_lenient(&label))
    }
}

/// Severity grade a classifier assigns to the disruption itself (distinct
/// from the feed-level [`Severity`] tier on the raw alert).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImpactSeverity {
    Minor,
    #[default]
    Moderate,
    Major,
    Severe,
}

impl ImpactSeverity {
    /// Discrete severity term used by the weighted scorer.
    pub fn multiplier(&self) -> f32 {
        match self {
            ImpactSeverity::Minor => 0.2,
            ImpactSeverity::Moderate => 0.5,
            ImpactSeverity::Major => 0.8,
            ImpactSeverity::Severe => 1.0,
        }
    }

    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "minor" => ImpactSeverity::Minor,
            "major" => ImpactSeverity::Major,
            "severe" => ImpactSeverity::Severe,
            _ => ImpactSeverity::Moderate,
        }
    }
}

/// A scored disruption retained by the detector (score >= threshold).
/// Immutable once produced; consumed by the impact assessor and the
/// persistence collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisruptionEvent {
    pub id: String,
    pub source_data: RawEvent,
    /// Bounded [0,1] disruption likelihood.
    pub disruption_score: f32,
    pub disruption_type: DisruptionType,
    pub affected_sectors: Vec<String>,
    pub geographic_scope: GeographicScope,
    pub urgency_level: UrgencyLevel,
    /// Disruption-vocabulary keywords found in the event text.
    #[serde(default)]
    pub matched_keywords: Vec<String>,
    pub detected_at: DateTime<Utc>,
}

impl DisruptionEvent {
    /// Unique id in the original's `{source}_{suffix}` shape.
    pub fn make_id(source: &str) -> String {
        let source = if source.is_empty() { "unknown" } else { source };
        format!("{source}_{}", Uuid::new_v4().simple())
    }
}
