//! Economic impact assessment for detected disruptions: impact score,
//! duration estimate, affected trade routes, financial exposure, and
//! mitigation strategies.

mod routes;

use chrono::{DateTime, Utc};
use event::{DisruptionEvent, DisruptionType, GeographicScope, MacroRegion, Severity, UrgencyLevel};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use crate::routes::{affected_routes, TradeRoute, TRADE_ROUTES};

/// Coarse severity bucket derived from the impact score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    Critical,
    High,
    Medium,
    Low,
}

impl ImpactLevel {
    pub fn from_score(score: f32) -> Self {
        if score >= 0.8 {
            ImpactLevel::Critical
        } else if score >= 0.6 {
            ImpactLevel::High
        } else if score >= 0.4 {
            ImpactLevel::Medium
        } else {
            ImpactLevel::Low
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationEstimate {
    pub estimated_avg_days: u32,
    /// Higher when the disruption type has a known duration profile.
    pub confidence: f32,
}

/// Monetary exposure in millions of USD.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialImpact {
    pub daily_impact_usd_millions: f64,
    pub weekly_impact_usd_millions: f64,
    pub estimated_total_impact_usd_millions: f64,
    pub affected_trade_volume_percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactAssessment {
    pub disruption_id: String,
    pub impact_score: f32,
    pub severity_level: ImpactLevel,
    pub duration_estimate: DurationEstimate,
    pub affected_routes: Vec<String>,
    pub financial_impact: FinancialImpact,
    /// Never empty; the floor is a single monitoring recommendation.
    pub mitigation_strategies: Vec<String>,
    /// 1 (most urgent) to 100.
    pub priority_rank: u8,
    pub assessed_at: DateTime<Utc>,
}

/// Stateless assessor; all inputs come from the disruption itself and the
/// static route table.
#[derive(Debug, Default)]
pub struct ImpactAssessor;

impl ImpactAssessor {
    pub fn new() -> Self {
        Self
    }

    pub fn assess(&self, disruption: &DisruptionEvent) -> ImpactAssessment {
        let impact_score = impact_score(disruption);
        let duration_estimate = estimate_duration(disruption);
        let routes = routes::affected_routes(&disruption.source_data.location);
        let financial_impact = financial_impact(impact_score, &routes, &duration_estimate);
        let mitigation_strategies = mitigation_strategies(disruption, impact_score);

        let assessment = ImpactAssessment {
            disruption_id: disruption.id.clone(),
            impact_score: round3(impact_score),
            severity_level: ImpactLevel::from_score(impact_score),
            duration_estimate,
            affected_routes: routes.iter().map(|r| r.name.to_string()).collect(),
            financial_impact,
            mitigation_strategies,
            priority_rank: priority_rank(impact_score),
            assessed_at: Utc::now(),
        };
        debug!(
            id = %assessment.disruption_id,
            score = assessment.impact_score,
            routes = assessment.affected_routes.len(),
            "impact assessed"
        );
        assessment
    }
}

/// Disruption score amplified by geographic scope and urgency, capped at 1.
fn impact_score(disruption: &DisruptionEvent) -> f32 {
    let mut score = disruption.disruption_score;

    score *= match &disruption.geographic_scope {
        GeographicScope::TradeRoute(_) => 1.3,
        GeographicScope::MacroRegion(
            MacroRegion::AsiaPacific | MacroRegion::Europe | MacroRegion::NorthAmerica,
        ) => 1.1,
        _ => 1.0,
    };

    score *= match disruption.urgency_level {
        UrgencyLevel::Immediate => 1.3,
        UrgencyLevel::High => 1.2,
        UrgencyLevel::Medium => 1.0,
        UrgencyLevel::Low => 0.8,
    };

    score.min(1.0)
}

fn estimate_duration(disruption: &DisruptionEvent) -> DurationEstimate {
    let severity = disruption.source_data.severity;
    let profile: Option<(u32, u32, u32)> = match disruption.disruption_type {
        DisruptionType::NaturalDisaster => Some((14, 5, 2)),
        DisruptionType::WeatherEvent => Some((7, 3, 1)),
        DisruptionType::LaborDisruption => Some((21, 7, 2)),
        DisruptionType::TransportationDisruption => Some((10, 3, 1)),
        _ => None,
    };

    match profile {
        Some((critical, warning, watch)) => DurationEstimate {
            estimated_avg_days: match severity {
                Severity::Critical => critical,
                Severity::Warning => warning,
                Severity::Watch => watch,
            },
            confidence: 0.7,
        },
        None => DurationEstimate {
            estimated_avg_days: 3,
            confidence: 0.4,
        },
    }
}

fn financial_impact(
    impact_score: f32,
    routes: &[&TradeRoute],
    duration: &DurationEstimate,
) -> FinancialImpact {
    let daily: f64 = if routes.is_empty() {
        // No route matched; fall back to a base exposure estimate.
        10.0 * impact_score as f64
    } else {
        routes
            .iter()
            .map(|route| route.daily_volume_musd * impact_score as f64)
            .sum()
    };

    FinancialImpact {
        daily_impact_usd_millions: round1(daily),
        weekly_impact_usd_millions: round1(daily * 7.0),
        estimated_total_impact_usd_millions: round1(daily * duration.estimated_avg_days as f64),
        affected_trade_volume_percent: round1(impact_score as f64 * 100.0),
    }
}

fn mitigation_strategies(disruption: &DisruptionEvent, impact_score: f32) -> Vec<String> {
    let mut strategies: Vec<String> = Vec::new();

    if impact_score >= 0.7 {
        strategies.extend(
            [
                "Activate emergency procurement protocols",
                "Contact backup suppliers immediately",
                "Consider expedited shipping for critical items",
                "Increase safety stock levels for affected routes",
            ]
            .map(String::from),
        );
    }

    let type_specific: &[&str] = match disruption.disruption_type {
        DisruptionType::WeatherEvent => &[
            "Monitor weather forecasts for route planning",
            "Consider alternative transportation modes",
            "Coordinate with logistics partners for rerouting",
        ],
        DisruptionType::NaturalDisaster => &[
            "Assess supplier facility damage",
            "Activate disaster recovery plans",
            "Consider temporary supplier alternatives",
        ],
        DisruptionType::TransportationDisruption => &[
            "Explore alternative routes and carriers",
            "Negotiate priority handling with logistics providers",
            "Consider multimodal transportation options",
        ],
        _ => &[],
    };
    strategies.extend(type_specific.iter().map(|s| s.to_string()));

    if strategies.is_empty() {
        strategies.push("Monitor situation closely".to_string());
    }
    strategies
}

/// 1 is the most urgent rank; low-impact events sink toward 100.
fn priority_rank(impact_score: f32) -> u8 {
    (((1.0 - impact_score) * 100.0).round() as i32).clamp(1, 100) as u8
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round3(value: f32) -> f32 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use event::RawEvent;

    fn disruption(
        score: f32,
        kind: DisruptionType,
        scope: GeographicScope,
        urgency: UrgencyLevel,
        location: &str,
        severity: Severity,
    ) -> DisruptionEvent {
        DisruptionEvent {
            id: "test_1".to_string(),
            source_data: RawEvent::new("news", "news", "event", "details")
                .with_location(location)
                .with_severity(severity),
            disruption_score: score,
            disruption_type: kind,
            affected_sectors: vec!["general".to_string()],
            geographic_scope: scope,
            urgency_level: urgency,
            matched_keywords: Vec::new(),
            detected_at: Utc::now(),
        }
    }

    #[test]
    fn trade_route_scope_amplifies_score() {
        let on_route = disruption(
            0.5,
            DisruptionType::TransportationDisruption,
            GeographicScope::TradeRoute("suez_canal".into()),
            UrgencyLevel::Medium,
            "Suez Canal, Egypt",
            Severity::Warning,
        );
        let assessment = ImpactAssessor::new().assess(&on_route);
        assert!((assessment.impact_score - 0.65).abs() < 1e-3);
        assert_eq!(assessment.severity_level, ImpactLevel::High);
    }

    #[test]
    fn impact_score_is_capped() {
        let extreme = disruption(
            0.95,
            DisruptionType::NaturalDisaster,
            GeographicScope::TradeRoute("trans_pacific".into()),
            UrgencyLevel::Immediate,
            "Shanghai, China",
            Severity::Critical,
        );
        let assessment = ImpactAssessor::new().assess(&extreme);
        assert!(assessment.impact_score <= 1.0);
        assert_eq!(assessment.severity_level, ImpactLevel::Critical);
        assert_eq!(assessment.priority_rank, 1);
    }

    #[test]
    fn duration_follows_type_and_severity() {
        let strike = disruption(
            0.5,
            DisruptionType::LaborDisruption,
            GeographicScope::Regional,
            UrgencyLevel::Medium,
            "Hamburg, Germany",
            Severity::Critical,
        );
        let d = estimate_duration(&strike);
        assert_eq!(d.estimated_avg_days, 21);
        assert!((d.confidence - 0.7).abs() < 1e-6);

        let unknown = disruption(
            0.5,
            DisruptionType::CyberIncident,
            GeographicScope::Regional,
            UrgencyLevel::Medium,
            "",
            Severity::Watch,
        );
        let d = estimate_duration(&unknown);
        assert_eq!(d.estimated_avg_days, 3);
        assert!((d.confidence - 0.4).abs() < 1e-6);
    }

    #[test]
    fn financial_impact_sums_matched_routes() {
        let suez = disruption(
            0.5,
            DisruptionType::TransportationDisruption,
            GeographicScope::TradeRoute("suez_canal".into()),
            UrgencyLevel::Medium,
            "Suez, Egypt",
            Severity::Warning,
        );
        let assessment = ImpactAssessor::new().assess(&suez);
        // asia_europe (40) + suez_canal (300) at impact 0.65.
        assert!((assessment.financial_impact.daily_impact_usd_millions - 221.0).abs() < 1e-6);
        assert!(
            (assessment.financial_impact.weekly_impact_usd_millions
                - assessment.financial_impact.daily_impact_usd_millions * 7.0)
                .abs()
                < 0.5
        );
    }

    #[test]
    fn unmatched_location_uses_base_exposure() {
        let inland = disruption(
            0.5,
            DisruptionType::GeneralDisruption,
            GeographicScope::Regional,
            UrgencyLevel::Medium,
            "Denver, Colorado",
            Severity::Watch,
        );
        let assessment = ImpactAssessor::new().assess(&inland);
        assert!(assessment.affected_routes.is_empty());
        assert!((assessment.financial_impact.daily_impact_usd_millions - 5.0).abs() < 1e-6);
    }

    #[test]
    fn mitigation_is_never_empty() {
        let mild = disruption(
            0.3,
            DisruptionType::GeneralDisruption,
            GeographicScope::Local,
            UrgencyLevel::Low,
            "",
            Severity::Watch,
        );
        let assessment = ImpactAssessor::new().assess(&mild);
        assert_eq!(assessment.mitigation_strategies, vec!["Monitor situation closely".to_string()]);

        let severe = disruption(
            0.9,
            DisruptionType::WeatherEvent,
            GeographicScope::TradeRoute("trans_pacific".into()),
            UrgencyLevel::Immediate,
            "Shanghai, China",
            Severity::Critical,
        );
        let assessment = ImpactAssessor::new().assess(&severe);
        // General high-impact strategies plus the weather-specific ones.
        assert_eq!(assessment.mitigation_strategies.len(), 7);
    }

    #[test]
    fn priority_rank_tracks_impact_inversely() {
        assert_eq!(priority_rank(0.95), 5);
        assert_eq!(priority_rank(0.5), 50);
        assert_eq!(priority_rank(0.0), 100);
        assert_eq!(priority_rank(1.0), 1);
    }
}
