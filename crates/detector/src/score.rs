use retriever::ContextBundle;

use crate::EventAnalysis;

/// Weighted disruption score combining the analysis verdict with retrieved
/// context. Bounded to [0,1].
///
/// Components: confidence (0.3 weight), impact severity (0.3), geographic
/// scope (0.2), then additive bonuses for chokepoint locations, impacted
/// trade routes, and vulnerable sectors.
pub fn weighted_score(analysis: &EventAnalysis, context: &ContextBundle) -> f32 {
    let mut score = 0.0_f32;

    score += analysis.confidence_level as f32 * 0.3;
    score += analysis.impact_severity.multiplier() * 0.3;
    score += analysis.geographic_scope.multiplier() * 0.2;

    if context.location_importance > 7 {
        score += 0.2;
    } else if context.location_importance > 5 {
        score += 0.1;
    }

    if let Some(max_multiplier) = context
        .relevant_routes
        .iter()
        .map(|route| route.impact_multiplier)
        .fold(None, |acc: Option<f64>, m| Some(acc.map_or(m, |a| a.max(m))))
    {
        score += (max_multiplier as f32 - 1.0) * 0.1;
    }

    if let Some(max_dependency) = context
        .affected_sectors
        .iter()
        .map(|sector| sector.dependency_score)
        .fold(None, |acc: Option<f64>, d| Some(acc.map_or(d, |a| a.max(d))))
    {
        score += max_dependency as f32 * 0.1;
    }

    score.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use event::{GeographicScope, ImpactSeverity};
    use retriever::knowledge::{CRITICAL_ROUTES, SECTOR_VULNERABILITIES};

    #[test]
    fn default_analysis_with_empty_context() {
        let analysis = EventAnalysis::default();
        let score = weighted_score(&analysis, &ContextBundle::default());
        // 0.5*0.3 + 0.5*0.3 + 0.4*0.2 = 0.38
        assert!((score - 0.38).abs() < 1e-6, "score {score}");
    }

    #[test]
    fn context_bonuses_accumulate() {
        let analysis = EventAnalysis {
            confidence_level: 0.9,
            impact_severity: ImpactSeverity::Major,
            geographic_scope: GeographicScope::International,
            ..EventAnalysis::default()
        };
        let context = ContextBundle {
            relevant_routes: vec![&CRITICAL_ROUTES[0], &CRITICAL_ROUTES[2]],
            affected_sectors: vec![&SECTOR_VULNERABILITIES[0]],
            location_importance: 10,
            ..ContextBundle::default()
        };
        let score = weighted_score(&analysis, &context);
        // 0.27 + 0.24 + 0.16 + 0.2 + (2.5-1)*0.1 + 0.9*0.1 = 1.11 -> clamped
        assert!((score - 1.0).abs() < 1e-6, "score {score}");
    }

    #[test]
    fn mid_importance_gets_smaller_boost() {
        let analysis = EventAnalysis::default();
        let low = ContextBundle { location_importance: 6, ..ContextBundle::default() };
        let high = ContextBundle { location_importance: 8, ..ContextBundle::default() };
        let base = weighted_score(&analysis, &ContextBundle::default());
        assert!((weighted_score(&analysis, &low) - base - 0.1).abs() < 1e-6);
        assert!((weighted_score(&analysis, &high) - base - 0.2).abs() < 1e-6);
    }
}
