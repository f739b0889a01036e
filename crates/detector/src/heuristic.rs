//! Keyword-driven fallback analysis, used whenever no model client is
//! configured or the model is unreachable. Deterministic by construction.

use event::{DisruptionType, GeographicScope, MacroRegion, RawEvent, Severity, UrgencyLevel};

/// Sector vocabularies for the affected-sector classifier.
static SECTOR_KEYWORDS: [(&str, &[&str]); 8] = [
    ("manufacturing", &["factory", "plant", "production", "assembly", "manufacturing"]),
    ("transportation", &["shipping", "freight", "cargo", "transport", "logistics"]),
    ("ports", &["port", "harbor", "terminal", "dock", "wharf"]),
    ("energy", &["oil", "gas", "fuel", "energy", "power", "electricity"]),
    ("technology", &["semiconductor", "chip", "electronics", "tech", "computer"]),
    ("automotive", &["car", "auto", "vehicle", "automotive", "truck"]),
    ("retail", &["retail", "store", "shopping", "consumer", "goods"]),
    ("agriculture", &["farm", "crop", "food", "agriculture", "harvest"]),
];

/// Location cues that pin an event to a named trade route. Order matters:
/// the first route whose cue matches wins.
static TRADE_ROUTE_LOCATIONS: [(&str, &[&str]); 5] = [
    ("trans_pacific", &["pacific", "asia", "china", "japan", "korea", "california", "seattle"]),
    ("trans_atlantic", &["atlantic", "europe", "uk", "germany", "new york", "boston"]),
    ("asia_europe", &["suez", "mediterranean", "middle east", "singapore", "rotterdam"]),
    ("panama_canal", &["panama", "canal", "central america", "caribbean"]),
    ("suez_canal", &["suez", "egypt", "red sea", "mediterranean"]),
];

/// Disruption vocabulary by alarm tier.
static CRITICAL_KEYWORDS: [&str; 6] =
    ["shutdown", "closed", "suspended", "halted", "blocked", "collapsed"];
static WARNING_KEYWORDS: [&str; 6] =
    ["delayed", "disrupted", "reduced", "limited", "restricted", "strike"];
static WATCH_KEYWORDS: [&str; 6] =
    ["monitoring", "potential", "risk", "concern", "weather", "planned"];

static CRITICAL_LOCATION_CUES: [&str; 10] = [
    "suez canal",
    "panama canal",
    "strait of hormuz",
    "los angeles",
    "long beach",
    "shanghai",
    "singapore",
    "rotterdam",
    "hamburg",
    "new york",
];

/// Disruption likelihood from keyword evidence alone.
///
/// Keyword tiers contribute 0.3/0.2/0.1 per hit; earthquakes add a magnitude
/// bonus; the feed severity tier adds a flat boost; a critical location adds
/// 0.2. The sum is scaled by feed confidence and clamped to [0,1].
pub fn score(event: &RawEvent) -> f32 {
    let text = event.searchable_text();
    let mut score = 0.0_f32;

    score += count_hits(&text, &CRITICAL_KEYWORDS) as f32 * 0.3;
    score += count_hits(&text, &WARNING_KEYWORDS) as f32 * 0.2;
    score += count_hits(&text, &WATCH_KEYWORDS) as f32 * 0.1;

    if event.event_type == "earthquake" {
        let magnitude = event.magnitude.unwrap_or(0.0);
        if magnitude >= 6.0 {
            score += 0.4;
        } else if magnitude >= 5.0 {
            score += 0.2;
        }
    }

    score += match event.severity {
        Severity::Critical => 0.3,
        Severity::Warning => 0.2,
        Severity::Watch => 0.0,
    };

    let location = event.location.to_lowercase();
    if CRITICAL_LOCATION_CUES.iter().any(|cue| location.contains(cue)) {
        score += 0.2;
    }

    (score * event.confidence_score).clamp(0.0, 1.0)
}

pub fn classify_type(event: &RawEvent) -> DisruptionType {
    match event.event_type.as_str() {
        "earthquake" => return DisruptionType::NaturalDisaster,
        "weather" => return DisruptionType::WeatherEvent,
        _ => {}
    }

    let text = event.searchable_text();
    let contains_any = |words: &[&str]| words.iter().any(|w| text.contains(w));

    if contains_any(&["strike", "labor", "union", "workers"]) {
        DisruptionType::LaborDisruption
    } else if contains_any(&["cyber", "hack", "security", "breach"]) {
        DisruptionType::CyberIncident
    } else if contains_any(&["fire", "explosion", "accident", "incident"]) {
        DisruptionType::FacilityIncident
    } else if contains_any(&["border", "customs", "tariff", "trade war"]) {
        DisruptionType::TradePolicy
    } else if contains_any(&["shortage", "supply", "material", "component"]) {
        DisruptionType::SupplyShortage
    } else if contains_any(&["transport", "shipping", "freight", "logistics"]) {
        DisruptionType::TransportationDisruption
    } else {
        DisruptionType::GeneralDisruption
    }
}

pub fn affected_sectors(event: &RawEvent) -> Vec<String> {
    let text = event.searchable_text();
    let sectors: Vec<String> = SECTOR_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(sector, _)| sector.to_string())
        .collect();
    if sectors.is_empty() {
        vec!["general".to_string()]
    } else {
        sectors
    }
}

pub fn geographic_scope(event: &RawEvent) -> GeographicScope {
    let location = event.location.to_lowercase();

    for (route, cues) in &TRADE_ROUTE_LOCATIONS {
        if cues.iter().any(|cue| location.contains(cue)) {
            return GeographicScope::TradeRoute(route.to_string());
        }
    }

    let contains_any = |regions: &[&str]| regions.iter().any(|r| location.contains(r));
    if contains_any(&["asia", "pacific", "china", "japan"]) {
        GeographicScope::MacroRegion(MacroRegion::AsiaPacific)
    } else if contains_any(&["europe", "eu", "uk", "germany"]) {
        GeographicScope::MacroRegion(MacroRegion::Europe)
    } else if contains_any(&["america", "usa", "canada", "mexico"]) {
        GeographicScope::MacroRegion(MacroRegion::NorthAmerica)
    } else if contains_any(&["middle east", "gulf", "arabia"]) {
        GeographicScope::MacroRegion(MacroRegion::MiddleEast)
    } else {
        GeographicScope::Regional
    }
}

pub fn urgency(event: &RawEvent, disruption_score: f32) -> UrgencyLevel {
    if disruption_score >= 0.8 || event.severity == Severity::Critical {
        UrgencyLevel::Immediate
    } else if disruption_score >= 0.6 || event.severity == Severity::Warning {
        UrgencyLevel::High
    } else if disruption_score >= 0.4 || event.severity == Severity::Watch {
        UrgencyLevel::Medium
    } else {
        UrgencyLevel::Low
    }
}

/// Disruption-vocabulary keywords present in the event text, tier order.
pub fn matched_keywords(event: &RawEvent) -> Vec<String> {
    let text = event.searchable_text();
    CRITICAL_KEYWORDS
        .iter()
        .chain(WARNING_KEYWORDS.iter())
        .chain(WATCH_KEYWORDS.iter())
        .filter(|keyword| text.contains(**keyword))
        .map(|keyword| keyword.to_string())
        .collect()
}

fn count_hits(text: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|k| text.contains(**k)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strong_earthquake_scores_high() {
        let event = RawEvent::new("usgs", "earthquake", "Magnitude 6.8 Earthquake", "strong shaking")
            .with_location("near Tokyo, Japan")
            .with_severity(Severity::Critical)
            .with_magnitude(6.8)
            .with_confidence(0.95);
        // 0.4 magnitude bonus + 0.3 severity boost, scaled by confidence.
        let s = score(&event);
        assert!(s >= 0.6, "score {s}");
    }

    #[test]
    fn keyword_hits_accumulate_by_tier() {
        let event = RawEvent::new("news", "news", "Port shutdown", "terminal closed, shipments delayed")
            .with_confidence(1.0);
        // shutdown + closed (critical) and delayed (warning).
        let s = score(&event);
        assert!((s - 0.8).abs() < 1e-6, "score {s}");
    }

    #[test]
    fn critical_location_adds_boost() {
        let plain = RawEvent::new("news", "news", "Operations halted", "").with_confidence(1.0);
        let suez = plain.clone().with_location("Suez Canal, Egypt");
        assert!(score(&suez) > score(&plain));
    }

    #[test]
    fn score_scales_with_confidence() {
        let high = RawEvent::new("n", "news", "Port blocked", "").with_confidence(1.0);
        let low = RawEvent::new("n", "news", "Port blocked", "").with_confidence(0.5);
        assert!((score(&high) - 2.0 * score(&low)).abs() < 1e-6);
    }

    #[test]
    fn type_classification_prefers_event_type() {
        let quake = RawEvent::new("usgs", "earthquake", "strike", "");
        assert_eq!(classify_type(&quake), DisruptionType::NaturalDisaster);

        let strike = RawEvent::new("news", "news", "Dock workers strike", "union walkout");
        assert_eq!(classify_type(&strike), DisruptionType::LaborDisruption);

        let vague = RawEvent::new("news", "news", "Something happened", "");
        assert_eq!(classify_type(&vague), DisruptionType::GeneralDisruption);
    }

    #[test]
    fn sectors_default_to_general() {
        let vague = RawEvent::new("news", "news", "Unspecified trouble", "");
        assert_eq!(affected_sectors(&vague), vec!["general".to_string()]);

        let port = RawEvent::new("news", "news", "Port terminal congestion", "shipping delayed");
        let sectors = affected_sectors(&port);
        assert!(sectors.contains(&"ports".to_string()));
        assert!(sectors.contains(&"transportation".to_string()));
    }

    #[test]
    fn scope_prefers_trade_routes_over_regions() {
        let suez = RawEvent::new("n", "news", "t", "").with_location("Suez Canal, Egypt");
        assert_eq!(
            geographic_scope(&suez),
            GeographicScope::TradeRoute("asia_europe".to_string())
        );

        let berlin = RawEvent::new("n", "news", "t", "").with_location("Berlin, Germany");
        assert_eq!(
            geographic_scope(&berlin),
            GeographicScope::MacroRegion(MacroRegion::Europe)
        );

        let nowhere = RawEvent::new("n", "news", "t", "").with_location("Antarctica");
        assert_eq!(geographic_scope(&nowhere), GeographicScope::Regional);
    }

    #[test]
    fn urgency_tracks_score_and_severity() {
        let watch = RawEvent::new("n", "news", "t", "");
        assert_eq!(urgency(&watch, 0.85), UrgencyLevel::Immediate);
        assert_eq!(urgency(&watch, 0.65), UrgencyLevel::High);
        assert_eq!(urgency(&watch, 0.45), UrgencyLevel::Medium);
        assert_eq!(urgency(&watch, 0.1), UrgencyLevel::Medium);

        let critical = RawEvent::new("n", "news", "t", "").with_severity(Severity::Critical);
        assert_eq!(urgency(&critical, 0.1), UrgencyLevel::Immediate);
    }

    #[test]
    fn matched_keywords_reports_all_tiers() {
        let event = RawEvent::new("n", "news", "Port closed", "shipments delayed amid weather risk");
        let matched = matched_keywords(&event);
        assert!(matched.contains(&"closed".to_string()));
        assert!(matched.contains(&"delayed".to_string()));
        assert!(matched.contains(&"weather".to_string()));
        assert!(matched.contains(&"risk".to_string()));
    }
}
