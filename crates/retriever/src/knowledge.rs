//! Curated supply-chain knowledge: critical trade routes, sector
//! vulnerabilities, chokepoint locations, and historical disruption patterns.
//!
//! These tables are the static half of context retrieval; the dynamic half
//! comes from the vector index. Matching against free-form location text is
//! substring-based and case-insensitive, with underscores in table names
//! treated as spaces ("suez_canal" matches "Suez Canal, Egypt").

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde_json::json;
use vindex::DocumentMetadata;

/// A high-volume trade corridor and its disruption profile.
#[derive(Debug)]
pub struct CriticalRoute {
    pub name: &'static str,
    pub description: &'static str,
    pub key_ports: &'static [&'static str],
    pub typical_disruptions: &'static [&'static str],
    pub impact_multiplier: f64,
    pub daily_volume_teu: u64,
}

pub static CRITICAL_ROUTES: [CriticalRoute; 3] = [
    CriticalRoute {
        name: "trans_pacific",
        description: "Major trade route between Asia and North America",
        key_ports: &["Shanghai", "Shenzhen", "Los Angeles", "Long Beach", "Seattle"],
        typical_disruptions: &["typhoons", "port congestion", "labor strikes"],
        impact_multiplier: 2.5,
        daily_volume_teu: 50_000,
    },
    CriticalRoute {
        name: "asia_europe",
        description: "Primary trade corridor via Suez Canal",
        key_ports: &["Shanghai", "Singapore", "Dubai", "Rotterdam", "Hamburg"],
        typical_disruptions: &["suez canal blockage", "red sea tensions", "monsoons"],
        impact_multiplier: 2.0,
        daily_volume_teu: 35_000,
    },
    CriticalRoute {
        name: "intra_asia",
        description: "Regional Asian trade networks",
        key_ports: &["Singapore", "Hong Kong", "Busan", "Tokyo", "Manila"],
        typical_disruptions: &["typhoons", "political tensions", "port strikes"],
        impact_multiplier: 1.5,
        daily_volume_teu: 25_000,
    },
];

/// How exposed a sector is to disruption in its key producing regions.
#[derive(Debug)]
pub struct SectorVulnerability {
    pub name: &'static str,
    pub key_regions: &'static [&'static str],
    pub sensitivity: &'static str,
    pub recovery_time_days: u32,
    pub dependency_score: f64,
}

pub static SECTOR_VULNERABILITIES: [SectorVulnerability; 4] = [
    SectorVulnerability {
        name: "electronics",
        key_regions: &["Taiwan", "South Korea", "China", "Japan"],
        sensitivity: "critical",
        recovery_time_days: 30,
        dependency_score: 0.9,
    },
    SectorVulnerability {
        name: "automotive",
        key_regions: &["Germany", "Japan", "Mexico", "China"],
        sensitivity: "high",
        recovery_time_days: 21,
        dependency_score: 0.8,
    },
    SectorVulnerability {
        name: "pharmaceuticals",
        key_regions: &["India", "China", "Ireland", "Puerto Rico"],
        sensitivity: "critical",
        recovery_time_days: 45,
        dependency_score: 0.95,
    },
    SectorVulnerability {
        name: "agriculture",
        key_regions: &["Ukraine", "Brazil", "Argentina", "Australia"],
        sensitivity: "seasonal",
        recovery_time_days: 90,
        dependency_score: 0.7,
    },
];

/// Historical disruption pattern: typical severity amplification and duration.
#[derive(Debug)]
pub struct DisruptionPattern {
    pub name: &'static str,
    pub severity_multiplier: f64,
    pub duration_days: u32,
}

pub static WEATHER_PATTERNS: [DisruptionPattern; 4] = [
    DisruptionPattern { name: "hurricane", severity_multiplier: 2.0, duration_days: 7 },
    DisruptionPattern { name: "typhoon", severity_multiplier: 1.8, duration_days: 5 },
    DisruptionPattern { name: "flood", severity_multiplier: 1.5, duration_days: 14 },
    DisruptionPattern { name: "drought", severity_multiplier: 1.2, duration_days: 60 },
];

pub static GEOPOLITICAL_PATTERNS: [DisruptionPattern; 3] = [
    DisruptionPattern { name: "trade_war", severity_multiplier: 1.3, duration_days: 180 },
    DisruptionPattern { name: "sanctions", severity_multiplier: 1.7, duration_days: 365 },
    DisruptionPattern { name: "border_closure", severity_multiplier: 2.5, duration_days: 30 },
];

/// A chokepoint port or waterway with a 1-10 strategic importance score.
#[derive(Debug)]
pub struct CriticalLocation {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub importance: u8,
    pub kind: &'static str,
}

pub static CRITICAL_LOCATIONS: [CriticalLocation; 10] = [
    CriticalLocation { name: "shanghai", latitude: 31.2304, longitude: 121.4737, importance: 10, kind: "port" },
    CriticalLocation { name: "singapore", latitude: 1.3521, longitude: 103.8198, importance: 9, kind: "port" },
    CriticalLocation { name: "rotterdam", latitude: 51.9244, longitude: 4.4777, importance: 8, kind: "port" },
    CriticalLocation { name: "los_angeles", latitude: 34.0522, longitude: -118.2437, importance: 8, kind: "port" },
    CriticalLocation { name: "shenzhen", latitude: 22.5431, longitude: 114.0579, importance: 7, kind: "port" },
    CriticalLocation { name: "hamburg", latitude: 53.5511, longitude: 9.9937, importance: 7, kind: "port" },
    CriticalLocation { name: "dubai", latitude: 25.2048, longitude: 55.2708, importance: 6, kind: "port" },
    CriticalLocation { name: "hong_kong", latitude: 22.3193, longitude: 114.1694, importance: 6, kind: "port" },
    CriticalLocation { name: "suez_canal", latitude: 30.0444, longitude: 32.3013, importance: 10, kind: "waterway" },
    CriticalLocation { name: "panama_canal", latitude: 9.0820, longitude: -79.7821, importance: 9, kind: "waterway" },
];

static LOCATIONS_BY_NAME: Lazy<HashMap<&'static str, &'static CriticalLocation>> =
    Lazy::new(|| CRITICAL_LOCATIONS.iter().map(|loc| (loc.name, loc)).collect());

pub fn location_by_name(name: &str) -> Option<&'static CriticalLocation> {
    LOCATIONS_BY_NAME.get(name).copied()
}

/// True when `needle` (table name, possibly underscored) occurs in the
/// lowercased free-form `haystack`.
pub fn name_matches(needle: &str, haystack_lower: &str) -> bool {
    if needle.contains('_') {
        haystack_lower.contains(&needle.replace('_', " "))
    } else {
        haystack_lower.contains(needle)
    }
}

/// Strategic importance of whatever critical location `location` mentions,
/// or 0 when none matches.
pub fn location_importance(location: &str) -> u8 {
    let lower = location.to_lowercase();
    CRITICAL_LOCATIONS
        .iter()
        .filter(|loc| name_matches(loc.name, &lower))
        .map(|loc| loc.importance)
        .max()
        .unwrap_or(0)
}

/// Seed documents inserted at startup so that context search has something to
/// anchor on before any live events arrive.
pub fn base_knowledge() -> Vec<(String, DocumentMetadata)> {
    vec![
        (
            "Shanghai Port is the world's busiest container port, handling over 47 million TEU \
             annually. Real-time disruptions here immediately affect global electronics, \
             automotive, and consumer goods supply chains."
                .to_string(),
            DocumentMetadata::new("base_knowledge")
                .with_kind("port_info")
                .with_location("Shanghai, China")
                .with_importance(10.0)
                .with_extra("real_time", json!(true)),
        ),
        (
            "Suez Canal handles 12% of global trade. Any blockage or disruption is immediately \
             reflected in Asia-Europe trade route delays affecting oil, consumer goods, and \
             manufacturing."
                .to_string(),
            DocumentMetadata::new("base_knowledge")
                .with_kind("waterway_info")
                .with_location("Suez Canal, Egypt")
                .with_importance(10.0)
                .with_extra("real_time", json!(true)),
        ),
        (
            "Taiwan semiconductor production disruptions have immediate global impact. Real-time \
             monitoring shows 63% of global chip production concentrated here."
                .to_string(),
            DocumentMetadata::new("base_knowledge")
                .with_kind("sector_info")
                .with_location("Taiwan")
                .with_importance(9.0)
                .with_extra("real_time", json!(true)),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn underscored_names_match_spaced_locations() {
        assert!(name_matches("suez_canal", "suez canal, egypt"));
        assert!(name_matches("los_angeles", "port of los angeles"));
        assert!(!name_matches("panama_canal", "suez canal, egypt"));
    }

    #[test]
    fn location_importance_picks_highest_match() {
        assert_eq!(location_importance("Suez Canal, Egypt"), 10);
        assert_eq!(location_importance("Hamburg, Germany"), 7);
        assert_eq!(location_importance("Kansas City, USA"), 0);
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(location_by_name("shanghai").map(|l| l.importance), Some(10));
        assert!(location_by_name("atlantis").is_none());
    }

    #[test]
    fn base_knowledge_is_seeded_with_importance() {
        let docs = base_knowledge();
        assert_eq!(docs.len(), 3);
        assert!(docs.iter().all(|(_, m)| m.source == "base_knowledge"));
        assert!(docs.iter().all(|(_, m)| m.importance.unwrap_or(0.0) >= 9.0));
    }
}
