use std::sync::Arc;

use chrono::Duration;
use event::RawEvent;
use serde::{Deserialize, Serialize};
use tracing::debug;
use vindex::{SearchHit, UpdateRecord, VectorIndex};

use crate::knowledge::{
    self, CriticalLocation, CriticalRoute, DisruptionPattern, SectorVulnerability,
    CRITICAL_LOCATIONS, CRITICAL_ROUTES, SECTOR_VULNERABILITIES, WEATHER_PATTERNS,
};

/// Everything the scorer needs to know about an event's surroundings:
/// matched static knowledge plus the semantically-nearest index documents.
#[derive(Debug, Default)]
pub struct ContextBundle {
    pub relevant_routes: Vec<&'static CriticalRoute>,
    pub affected_sectors: Vec<&'static SectorVulnerability>,
    pub historical_patterns: Vec<&'static DisruptionPattern>,
    /// 0 when the event's location mentions no tracked chokepoint.
    pub location_importance: u8,
    pub similar_documents: Vec<SearchHit>,
    /// Hits whose documents describe ports or waterways.
    pub location_insights: Vec<SearchHit>,
    /// Hits whose documents describe sector dependencies.
    pub sector_insights: Vec<SearchHit>,
    /// Hits fed back from previously detected disruptions.
    pub precedent_insights: Vec<SearchHit>,
    pub recent_updates: Vec<UpdateRecord>,
}

/// Location-only lookup, independent of any live event.
#[derive(Debug, Default)]
pub struct SupplyChainInsights {
    pub critical_infrastructure: Vec<&'static CriticalLocation>,
    pub vulnerable_sectors: Vec<&'static SectorVulnerability>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    pub top_k: usize,
    /// Looser than the detection threshold on purpose: context benefits from
    /// weaker matches that would not count as disruptions themselves.
    pub similarity_threshold: f32,
    pub recent_window_minutes: i64,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            similarity_threshold: 0.2,
            recent_window_minutes: 30,
        }
    }
}

pub struct ContextRetriever {
    index: Arc<VectorIndex>,
    cfg: ContextConfig,
}

impl ContextRetriever {
    pub fn new(index: Arc<VectorIndex>, cfg: ContextConfig) -> Self {
        Self { index, cfg }
    }

    pub fn index(&self) -> &Arc<VectorIndex> {
        &self.index
    }

    /// Assemble the context bundle for one event.
    pub fn retrieve(&self, event: &RawEvent) -> ContextBundle {
        let location = event.location.to_lowercase();

        let relevant_routes: Vec<_> = CRITICAL_ROUTES
            .iter()
            .filter(|route| {
                route
                    .key_ports
                    .iter()
                    .any(|port| location.contains(&port.to_lowercase()))
            })
            .collect();

        let affected_sectors: Vec<_> = SECTOR_VULNERABILITIES
            .iter()
            .filter(|sector| {
                sector
                    .key_regions
                    .iter()
                    .any(|region| location.contains(&region.to_lowercase()))
            })
            .collect();

        let historical_patterns: Vec<_> =
            if matches!(event.event_type.as_str(), "weather" | "storm" | "hurricane" | "typhoon") {
                WEATHER_PATTERNS.iter().collect()
            } else {
                Vec::new()
            };

        let query = format!(
            "{} {} {} {}",
            event.title, event.description, event.location, event.event_type
        );
        let similar_documents =
            self.index
                .search(&query, self.cfg.top_k, self.cfg.similarity_threshold);

        let mut location_insights = Vec::new();
        let mut sector_insights = Vec::new();
        let mut precedent_insights = Vec::new();
        for hit in &similar_documents {
            match hit.metadata.kind.as_str() {
                "port_info" | "waterway_info" => location_insights.push(hit.clone()),
                "sector_info" => sector_insights.push(hit.clone()),
                "historical_disruption" => precedent_insights.push(hit.clone()),
                _ => {}
            }
        }

        let recent_updates = self
            .index
            .recent_updates(Duration::minutes(self.cfg.recent_window_minutes));

        debug!(
            routes = relevant_routes.len(),
            sectors = affected_sectors.len(),
            similar = similar_documents.len(),
            "context retrieved"
        );

        ContextBundle {
            relevant_routes,
            affected_sectors,
            historical_patterns,
            location_importance: knowledge::location_importance(&event.location),
            similar_documents,
            location_insights,
            sector_insights,
            precedent_insights,
            recent_updates,
        }
    }

    /// Static insights for a location string, usable without an event.
    pub fn insights(location: &str) -> SupplyChainInsights {
        let lower = location.to_lowercase();
        SupplyChainInsights {
            critical_infrastructure: CRITICAL_LOCATIONS
                .iter()
                .filter(|loc| knowledge::name_matches(loc.name, &lower))
                .collect(),
            vulnerable_sectors: SECTOR_VULNERABILITIES
                .iter()
                .filter(|sector| {
                    sector
                        .key_regions
                        .iter()
                        .any(|region| lower.contains(&region.to_lowercase()))
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedding::HashedEmbedder;
    use vindex::IndexConfig;

    fn retriever() -> ContextRetriever {
        let embedder = Arc::new(HashedEmbedder::new(64, true));
        let index = Arc::new(VectorIndex::new(embedder, IndexConfig::default()).unwrap());
        ContextRetriever::new(index, ContextConfig::default())
    }

    fn shanghai_event() -> RawEvent {
        RawEvent::new("news", "weather", "Typhoon approaching", "port operations at risk")
            .with_location("Shanghai, China")
    }

    #[test]
    fn routes_and_sectors_match_by_location() {
        let bundle = retriever().retrieve(&shanghai_event());

        let route_names: Vec<_> = bundle.relevant_routes.iter().map(|r| r.name).collect();
        assert!(route_names.contains(&"trans_pacific"));
        assert!(route_names.contains(&"asia_europe"));

        let sector_names: Vec<_> = bundle.affected_sectors.iter().map(|s| s.name).collect();
        assert!(sector_names.contains(&"electronics"));
        assert_eq!(bundle.location_importance, 10);
    }

    #[test]
    fn weather_events_pull_historical_patterns() {
        let bundle = retriever().retrieve(&shanghai_event());
        assert_eq!(bundle.historical_patterns.len(), WEATHER_PATTERNS.len());

        let quake = RawEvent::new("usgs", "earthquake", "M6.2 quake", "shaking reported")
            .with_location("Tokyo, Japan");
        assert!(retriever().retrieve(&quake).historical_patterns.is_empty());
    }

    #[test]
    fn similar_documents_come_from_the_index() {
        let r = retriever();
        r.index()
            .insert(
                "typhoon disrupts port operations in shanghai",
                vindex::DocumentMetadata::new("seed"),
            )
            .unwrap();

        let bundle = r.retrieve(&shanghai_event());
        assert!(!bundle.similar_documents.is_empty());
        assert_eq!(bundle.similar_documents[0].rank, 1);
        assert_eq!(bundle.recent_updates.len(), 1);
    }

    #[test]
    fn hits_are_partitioned_by_document_kind() {
        let r = retriever();
        r.index()
            .insert(
                "shanghai port container operations and shipping traffic",
                vindex::DocumentMetadata::new("base_knowledge").with_kind("port_info"),
            )
            .unwrap();
        r.index()
            .insert(
                "typhoon shut down shanghai port operations last year",
                vindex::DocumentMetadata::new("pipeline").with_kind("historical_disruption"),
            )
            .unwrap();

        let bundle = r.retrieve(&shanghai_event());
        assert_eq!(bundle.location_insights.len(), 1);
        assert!(bundle.sector_insights.is_empty());
        assert_eq!(bundle.precedent_insights.len(), 1);
        assert_eq!(
            bundle.similar_documents.len(),
            bundle.location_insights.len() + bundle.precedent_insights.len()
        );
    }

    #[test]
    fn unknown_location_yields_empty_context() {
        let event = RawEvent::new("news", "news", "Minor road closure", "local detour in place")
            .with_location("Smalltown");
        let bundle = retriever().retrieve(&event);
        assert!(bundle.relevant_routes.is_empty());
        assert!(bundle.affected_sectors.is_empty());
        assert_eq!(bundle.location_importance, 0);
        assert!(bundle.similar_documents.is_empty());
    }

    #[test]
    fn insights_resolve_infrastructure_and_sectors() {
        let insights = ContextRetriever::insights("Suez Canal, Egypt");
        assert_eq!(insights.critical_infrastructure.len(), 1);
        assert_eq!(insights.critical_infrastructure[0].kind, "waterway");

        let insights = ContextRetriever::insights("Taiwan");
        assert!(insights
            .vulnerable_sectors
            .iter()
            .any(|s| s.name == "electronics"));
    }
}
