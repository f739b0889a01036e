/// Trade corridors with daily traded volume (millions USD) and the location
/// cues that tie a disruption to them.
#[derive(Debug)]
pub struct TradeRoute {
    pub name: &'static str,
    pub daily_volume_musd: f64,
    pub location_cues: &'static [&'static str],
}

pub static TRADE_ROUTES: [TradeRoute; 5] = [
    TradeRoute {
        name: "trans_pacific",
        daily_volume_musd: 50.0,
        location_cues: &["pacific", "asia", "china", "japan", "korea", "california", "seattle"],
    },
    TradeRoute {
        name: "trans_atlantic",
        daily_volume_musd: 30.0,
        location_cues: &["atlantic", "europe", "uk", "germany", "new york", "boston"],
    },
    TradeRoute {
        name: "asia_europe",
        daily_volume_musd: 40.0,
        location_cues: &["suez", "mediterranean", "middle east", "singapore", "rotterdam"],
    },
    TradeRoute {
        name: "panama_canal",
        daily_volume_musd: 200.0,
        location_cues: &["panama", "canal", "central america", "caribbean"],
    },
    TradeRoute {
        name: "suez_canal",
        daily_volume_musd: 300.0,
        location_cues: &["suez", "egypt", "red sea", "mediterranean"],
    },
];

/// Routes whose cues appear in the (lowercased) location text.
pub fn affected_routes(location: &str) -> Vec<&'static TradeRoute> {
    let lower = location.to_lowercase();
    TRADE_ROUTES
        .iter()
        .filter(|route| route.location_cues.iter().any(|cue| lower.contains(cue)))
        .collect()
}
