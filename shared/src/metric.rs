use serde::{Deserialize, Serialize};

/// Closed set of scores shown for a city.
///
/// `Primary` is the population density score stored on the city info block;
/// every other variant lives in the city's metric table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "PDS")]
    Primary,
    #[serde(rename = "VITAL")]
    Vital,
    #[serde(rename = "PAQS")]
    AirQuality,
    #[serde(rename = "HSS")]
    HeatSafety,
    #[serde(rename = "WSS")]
    WaterSanitation,
    #[serde(rename = "UEI")]
    UrbanIntegration,
}

/// Axis order of the radar chart.
pub const RADAR_ORDER: [Metric; 6] = [
    Metric::Vital,
    Metric::Primary,
    Metric::AirQuality,
    Metric::HeatSafety,
    Metric::UrbanIntegration,
    Metric::WaterSanitation,
];

/// Order of score bars on comparison cards and of the description grid.
pub const CARD_ORDER: [Metric; 6] = [
    Metric::Vital,
    Metric::Primary,
    Metric::AirQuality,
    Metric::HeatSafety,
    Metric::WaterSanitation,
    Metric::UrbanIntegration,
];

/// Metrics that get a ranked bar chart in advanced mode.
pub const ADVANCED_BAR_METRICS: [Metric; 3] =
    [Metric::Vital, Metric::Primary, Metric::UrbanIntegration];

impl Metric {
    /// Short code used in chart axes and on the wire.
    pub fn code(self) -> &'static str {
        match self {
            Self::Primary => "PDS",
            Self::Vital => "VITAL",
            Self::AirQuality => "PAQS",
            Self::HeatSafety => "HSS",
            Self::WaterSanitation => "WSS",
            Self::UrbanIntegration => "UEI",
        }
    }

    /// Parse a short code. Matching is case-insensitive and ignores surrounding whitespace.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        CARD_ORDER
            .into_iter()
            .find(|metric| metric.code().eq_ignore_ascii_case(code))
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Primary => "PDS (Population Density Score)",
            Self::Vital => "VITAL score",
            Self::AirQuality => "PAQS (Air Quality Score)",
            Self::HeatSafety => "HSS (Heat Safety Score)",
            Self::WaterSanitation => "WSS (Water & Sanitation Score)",
            Self::UrbanIntegration => "UEI (Urban Environmental Integration Score)",
        }
    }

    /// Heading used above the ranked bar chart for this metric.
    pub fn chart_title(self) -> &'static str {
        match self {
            Self::Primary => "Population Density Score (PDS)",
            Self::Vital => "VITAL score",
            Self::AirQuality => "Air Quality Score (PAQS)",
            Self::HeatSafety => "Heat Safety Score (HSS)",
            Self::WaterSanitation => "Water & Sanitation Score (WSS)",
            Self::UrbanIntegration => "Urban Env. Integration Score (UEI)",
        }
    }
}

/// Per-city sub-indicator scores, each in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricScores {
    pub vital: u8,
    pub air_quality: u8,
    pub heat_safety: u8,
    pub water_sanitation: u8,
    pub urban_integration: u8,
}

impl MetricScores {
    pub fn max(&self) -> u8 {
        self.vital
            .max(self.air_quality)
            .max(self.heat_safety)
            .max(self.water_sanitation)
            .max(self.urban_integration)
    }
}

#[cfg(test)]
mod tests {
    use super::{CARD_ORDER, Metric, RADAR_ORDER};

    #[test]
    fn codes_roundtrip_through_from_code() {
        for metric in CARD_ORDER {
            assert_eq!(Metric::from_code(metric.code()), Some(metric));
        }
    }

    #[test]
    fn from_code_is_case_insensitive_and_trims() {
        assert_eq!(Metric::from_code(" pds "), Some(Metric::Primary));
        assert_eq!(Metric::from_code("uei"), Some(Metric::UrbanIntegration));
    }

    #[test]
    fn from_code_rejects_source_abbreviations() {
        assert_eq!(Metric::from_code("ULS"), None);
        assert_eq!(Metric::from_code("ELI"), None);
        assert_eq!(Metric::from_code(""), None);
    }

    #[test]
    fn radar_order_swaps_water_and_urban_integration() {
        let codes: Vec<_> = RADAR_ORDER.iter().map(|m| m.code()).collect();
        assert_eq!(codes, ["VITAL", "PDS", "PAQS", "HSS", "UEI", "WSS"]);
    }

    #[test]
    fn serde_uses_short_codes() {
        let json = serde_json::to_string(&Metric::HeatSafety).expect("serialize metric");
        assert_eq!(json, "\"HSS\"");
        let parsed: Metric = serde_json::from_str("\"PDS\"").expect("parse metric");
        assert_eq!(parsed, Metric::Primary);
    }
}
