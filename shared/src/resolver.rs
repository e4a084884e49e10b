use crate::catalogue::CityRecord;
use crate::colors::{CategoryTone, ScoreBand};
use crate::metric::Metric;

/// Score of `metric` for one city, always in `0..=100` for catalogue records.
pub fn score_of(record: &CityRecord, metric: Metric) -> u8 {
    let scores = &record.metrics;
    match metric {
        Metric::Primary => record.info.primary_score,
        Metric::Vital => scores.vital,
        Metric::AirQuality => scores.air_quality,
        Metric::HeatSafety => scores.heat_safety,
        Metric::WaterSanitation => scores.water_sanitation,
        Metric::UrbanIntegration => scores.urban_integration,
    }
}

/// Tone for a primary-score category label. Unknown labels fall back to gray.
pub fn category_color(category: &str) -> CategoryTone {
    match category {
        "Very Healthy" | "Healthy and Sustainable" | "Healthy" => CategoryTone::Green,
        "Moderate" => CategoryTone::Orange,
        "Needs Improvement" | "Poor" => CategoryTone::DarkOrange,
        "Unhealthy" => CategoryTone::Red,
        _ => CategoryTone::Gray,
    }
}

/// Three-bucket band. Thresholds are strict: 80 is amber, 50 is red.
pub fn score_color(score: u8) -> ScoreBand {
    if score > 80 {
        ScoreBand::Green
    } else if score > 50 {
        ScoreBand::Amber
    } else {
        ScoreBand::Red
    }
}
