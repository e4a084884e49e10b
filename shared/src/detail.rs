use serde::Serialize;

use crate::catalogue::{Catalogue, CityId, Coordinates};
use crate::colors::{CategoryTone, ScoreBand};
use crate::format::{MISSING, format_number};
use crate::metric::{CARD_ORDER, Metric, MetricScores};
use crate::resolver::{category_color, score_color, score_of};

pub const NO_SUMMARY: &str = "No detailed VITAL summary available.";

/// One labelled score with its band color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreBar {
    pub metric: Metric,
    pub label: &'static str,
    pub score: u8,
    pub band: ScoreBand,
    pub color: &'static str,
}

impl ScoreBar {
    pub fn new(metric: Metric, score: u8) -> Self {
        let band = score_color(score);
        Self {
            metric,
            label: metric.label(),
            score,
            band,
            color: band.hex(),
        }
    }
}

/// Short description texts with placeholders already applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubMetricTexts {
    pub air_quality: String,
    pub heat_safety: String,
    pub water_sanitation: String,
    pub natural_cover: String,
    pub green_access: String,
}

/// Read-only projection of one city for the detail card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailPanel {
    pub city: CityId,
    pub coords: Coordinates,
    pub category: String,
    pub category_tone: CategoryTone,
    pub category_color: &'static str,
    pub primary_score: u8,
    pub metrics: MetricScores,
    pub summary: String,
    pub population: String,
    pub area_km2: String,
    pub density: String,
    pub scores: Vec<ScoreBar>,
    pub sub_metrics: SubMetricTexts,
}

/// `None` when `id` is not catalogued.
pub fn build_detail_panel(id: &str, catalogue: &Catalogue) -> Option<DetailPanel> {
    let record = catalogue.get(id)?;
    let tone = category_color(&record.info.primary_category);
    let short = &record.descriptions.short;
    let text = |value: &Option<String>| value.clone().unwrap_or_else(|| MISSING.to_string());

    Some(DetailPanel {
        city: CityId::from(id),
        coords: record.coords,
        category: record.info.primary_category.clone(),
        category_tone: tone,
        category_color: tone.hex(),
        primary_score: record.info.primary_score,
        metrics: record.metrics,
        summary: record
            .descriptions
            .summary
            .clone()
            .unwrap_or_else(|| NO_SUMMARY.to_string()),
        population: format_number(record.info.population as f64),
        area_km2: format_number(record.info.area_km2),
        density: format_number(record.info.density),
        scores: CARD_ORDER
            .into_iter()
            .map(|metric| ScoreBar::new(metric, score_of(record, metric)))
            .collect(),
        sub_metrics: SubMetricTexts {
            air_quality: text(&short.air_quality),
            heat_safety: text(&short.heat_safety),
            water_sanitation: text(&short.water_sanitation),
            natural_cover: text(&short.natural_cover),
            green_access: text(&short.green_access),
        },
    })
}
