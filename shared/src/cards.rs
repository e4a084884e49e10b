use serde::Serialize;

use crate::bars::{RankedBarChart, build_ranked_bar_chart};
use crate::catalogue::{Catalogue, CityId};
use crate::colors::{CategoryTone, slot_color};
use crate::detail::ScoreBar;
use crate::metric::{ADVANCED_BAR_METRICS, CARD_ORDER, Metric};
use crate::resolver::{category_color, score_of};

pub const NO_DESCRIPTION: &str = "No detailed description available.";

/// Side-by-side summary card for one compared city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonCard {
    pub city: CityId,
    pub slot: usize,
    pub slot_color: &'static str,
    pub category: String,
    pub category_tone: CategoryTone,
    pub category_color: &'static str,
    pub vital: u8,
    pub scores: Vec<ScoreBar>,
}

pub fn build_comparison_cards(compared: &[CityId], catalogue: &Catalogue) -> Vec<ComparisonCard> {
    compared
        .iter()
        .enumerate()
        .filter_map(|(slot, id)| {
            let record = catalogue.get(id.as_str())?;
            let tone = category_color(&record.info.primary_category);
            Some(ComparisonCard {
                city: id.clone(),
                slot,
                slot_color: slot_color(slot),
                category: record.info.primary_category.clone(),
                category_tone: tone,
                category_color: tone.hex(),
                vital: record.metrics.vital,
                scores: CARD_ORDER
                    .into_iter()
                    .map(|metric| ScoreBar::new(metric, score_of(record, metric)))
                    .collect(),
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityDescription {
    pub city: CityId,
    pub text: String,
}

/// Long-form explanations of one metric, one entry per compared city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescriptionBlock {
    pub metric: Metric,
    pub label: &'static str,
    pub cities: Vec<CityDescription>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdvancedSection {
    pub charts: Vec<RankedBarChart>,
    pub descriptions: Vec<DescriptionBlock>,
}

/// Extra charts and texts shown in advanced mode.
///
/// Every compared city gets a description entry, falling back to [`NO_DESCRIPTION`]
/// when the record or its text is missing. Charts skip missing records.
pub fn build_advanced_section(compared: &[CityId], catalogue: &Catalogue) -> AdvancedSection {
    let charts = ADVANCED_BAR_METRICS
        .into_iter()
        .map(|metric| build_ranked_bar_chart(compared, metric, catalogue))
        .collect();

    let descriptions = CARD_ORDER
        .into_iter()
        .map(|metric| DescriptionBlock {
            metric,
            label: metric.label(),
            cities: compared
                .iter()
                .map(|id| CityDescription {
                    city: id.clone(),
                    text: catalogue
                        .get(id.as_str())
                        .and_then(|record| record.descriptions.long.get(&metric))
                        .cloned()
                        .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
                })
                .collect(),
        })
        .collect();

    AdvancedSection {
        charts,
        descriptions,
    }
}
