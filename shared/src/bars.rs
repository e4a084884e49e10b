use serde::Serialize;

use crate::catalogue::{Catalogue, CityId};
use crate::colors::ScoreBand;
use crate::metric::Metric;
use crate::resolver::{score_color, score_of};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedBar {
    pub city: CityId,
    pub score: u8,
    pub band: ScoreBand,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedBarChart {
    pub metric: Metric,
    pub title: &'static str,
    pub bars: Vec<RankedBar>,
}

/// Bars sorted ascending by score. The sort is stable, so ties keep `cities` order.
/// Cities without a catalogue record are skipped.
pub fn build_ranked_bars(cities: &[CityId], metric: Metric, catalogue: &Catalogue) -> Vec<RankedBar> {
    let mut bars: Vec<RankedBar> = cities
        .iter()
        .filter_map(|id| {
            let record = catalogue.get(id.as_str())?;
            let score = score_of(record, metric);
            let band = score_color(score);
            Some(RankedBar {
                city: id.clone(),
                score,
                band,
                color: band.hex(),
            })
        })
        .collect();
    bars.sort_by_key(|bar| bar.score);
    bars
}

pub fn build_ranked_bar_chart(
    cities: &[CityId],
    metric: Metric,
    catalogue: &Catalogue,
) -> RankedBarChart {
    RankedBarChart {
        metric,
        title: metric.chart_title(),
        bars: build_ranked_bars(cities, metric, catalogue),
    }
}
