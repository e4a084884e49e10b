use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::catalogue::{Catalogue, CityId};
use crate::colors::{fill_css, slot_color};
use crate::metric::{Metric, RADAR_ORDER};
use crate::resolver::score_of;

pub const RADAR_FILL_OPACITY: f64 = 0.45;

/// One radar axis: the metric plus one score per compared city that has a record.
///
/// Serializes flat, e.g. `{"metric": "PDS", "Athens": 80, "Cairo": 26}`.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarRow {
    pub metric: Metric,
    pub values: Vec<(CityId, u8)>,
}

impl RadarRow {
    pub fn value(&self, city: &str) -> Option<u8> {
        self.values
            .iter()
            .find(|(id, _)| id == city)
            .map(|(_, score)| *score)
    }
}

impl Serialize for RadarRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len() + 1))?;
        map.serialize_entry("metric", self.metric.code())?;
        for (city, score) in &self.values {
            map.serialize_entry(city.as_str(), score)?;
        }
        map.end()
    }
}

/// Legend entry for one compared city.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RadarSeries {
    pub city: CityId,
    pub slot: usize,
    pub color: &'static str,
    pub fill_opacity: f64,
    /// `rgba(...)` form of `color` at `fill_opacity`.
    pub fill: String,
}

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
pub struct RadarChart {
    pub rows: Vec<RadarRow>,
    pub series: Vec<RadarSeries>,
}

/// Rows in fixed axis order, columns in comparison order. Cities without a record get no column.
pub fn build_radar_series(compared: &[CityId], catalogue: &Catalogue) -> Vec<RadarRow> {
    RADAR_ORDER
        .into_iter()
        .map(|metric| RadarRow {
            metric,
            values: compared
                .iter()
                .filter_map(|id| {
                    catalogue
                        .get(id.as_str())
                        .map(|record| (id.clone(), score_of(record, metric)))
                })
                .collect(),
        })
        .collect()
}

/// Rows plus per-slot series styling. Slots follow position in `compared`.
pub fn build_radar_chart(compared: &[CityId], catalogue: &Catalogue) -> RadarChart {
    let series = compared
        .iter()
        .enumerate()
        .filter(|(_, id)| catalogue.contains(id.as_str()))
        .map(|(slot, id)| {
            let color = slot_color(slot);
            RadarSeries {
                city: id.clone(),
                slot,
                color,
                fill_opacity: RADAR_FILL_OPACITY,
                fill: fill_css(color, RADAR_FILL_OPACITY).unwrap_or_else(|| color.to_string()),
            }
        })
        .collect();
    RadarChart {
        rows: build_radar_series(compared, catalogue),
        series,
    }
}
