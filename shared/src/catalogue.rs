use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::metric::{Metric, MetricScores};

const BUILTIN_JSON: &str = include_str!("../data/cities.json");

/// Stable identifier of a catalogue city (its display name).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CityId(String);

impl CityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for CityId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl PartialEq<str> for CityId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CityId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityInfo {
    pub primary_score: u8,
    pub primary_category: String,
    pub population: u64,
    pub area_km2: f64,
    pub density: f64,
}

/// Short texts shown on the detail panel, one per sub-indicator.
/// Urban integration is split into its natural cover and green access halves.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShortDescriptions {
    #[serde(default)]
    pub air_quality: Option<String>,
    #[serde(default)]
    pub heat_safety: Option<String>,
    #[serde(default)]
    pub water_sanitation: Option<String>,
    #[serde(default)]
    pub natural_cover: Option<String>,
    #[serde(default)]
    pub green_access: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Descriptions {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub short: ShortDescriptions,
    #[serde(default)]
    pub long: BTreeMap<Metric, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRecord {
    pub coords: Coordinates,
    pub info: CityInfo,
    pub metrics: MetricScores,
    #[serde(default)]
    pub descriptions: Descriptions,
}

#[derive(Debug, Deserialize)]
struct CatalogueEntry {
    id: CityId,
    #[serde(flatten)]
    record: CityRecord,
}

#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("catalogue is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalogue contains an empty city id")]
    EmptyId,

    #[error("city {0} appears more than once")]
    DuplicateId(CityId),

    #[error("city {id} has coordinates outside geographic bounds ({lat}, {lon})")]
    Coordinates { id: CityId, lat: f64, lon: f64 },

    #[error("city {id} has a score above 100")]
    ScoreOutOfRange { id: CityId },

    #[error("city {id} has an invalid area or density")]
    Extent { id: CityId },
}

/// Immutable city table. Iteration follows definition order.
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    ids: Vec<CityId>,
    records: HashMap<CityId, CityRecord>,
}

impl Catalogue {
    /// Build from `(id, record)` pairs after checking every record invariant.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (CityId, CityRecord)>,
    ) -> Result<Self, CatalogueError> {
        let mut catalogue = Self::default();
        for (id, record) in entries {
            validate(&id, &record)?;
            if catalogue.records.contains_key(&id) {
                return Err(CatalogueError::DuplicateId(id));
            }
            catalogue.ids.push(id.clone());
            catalogue.records.insert(id, record);
        }
        Ok(catalogue)
    }

    /// Parse the catalogue file format: a JSON array of records, each carrying its `id`.
    pub fn from_json(json: &str) -> Result<Self, CatalogueError> {
        let entries: Vec<CatalogueEntry> = serde_json::from_str(json)?;
        let catalogue = Self::from_entries(entries.into_iter().map(|e| (e.id, e.record)))?;
        tracing::debug!(cities = catalogue.len(), "parsed city catalogue");
        Ok(catalogue)
    }

    /// The catalogue compiled into the crate.
    pub fn builtin() -> &'static Catalogue {
        static BUILTIN: OnceLock<Catalogue> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            Catalogue::from_json(BUILTIN_JSON)
                .unwrap_or_else(|e| panic!("embedded city catalogue is invalid: {e}"))
        })
    }

    pub fn get(&self, id: &str) -> Option<&CityRecord> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    pub fn all_ids(&self) -> &[CityId] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CityId, &CityRecord)> {
        self.ids
            .iter()
            .filter_map(|id| self.records.get(id).map(|record| (id, record)))
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

fn validate(id: &CityId, record: &CityRecord) -> Result<(), CatalogueError> {
    if id.as_str().trim().is_empty() {
        return Err(CatalogueError::EmptyId);
    }
    if !record.coords.is_valid() {
        return Err(CatalogueError::Coordinates {
            id: id.clone(),
            lat: record.coords.lat,
            lon: record.coords.lon,
        });
    }
    if record.info.primary_score > 100 || record.metrics.max() > 100 {
        return Err(CatalogueError::ScoreOutOfRange { id: id.clone() });
    }
    let info = &record.info;
    if !(info.area_km2.is_finite() && info.area_km2 > 0.0)
        || !(info.density.is_finite() && info.density >= 0.0)
    {
        return Err(CatalogueError::Extent { id: id.clone() });
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(primary: u8, category: &str, metrics: [u8; 5]) -> CityRecord {
        let [vital, air_quality, heat_safety, water_sanitation, urban_integration] = metrics;
        CityRecord {
            coords: Coordinates {
                lat: 10.0,
                lon: 20.0,
            },
            info: CityInfo {
                primary_score: primary,
                primary_category: category.to_string(),
                population: 1_000_000,
                area_km2: 500.0,
                density: 2_000.0,
            },
            metrics: MetricScores {
                vital,
                air_quality,
                heat_safety,
                water_sanitation,
                urban_integration,
            },
            descriptions: Descriptions::default(),
        }
    }

    #[test]
    fn builtin_catalogue_loads_in_definition_order() {
        let catalogue = Catalogue::builtin();
        let ids: Vec<&str> = catalogue.all_ids().iter().map(CityId::as_str).collect();
        assert_eq!(
            ids,
            [
                "Athens",
                "Cairo",
                "Istanbul",
                "Berlin",
                "Delhi",
                "Lagos",
                "Manila",
                "New York",
                "Paris",
                "São Paulo",
            ]
        );
    }

    #[test]
    fn builtin_records_carry_expected_scores() {
        let athens = Catalogue::builtin().get("Athens").expect("Athens is catalogued");
        assert_eq!(athens.info.primary_score, 80);
        assert_eq!(athens.info.primary_category, "Healthy and Sustainable");
        assert_eq!(athens.metrics.vital, 77);
        assert_eq!(athens.metrics.urban_integration, 41);

        let cairo = Catalogue::builtin().get("Cairo").expect("Cairo is catalogued");
        assert_eq!(cairo.info.primary_score, 26);
        assert_eq!(cairo.info.density, 36_605.6);
    }

    #[test]
    fn builtin_records_have_every_long_description() {
        for (id, record) in Catalogue::builtin().iter() {
            assert_eq!(record.descriptions.long.len(), 6, "{id} long descriptions");
            assert!(record.descriptions.summary.is_some(), "{id} summary");
        }
    }

    #[test]
    fn get_unknown_city_is_none() {
        assert!(Catalogue::builtin().get("Atlantis").is_none());
        assert!(!Catalogue::builtin().contains("Atlantis"));
    }

    #[test]
    fn all_ids_is_stable_across_calls() {
        let catalogue = Catalogue::builtin();
        assert_eq!(catalogue.all_ids(), catalogue.all_ids());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = Catalogue::from_entries([
            (CityId::from("Oslo"), record(50, "Healthy", [1, 2, 3, 4, 5])),
            (CityId::from("Oslo"), record(60, "Healthy", [1, 2, 3, 4, 5])),
        ])
        .expect_err("duplicate should be rejected");
        assert!(matches!(err, CatalogueError::DuplicateId(id) if id == "Oslo"));
    }

    #[test]
    fn rejects_scores_above_one_hundred() {
        let err = Catalogue::from_entries([(
            CityId::from("Oslo"),
            record(50, "Healthy", [1, 2, 101, 4, 5]),
        )])
        .expect_err("score should be rejected");
        assert!(matches!(err, CatalogueError::ScoreOutOfRange { .. }));
    }

    #[test]
    fn rejects_out_of_bounds_coordinates() {
        let mut bad = record(50, "Healthy", [1, 2, 3, 4, 5]);
        bad.coords.lat = 91.0;
        let err = Catalogue::from_entries([(CityId::from("Oslo"), bad)])
            .expect_err("latitude should be rejected");
        assert!(matches!(err, CatalogueError::Coordinates { .. }));
    }

    #[test]
    fn rejects_non_positive_area() {
        let mut bad = record(50, "Healthy", [1, 2, 3, 4, 5]);
        bad.info.area_km2 = 0.0;
        let err = Catalogue::from_entries([(CityId::from("Oslo"), bad)])
            .expect_err("area should be rejected");
        assert!(matches!(err, CatalogueError::Extent { .. }));
    }

    #[test]
    fn rejects_negative_scores_at_parse_time() {
        let json = r#"[{
            "id": "Oslo",
            "coords": {"lat": 59.9, "lon": 10.7},
            "info": {"primary_score": -1, "primary_category": "Healthy",
                     "population": 1, "area_km2": 1.0, "density": 1.0},
            "metrics": {"vital": 1, "air_quality": 1, "heat_safety": 1,
                        "water_sanitation": 1, "urban_integration": 1}
        }]"#;
        assert!(matches!(
            Catalogue::from_json(json),
            Err(CatalogueError::Parse(_))
        ));
    }

    #[test]
    fn descriptions_are_optional_in_json() {
        let json = r#"[{
            "id": "Oslo",
            "coords": {"lat": 59.9, "lon": 10.7},
            "info": {"primary_score": 70, "primary_category": "Healthy",
                     "population": 700000, "area_km2": 454.0, "density": 1540.0},
            "metrics": {"vital": 80, "air_quality": 90, "heat_safety": 95,
                        "water_sanitation": 99, "urban_integration": 70}
        }]"#;
        let catalogue = Catalogue::from_json(json).expect("catalogue should parse");
        let oslo = catalogue.get("Oslo").expect("Oslo");
        assert_eq!(oslo.descriptions, Descriptions::default());
    }
}
