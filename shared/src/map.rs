use serde::Serialize;

use crate::catalogue::{Catalogue, CityId, Coordinates};
use crate::colors::SELECTED_MARKER_COLOR;
use crate::resolver::category_color;

/// Center used whenever the map is not focused on a single city.
pub const WORLD_CENTER: Coordinates = Coordinates {
    lat: 20.0,
    lon: 0.0,
};
pub const WORLD_ZOOM: u8 = 2;
pub const CITY_ZOOM: u8 = 5;
pub const MIN_ZOOM: u8 = 2;
/// South-west and north-east corners the map may pan to.
pub const WORLD_BOUNDS: [[f64; 2]; 2] = [[-90.0, -180.0], [90.0, 200.0]];

const SELECTED_OPACITY: f64 = 1.0;
const UNSELECTED_OPACITY: f64 = 0.8;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub city: CityId,
    pub coords: Coordinates,
    pub selected: bool,
    pub color: &'static str,
    pub opacity: f64,
    pub popup: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: Coordinates,
    pub zoom: u8,
    pub min_zoom: u8,
    pub bounds: [[f64; 2]; 2],
    pub markers: Vec<MapMarker>,
}

/// One marker per catalogue city, in catalogue order.
pub fn build_map_markers(compared: &[CityId], catalogue: &Catalogue) -> Vec<MapMarker> {
    catalogue
        .iter()
        .map(|(id, record)| {
            let selected = compared.contains(id);
            let info = &record.info;
            MapMarker {
                city: id.clone(),
                coords: record.coords,
                selected,
                color: if selected {
                    SELECTED_MARKER_COLOR
                } else {
                    category_color(&info.primary_category).hex()
                },
                opacity: if selected {
                    SELECTED_OPACITY
                } else {
                    UNSELECTED_OPACITY
                },
                popup: format!(
                    "{id} ({} - PDS: {})",
                    info.primary_category, info.primary_score
                ),
            }
        })
        .collect()
}

/// Focus on the compared city when exactly one is compared, else show the whole world.
pub fn build_map_view(compared: &[CityId], catalogue: &Catalogue) -> MapView {
    let focus = match compared {
        [only] => catalogue.get(only.as_str()).map(|record| record.coords),
        _ => None,
    };
    let (center, zoom) = match focus {
        Some(coords) => (coords, CITY_ZOOM),
        None => (WORLD_CENTER, WORLD_ZOOM),
    };
    MapView {
        center,
        zoom,
        min_zoom: MIN_ZOOM,
        bounds: WORLD_BOUNDS,
        markers: build_map_markers(compared, catalogue),
    }
}

#[cfg(test)]
mod tests {
    use super::{CITY_ZOOM, WORLD_CENTER, WORLD_ZOOM, build_map_markers, build_map_view};
    use crate::catalogue::{Catalogue, CityId};
    use crate::colors::SELECTED_MARKER_COLOR;

    fn ids(names: &[&str]) -> Vec<CityId> {
        names.iter().copied().map(CityId::from).collect()
    }

    #[test]
    fn one_marker_per_city_in_catalogue_order() {
        let markers = build_map_markers(&[], Catalogue::builtin());
        let cities: Vec<&CityId> = markers.iter().map(|m| &m.city).collect();
        let expected: Vec<&CityId> = Catalogue::builtin().all_ids().iter().collect();
        assert_eq!(cities, expected);
    }

    #[test]
    fn selected_markers_use_fixed_color() {
        let markers = build_map_markers(&ids(&["Cairo"]), Catalogue::builtin());
        let cairo = markers.iter().find(|m| m.city == "Cairo").expect("Cairo marker");
        assert!(cairo.selected);
        assert_eq!(cairo.color, SELECTED_MARKER_COLOR);
        assert_eq!(cairo.opacity, 1.0);

        let athens = markers.iter().find(|m| m.city == "Athens").expect("Athens marker");
        assert!(!athens.selected);
        assert_eq!(athens.color, "#2ecc71");
        assert_eq!(athens.opacity, 0.8);
    }

    #[test]
    fn popup_names_category_and_primary_score() {
        let markers = build_map_markers(&[], Catalogue::builtin());
        assert_eq!(markers[0].popup, "Athens (Healthy and Sustainable - PDS: 80)");
    }

    #[test]
    fn single_comparison_focuses_city() {
        let view = build_map_view(&ids(&["Paris"]), Catalogue::builtin());
        let paris = Catalogue::builtin().get("Paris").expect("Paris");
        assert_eq!(view.center, paris.coords);
        assert_eq!(view.zoom, CITY_ZOOM);
    }

    #[test]
    fn zero_or_many_comparisons_show_world() {
        for compared in [ids(&[]), ids(&["Paris", "Berlin"]), ids(&["Atlantis"])] {
            let view = build_map_view(&compared, Catalogue::builtin());
            assert_eq!(view.center, WORLD_CENTER);
            assert_eq!(view.zoom, WORLD_ZOOM);
        }
    }
}
