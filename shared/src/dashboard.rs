use serde::Serialize;

use crate::cards::{AdvancedSection, ComparisonCard, build_advanced_section, build_comparison_cards};
use crate::catalogue::{Catalogue, CityId};
use crate::detail::{DetailPanel, build_detail_panel};
use crate::map::{MapView, build_map_view};
use crate::radar::{RadarChart, build_radar_chart};
use crate::selection::{AddEligibility, SelectionState};

pub const EMPTY_PROMPT: &str =
    "Click a city marker on the map to view its details and add it for comparison (Max 4).";

/// Detail card plus the compare-button status for that city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    pub panel: DetailPanel,
    pub eligibility: AddEligibility,
    pub prompt: String,
}

/// Everything the presentation layer renders for one session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub compared: Vec<CityId>,
    pub detail_city: Option<CityId>,
    pub advanced_mode: bool,
    pub overlay_active: bool,
    /// Shown only while the overlay is closed.
    pub empty_prompt: Option<&'static str>,
    pub detail: Option<DetailView>,
    pub radar: Option<RadarChart>,
    pub cards: Vec<ComparisonCard>,
    pub advanced: Option<AdvancedSection>,
    pub map: MapView,
}

impl Dashboard {
    /// Rebuild every derived view from the session state. Pure and idempotent.
    pub fn build(state: &SelectionState, catalogue: &Catalogue) -> Self {
        let compared = state.compared_cities();
        let overlay_active = state.is_overlay_active();

        let detail = state.detail_city().and_then(|id| {
            let panel = build_detail_panel(id.as_str(), catalogue)?;
            let eligibility = state.add_eligibility(id.as_str());
            Some(DetailView {
                panel,
                eligibility,
                prompt: eligibility.prompt(),
            })
        });

        let (radar, advanced) = if compared.is_empty() {
            (None, None)
        } else {
            (
                Some(build_radar_chart(compared, catalogue)),
                state
                    .advanced_mode_enabled()
                    .then(|| build_advanced_section(compared, catalogue)),
            )
        };

        Self {
            compared: compared.to_vec(),
            detail_city: state.detail_city().cloned(),
            advanced_mode: state.advanced_mode_enabled(),
            overlay_active,
            empty_prompt: (!overlay_active).then_some(EMPTY_PROMPT),
            detail,
            radar,
            cards: build_comparison_cards(compared, catalogue),
            advanced,
            map: build_map_view(compared, catalogue),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Dashboard, EMPTY_PROMPT};
    use crate::catalogue::{Catalogue, CityId};
    use crate::selection::{Action, AddEligibility, SelectionState};

    fn state_with(actions: &[Action]) -> SelectionState {
        actions
            .iter()
            .fold(SelectionState::new(), |state, action| state.reduce(action))
    }

    fn add(id: &str) -> Action {
        Action::AddToComparison(CityId::from(id))
    }

    #[test]
    fn empty_state_shows_prompt_only() {
        let dashboard = Dashboard::build(&SelectionState::new(), Catalogue::builtin());
        assert!(!dashboard.overlay_active);
        assert_eq!(dashboard.empty_prompt, Some(EMPTY_PROMPT));
        assert!(dashboard.detail.is_none());
        assert!(dashboard.radar.is_none());
        assert!(dashboard.cards.is_empty());
        assert!(dashboard.advanced.is_none());
        assert_eq!(dashboard.map.markers.len(), Catalogue::builtin().len());
    }

    #[test]
    fn detail_view_reports_eligibility() {
        let state = state_with(&[add("Athens"), Action::ViewDetail(CityId::from("Athens"))]);
        let dashboard = Dashboard::build(&state, Catalogue::builtin());
        let detail = dashboard.detail.expect("detail view");
        assert_eq!(detail.eligibility, AddEligibility::AlreadyCompared);
        assert_eq!(detail.prompt, "Already in comparison.");
        assert!(dashboard.empty_prompt.is_none());
    }

    #[test]
    fn unknown_detail_city_renders_nothing() {
        let state = state_with(&[Action::ViewDetail(CityId::from("Atlantis"))]);
        let dashboard = Dashboard::build(&state, Catalogue::builtin());
        assert!(dashboard.overlay_active);
        assert!(dashboard.detail.is_none());
        assert_eq!(dashboard.detail_city.as_ref().map(CityId::as_str), Some("Atlantis"));
    }

    #[test]
    fn advanced_section_requires_flag_and_cities() {
        let toggled_empty = state_with(&[Action::ToggleAdvancedMode]);
        let dashboard = Dashboard::build(&toggled_empty, Catalogue::builtin());
        assert!(dashboard.advanced_mode);
        assert!(dashboard.advanced.is_none());

        let toggled = state_with(&[add("Athens"), add("Cairo"), Action::ToggleAdvancedMode]);
        let dashboard = Dashboard::build(&toggled, Catalogue::builtin());
        let advanced = dashboard.advanced.expect("advanced section");
        assert_eq!(advanced.charts.len(), 3);
    }

    #[test]
    fn removal_hides_advanced_section() {
        let state = state_with(&[
            add("Athens"),
            add("Cairo"),
            Action::ToggleAdvancedMode,
            Action::RemoveFromComparison(CityId::from("Cairo")),
        ]);
        let dashboard = Dashboard::build(&state, Catalogue::builtin());
        assert!(!dashboard.advanced_mode);
        assert!(dashboard.advanced.is_none());
        assert_eq!(dashboard.cards.len(), 1);
    }

    #[test]
    fn build_is_referentially_transparent() {
        let state = state_with(&[add("Delhi"), add("Manila"), Action::ToggleAdvancedMode]);
        assert_eq!(
            Dashboard::build(&state, Catalogue::builtin()),
            Dashboard::build(&state, Catalogue::builtin())
        );
    }

    #[test]
    fn end_to_end_capacity_scenario() {
        let state = state_with(&[
            add("Athens"),
            add("Cairo"),
            add("Istanbul"),
            add("Berlin"),
            add("Delhi"),
        ]);
        let dashboard = Dashboard::build(&state, Catalogue::builtin());
        let compared: Vec<&str> = dashboard.compared.iter().map(CityId::as_str).collect();
        assert_eq!(compared, ["Athens", "Cairo", "Istanbul", "Berlin"]);
        let radar = dashboard.radar.expect("radar");
        assert_eq!(radar.series.len(), 4);
        assert!(radar.rows.iter().all(|row| row.values.len() == 4));
    }
}
