use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalogue::CityId;

/// Maximum number of cities compared side by side.
pub const MAX_COMPARED: usize = 4;

/// One user gesture against the selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "city", rename_all = "snake_case")]
pub enum Action {
    ViewDetail(CityId),
    CloseDetail,
    AddToComparison(CityId),
    RemoveFromComparison(CityId),
    ClearAll,
    ToggleAdvancedMode,
}

/// Whether a city can join the comparison set right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AddEligibility {
    Available { compared: usize },
    AlreadyCompared,
    AtCapacity,
}

impl AddEligibility {
    pub fn is_available(self) -> bool {
        matches!(self, Self::Available { .. })
    }

    /// Text the compare button area shows for this status.
    pub fn prompt(self) -> String {
        match self {
            Self::Available { compared } => format!("Compare City ({compared}/{MAX_COMPARED})"),
            Self::AlreadyCompared => "Already in comparison.".to_string(),
            Self::AtCapacity => format!("Maximum {MAX_COMPARED} cities selected."),
        }
    }
}

/// Per-session selection: the comparison set, the detail pointer and the advanced-mode flag.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionState {
    compared: Vec<CityId>,
    detail: Option<CityId>,
    advanced_mode: bool,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compared cities in insertion order.
    pub fn compared_cities(&self) -> &[CityId] {
        &self.compared
    }

    pub fn detail_city(&self) -> Option<&CityId> {
        self.detail.as_ref()
    }

    pub fn advanced_mode_enabled(&self) -> bool {
        self.advanced_mode
    }

    pub fn is_compared(&self, id: &str) -> bool {
        self.compared.iter().any(|c| c == id)
    }

    /// Slot index of `id` in the comparison set.
    pub fn slot_of(&self, id: &str) -> Option<usize> {
        self.compared.iter().position(|c| c == id)
    }

    pub fn is_overlay_active(&self) -> bool {
        !self.compared.is_empty() || self.detail.is_some()
    }

    pub fn add_eligibility(&self, id: &str) -> AddEligibility {
        if self.is_compared(id) {
            AddEligibility::AlreadyCompared
        } else if self.compared.len() >= MAX_COMPARED {
            AddEligibility::AtCapacity
        } else {
            AddEligibility::Available {
                compared: self.compared.len(),
            }
        }
    }

    pub fn view_detail(&mut self, id: CityId) {
        self.detail = Some(id);
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    /// Append `id` and close the detail view. Duplicates and adds past capacity are ignored.
    pub fn add_to_comparison(&mut self, id: CityId) {
        match self.add_eligibility(id.as_str()) {
            AddEligibility::Available { .. } => {
                self.compared.push(id);
                self.detail = None;
            }
            AddEligibility::AlreadyCompared => {
                debug!(city = %id, "ignoring add: city already compared");
            }
            AddEligibility::AtCapacity => {
                debug!(city = %id, max = MAX_COMPARED, "ignoring add: comparison set full");
            }
        }
    }

    /// Drop `id` if present. Advanced mode is switched off either way.
    pub fn remove_from_comparison(&mut self, id: &str) {
        self.compared.retain(|c| c != id);
        self.advanced_mode = false;
    }

    pub fn clear_all(&mut self) {
        self.compared.clear();
        self.detail = None;
        self.advanced_mode = false;
    }

    pub fn toggle_advanced_mode(&mut self) {
        self.advanced_mode = !self.advanced_mode;
    }

    /// Apply one action; returns whether anything observable changed.
    pub fn apply(&mut self, action: &Action) -> bool {
        let before = self.clone();
        match action {
            Action::ViewDetail(id) => self.view_detail(id.clone()),
            Action::CloseDetail => self.close_detail(),
            Action::AddToComparison(id) => self.add_to_comparison(id.clone()),
            Action::RemoveFromComparison(id) => self.remove_from_comparison(id.as_str()),
            Action::ClearAll => self.clear_all(),
            Action::ToggleAdvancedMode => self.toggle_advanced_mode(),
        }
        *self != before
    }

    /// Value-in/value-out form of [`SelectionState::apply`].
    pub fn reduce(mut self, action: &Action) -> Self {
        self.apply(action);
        self
    }
}
