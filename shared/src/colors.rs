use serde::{Deserialize, Serialize};

/// Color of a raw 0–100 score bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Green,
    Amber,
    Red,
}

impl ScoreBand {
    pub fn hex(self) -> &'static str {
        match self {
            Self::Green => "#4CAF50",
            Self::Amber => "#FFC107",
            Self::Red => "#F44336",
        }
    }
}

/// Color attached to a primary-score category label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryTone {
    Green,
    Orange,
    DarkOrange,
    Red,
    /// Fallback for labels outside the known set.
    Gray,
}

impl CategoryTone {
    pub fn hex(self) -> &'static str {
        match self {
            Self::Green => "#2ecc71",
            Self::Orange => "#f39c12",
            Self::DarkOrange => "#e67e22",
            Self::Red => "#e74c3c",
            Self::Gray => "#95a5a6",
        }
    }
}

/// Blue, orange, green, purple: one per comparison slot.
pub const SLOT_PALETTE: [&str; 4] = ["#1f77b4", "#ff7f0e", "#2ca02c", "#9467bd"];

/// Marker color for any city currently in the comparison set.
pub const SELECTED_MARKER_COLOR: &str = "#3f51b5";

/// Color for the comparison slot at `index` (position in the comparison set).
pub fn slot_color(index: usize) -> &'static str {
    SLOT_PALETTE[index % SLOT_PALETTE.len()]
}

/// Parse `#rrggbb` into RGB bytes.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Format RGBA as a CSS color string.
pub fn rgba_css(r: u8, g: u8, b: u8, a: f64) -> String {
    format!("rgba({r},{g},{b},{a})")
}

/// Translucent fill for a hex color, as drawn under radar series.
pub fn fill_css(hex: &str, opacity: f64) -> Option<String> {
    let (r, g, b) = hex_to_rgb(hex)?;
    Some(rgba_css(r, g, b, opacity))
}
