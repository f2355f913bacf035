//! Layout engine types and configuration.

use serde::{Deserialize, Serialize};

/// Named tab arrangement. Persisted by its string id; ids that are not
/// recognised resolve to [`LayoutPreset::Auto`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LayoutPreset {
    /// Grid sized by a lookup table on the tab count.
    #[default]
    Auto,
    Columns2,
    Columns3,
    Columns4,
    /// First tab fills the left half, the rest tile 2-wide on the right.
    OneBigLeft,
    /// Last tab fills the right half, the rest tile 2-wide on the left.
    OneBigRight,
    /// Odd counts >= 3 only: tab 1 fills the right half, the rest stack left.
    OddSecondTall,
    /// Odd counts >= 3 only: last tab takes the bottom third.
    OddLastWide,
    /// First tab takes the top third, the rest tile 2-wide below.
    FirstWideTop,
}

impl LayoutPreset {
    pub const ALL: [LayoutPreset; 9] = [
        LayoutPreset::Auto,
        LayoutPreset::Columns2,
        LayoutPreset::Columns3,
        LayoutPreset::Columns4,
        LayoutPreset::OneBigLeft,
        LayoutPreset::OneBigRight,
        LayoutPreset::OddSecondTall,
        LayoutPreset::OddLastWide,
        LayoutPreset::FirstWideTop,
    ];

    pub fn id(self) -> &'static str {
        match self {
            LayoutPreset::Auto => "auto",
            LayoutPreset::Columns2 => "columns_2",
            LayoutPreset::Columns3 => "columns_3",
            LayoutPreset::Columns4 => "columns_4",
            LayoutPreset::OneBigLeft => "one_big_left",
            LayoutPreset::OneBigRight => "one_big_right",
            LayoutPreset::OddSecondTall => "odd_second_tall",
            LayoutPreset::OddLastWide => "odd_last_wide",
            LayoutPreset::FirstWideTop => "first_wide_top",
        }
    }

    pub fn from_id(id: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|p| p.id() == id)
            .unwrap_or(LayoutPreset::Auto)
    }
}

impl From<String> for LayoutPreset {
    fn from(id: String) -> Self {
        Self::from_id(&id)
    }
}

impl From<LayoutPreset> for String {
    fn from(preset: LayoutPreset) -> Self {
        preset.id().to_string()
    }
}

/// Computes tab rectangles for a window's content area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutEngine {
    pub preset: LayoutPreset,
    /// Height of the header strip above the content area.
    pub header_height: f64,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self {
            preset: LayoutPreset::Auto,
            header_height: 80.0,
        }
    }
}
