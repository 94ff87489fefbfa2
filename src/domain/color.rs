//! The fixed color palette and bulk recolor patterns.
//!
//! Options carry exactly one color drawn from a closed 16-value palette. Each
//! color has a canonical kebab-case wire name (the identifier the remote
//! collaborator understands) and a display hex value for rendering surfaces.
//! [`ColorPattern`] names the built-in sequences the bulk recolor operation
//! can cycle across a set of rows.

use serde::{Deserialize, Serialize};

/// One value from the fixed option color palette.
///
/// The palette is closed: the remote collaborator rejects anything outside
/// these 16 names, so no freeform color representation exists anywhere in the
/// core. `None` is the uncolored default for newly added options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Color {
    /// No color assigned; rendered as neutral gray.
    None,
    Red,
    Orange,
    YellowOrange,
    Yellow,
    YellowGreen,
    Green,
    BlueGreen,
    Aqua,
    Blue,
    Indigo,
    Purple,
    Magenta,
    HotPink,
    Pink,
    CoolGray,
}

impl Color {
    /// Every palette color in canonical display order.
    pub const PALETTE: [Self; 16] = [
        Self::None,
        Self::Red,
        Self::Orange,
        Self::YellowOrange,
        Self::Yellow,
        Self::YellowGreen,
        Self::Green,
        Self::BlueGreen,
        Self::Aqua,
        Self::Blue,
        Self::Indigo,
        Self::Purple,
        Self::Magenta,
        Self::HotPink,
        Self::Pink,
        Self::CoolGray,
    ];

    /// Returns the canonical kebab-case wire name for this color.
    ///
    /// This is the identifier sent to and received from the remote
    /// collaborator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Red => "red",
            Self::Orange => "orange",
            Self::YellowOrange => "yellow-orange",
            Self::Yellow => "yellow",
            Self::YellowGreen => "yellow-green",
            Self::Green => "green",
            Self::BlueGreen => "blue-green",
            Self::Aqua => "aqua",
            Self::Blue => "blue",
            Self::Indigo => "indigo",
            Self::Purple => "purple",
            Self::Magenta => "magenta",
            Self::HotPink => "hot-pink",
            Self::Pink => "pink",
            Self::CoolGray => "cool-gray",
        }
    }

    /// Returns the display hex value for this color.
    ///
    /// Exposed for rendering surfaces; the core itself never interprets hex
    /// values.
    #[must_use]
    pub const fn hex(self) -> &'static str {
        match self {
            Self::None => "#bdbdbd",
            Self::Red => "#fe8285",
            Self::Orange => "#fd9864",
            Self::YellowOrange => "#f5b650",
            Self::Yellow => "#f4d35f",
            Self::YellowGreen => "#bbe27d",
            Self::Green => "#7fd29c",
            Self::BlueGreen => "#6dcce4",
            Self::Aqua => "#98e3d8",
            Self::Blue => "#6fa0fc",
            Self::Indigo => "#b0a2fc",
            Self::Purple => "#df94ee",
            Self::Magenta => "#f9a5e5",
            Self::HotPink => "#fe8cc2",
            Self::Pink => "#fea7ba",
            Self::CoolGray => "#a0a0a0",
        }
    }

    /// Parses a canonical wire name into a palette color.
    ///
    /// Returns `None` for anything outside the closed palette.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::PALETTE.iter().copied().find(|c| c.as_str() == name)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::None
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named color sequence applied cyclically by bulk recolor.
///
/// When a pattern is applied to a set of rows, the rows receive the pattern's
/// colors in display order, wrapping around when the target set is longer
/// than the pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorPattern {
    /// The full palette in canonical display order.
    Palette,

    /// The ordering the remote vendor assigns to new fields by default.
    AsanaDefault,
}

/// The vendor-default color ordering.
const ASANA_DEFAULT: [Color; 16] = [
    Color::Green,
    Color::Red,
    Color::Orange,
    Color::YellowOrange,
    Color::Yellow,
    Color::YellowGreen,
    Color::BlueGreen,
    Color::Aqua,
    Color::Blue,
    Color::Indigo,
    Color::Purple,
    Color::Magenta,
    Color::HotPink,
    Color::Pink,
    Color::CoolGray,
    Color::None,
];

impl ColorPattern {
    /// Returns the color sequence this pattern cycles through.
    #[must_use]
    pub const fn colors(self) -> &'static [Color] {
        match self {
            Self::Palette => &Color::PALETTE,
            Self::AsanaDefault => &ASANA_DEFAULT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_round_trip() {
        for color in Color::PALETTE {
            assert_eq!(Color::from_name(color.as_str()), Some(color));
        }
        assert_eq!(Color::from_name("chartreuse"), None);
    }

    #[test]
    fn serde_uses_kebab_case() {
        let json = serde_json::to_string(&Color::YellowOrange).unwrap();
        assert_eq!(json, "\"yellow-orange\"");
        let back: Color = serde_json::from_str("\"hot-pink\"").unwrap();
        assert_eq!(back, Color::HotPink);
    }

    #[test]
    fn patterns_cover_the_full_palette() {
        for pattern in [ColorPattern::Palette, ColorPattern::AsanaDefault] {
            let mut colors = pattern.colors().to_vec();
            colors.sort_by_key(|c| c.as_str());
            colors.dedup();
            assert_eq!(colors.len(), 16, "{pattern:?} repeats or omits a color");
        }
    }
}
