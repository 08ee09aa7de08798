//! Curated "trending" palettes, ready-made rows loaded by name.
//!
//! Loading one goes through the same import path as image extraction and
//! tags the snapshot [`HarmonyLabel::Trending`](crate::HarmonyLabel).

use swatch_color::ColorFormatError;

use crate::harmony::Provenance;
use crate::palette::Snapshot;

/// A named curated palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trend {
    pub name: &'static str,
    pub hexes: &'static [&'static str],
}

impl Trend {
    /// Import this trend as a snapshot.
    ///
    /// # Errors
    ///
    /// Only if a curated hex is malformed, which the tests rule out.
    pub fn snapshot(&self) -> Result<Snapshot, ColorFormatError> {
        Snapshot::imported(self.hexes, Provenance::Trend)
    }
}

/// All curated palettes, in display order.
pub const TRENDS: &[Trend] = &[
    Trend { name: "party", hexes: &["#FF595E", "#FFCA3A", "#8AC926", "#1982C4", "#6A4C93"] },
    Trend { name: "sunset", hexes: &["#F94144", "#F3722C", "#F8961E", "#F9C74F", "#90BE6D"] },
    Trend { name: "ocean", hexes: &["#03045E", "#0077B6", "#00B4D8", "#90E0EF", "#CAF0F8"] },
    Trend { name: "forest", hexes: &["#DAD7CD", "#A3B18A", "#588157", "#3A5A40", "#344E41"] },
    Trend { name: "pastel", hexes: &["#CDB4DB", "#FFC8DD", "#FFAFCC", "#BDE0FE", "#A2D2FF"] },
    Trend { name: "earth", hexes: &["#CCD5AE", "#E9EDC9", "#FEFAE0", "#FAEDCD", "#D4A373"] },
    Trend { name: "neon", hexes: &["#F72585", "#7209B7", "#3A0CA3", "#4361EE", "#4CC9F0"] },
    Trend { name: "nordic", hexes: &["#2E3440", "#3B4252", "#88C0D0", "#81A1C1", "#ECEFF4"] },
];

/// Look up a curated palette by name (case-insensitive).
#[must_use]
pub fn trend(name: &str) -> Option<&'static Trend> {
    TRENDS.iter().find(|t| t.name.eq_ignore_ascii_case(name))
}

/// Names of every curated palette.
pub fn trend_names() -> impl Iterator<Item = &'static str> {
    TRENDS.iter().map(|t| t.name)
}
