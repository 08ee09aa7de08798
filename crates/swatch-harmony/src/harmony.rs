//! Harmony rules and palette labels.
//!
//! A [`Harmony`] is a generation rule: a fixed set of hue offsets from a
//! base hue. A [`HarmonyLabel`] is what a palette is tagged with, which is
//! either the rule that produced it or a provenance marker (`imported`,
//! `trending`) for palettes that came from outside the generator.
//! Provenance markers are never rules, so the generator only accepts
//! [`Harmony`].

use std::fmt;

use rand::Rng;
use serde::{Serialize, Serializer};

/// A hue relationship the generator knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Harmony {
    /// Base hue and its opposite (180°).
    Complementary,
    /// Neighbors within ±60°.
    Analogous,
    /// Three hues 120° apart.
    Triadic,
    /// Base plus the two neighbors of its complement (150°, 210°).
    SplitComplementary,
    /// Four hues 90° apart.
    Tetradic,
    /// One hue, spread across lightness.
    Monochromatic,
    /// An independent hue per slot.
    Random,
}

impl Harmony {
    /// Every rule, in menu order.
    pub const ALL: [Self; 7] = [
        Self::Complementary,
        Self::Analogous,
        Self::Triadic,
        Self::SplitComplementary,
        Self::Tetradic,
        Self::Monochromatic,
        Self::Random,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Complementary => "complementary",
            Self::Analogous => "analogous",
            Self::Triadic => "triadic",
            Self::SplitComplementary => "split-complementary",
            Self::Tetradic => "tetradic",
            Self::Monochromatic => "monochromatic",
            Self::Random => "random",
        }
    }

    /// Parse a rule from its name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        Self::ALL.iter().find(|h| h.name() == lower).copied()
    }

    /// Hue offsets in degrees, cycled across palette positions.
    ///
    /// Empty for [`Harmony::Random`], which draws every hue fresh.
    #[must_use]
    pub const fn offsets(self) -> &'static [f32] {
        match self {
            Self::Complementary => &[0.0, 180.0],
            Self::Analogous => &[-60.0, -30.0, 0.0, 30.0, 60.0],
            Self::Triadic => &[0.0, 120.0, 240.0],
            Self::SplitComplementary => &[0.0, 150.0, 210.0],
            Self::Tetradic => &[0.0, 90.0, 180.0, 270.0],
            Self::Monochromatic => &[0.0],
            Self::Random => &[],
        }
    }

    /// Index of the 0° entry in [`offsets`](Self::offsets).
    const fn base_slot(self) -> usize {
        match self {
            Self::Analogous => 2,
            _ => 0,
        }
    }

    /// The hue offset for `position`, arranged so that `anchor` (the
    /// position the base hue came from) lands on 0°.
    ///
    /// Returns `None` for [`Harmony::Random`].
    #[must_use]
    pub fn offset_for(self, position: usize, anchor: usize) -> Option<f32> {
        let offsets = self.offsets();
        let len = offsets.len();
        if len == 0 {
            return None;
        }
        let idx = (self.base_slot() + position + len - anchor % len) % len;
        Some(offsets[idx])
    }

    /// Pick a rule uniformly at random.
    pub fn choose<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

impl fmt::Display for Harmony {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

/// Where a palette came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provenance {
    /// Colors extracted from an image.
    Image,
    /// A curated trending palette.
    Trend,
}

impl Provenance {
    #[must_use]
    pub const fn label(self) -> HarmonyLabel {
        match self {
            Self::Image => HarmonyLabel::Imported,
            Self::Trend => HarmonyLabel::Trending,
        }
    }
}

/// The tag carried by a palette snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HarmonyLabel {
    /// Produced by the generator with this rule.
    Rule(Harmony),
    /// Came from an image.
    Imported,
    /// Came from the curated trend list.
    Trending,
}

impl HarmonyLabel {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rule(h) => h.name(),
            Self::Imported => "imported",
            Self::Trending => "trending",
        }
    }

    /// Parse any label, rule or provenance (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "imported" => Some(Self::Imported),
            "trending" => Some(Self::Trending),
            other => Harmony::from_name(other).map(Self::Rule),
        }
    }

    /// The generation rule, if this label is one.
    #[must_use]
    pub const fn rule(self) -> Option<Harmony> {
        match self {
            Self::Rule(h) => Some(h),
            Self::Imported | Self::Trending => None,
        }
    }

    #[must_use]
    pub const fn is_provenance(self) -> bool {
        matches!(self, Self::Imported | Self::Trending)
    }
}

impl From<Harmony> for HarmonyLabel {
    fn from(h: Harmony) -> Self {
        Self::Rule(h)
    }
}

impl fmt::Display for HarmonyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for HarmonyLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
