//! Palettes, snapshots, and the direct (non-generated) ways to change them.
//!
//! Every operation here returns a new value; nothing mutates a palette that
//! may already be sitting in undo history.

use std::fmt;

use serde::Serialize;
use swatch_color::{ColorFormatError, Swatch};

use crate::harmony::{HarmonyLabel, Provenance};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A direct palette edit that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteError {
    /// Index past the end of the palette.
    NoSuchSwatch { index: usize, len: usize },
    /// The replacement hex was malformed.
    Color(ColorFormatError),
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSuchSwatch { index, len } => {
                write!(f, "no swatch at position {index} (palette has {len})")
            }
            Self::Color(e) => write!(f, "invalid color: {e}"),
        }
    }
}

impl std::error::Error for PaletteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Color(e) => Some(e),
            Self::NoSuchSwatch { .. } => None,
        }
    }
}

impl From<ColorFormatError> for PaletteError {
    fn from(e: ColorFormatError) -> Self {
        Self::Color(e)
    }
}

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// An ordered row of swatches, left to right.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Palette {
    swatches: Vec<Swatch>,
}

impl Palette {
    #[must_use]
    pub const fn new(swatches: Vec<Swatch>) -> Self {
        Self { swatches }
    }

    /// Materialize every hex, unlocked.
    ///
    /// # Errors
    ///
    /// Fails on the first malformed hex; nothing is built in that case.
    pub fn import<S: AsRef<str>>(hexes: &[S]) -> Result<Self, ColorFormatError> {
        hexes
            .iter()
            .map(|hex| Swatch::materialize(hex.as_ref(), false))
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Swatch> {
        self.swatches.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Swatch> {
        self.swatches.iter()
    }

    /// The hex strings in order. This is what favorites store.
    #[must_use]
    pub fn hexes(&self) -> Vec<String> {
        self.swatches.iter().map(|s| s.hex().to_string()).collect()
    }

    /// Hex-sequence equality: same colors in the same order. Lock flags do
    /// not matter.
    #[must_use]
    pub fn same_hexes<S: AsRef<str>>(&self, hexes: &[S]) -> bool {
        self.swatches.len() == hexes.len()
            && self
                .swatches
                .iter()
                .zip(hexes)
                .all(|(s, h)| s.hex().eq_ignore_ascii_case(h.as_ref()))
    }

    #[must_use]
    pub fn locked_count(&self) -> usize {
        self.swatches.iter().filter(|s| s.is_locked()).count()
    }

    /// First locked swatch and its position.
    #[must_use]
    pub fn first_locked(&self) -> Option<(usize, &Swatch)> {
        self.swatches.iter().enumerate().find(|(_, s)| s.is_locked())
    }

    /// Replace the swatch at `index` with `hex`, keeping its lock flag.
    ///
    /// # Errors
    ///
    /// [`PaletteError::NoSuchSwatch`] for a bad index,
    /// [`PaletteError::Color`] for a malformed hex.
    pub fn with_swatch(&self, index: usize, hex: &str) -> Result<Self, PaletteError> {
        let previous = self.check(index)?;
        let replacement = Swatch::materialize(hex, previous.is_locked())?;
        let mut swatches = self.swatches.clone();
        swatches[index] = replacement;
        Ok(Self::new(swatches))
    }

    /// Flip the lock flag at `index`.
    ///
    /// # Errors
    ///
    /// [`PaletteError::NoSuchSwatch`] for a bad index.
    pub fn with_lock_toggled(&self, index: usize) -> Result<Self, PaletteError> {
        self.check(index)?;
        let mut swatches = self.swatches.clone();
        swatches[index].toggle_lock();
        Ok(Self::new(swatches))
    }

    /// Move the swatch at `from` so it ends up at `to`, shifting the ones
    /// in between.
    ///
    /// # Errors
    ///
    /// [`PaletteError::NoSuchSwatch`] if either index is out of range.
    pub fn reordered(&self, from: usize, to: usize) -> Result<Self, PaletteError> {
        self.check(from)?;
        self.check(to)?;
        let mut swatches = self.swatches.clone();
        let moved = swatches.remove(from);
        swatches.insert(to, moved);
        Ok(Self::new(swatches))
    }

    fn check(&self, index: usize) -> Result<&Swatch, PaletteError> {
        self.swatches.get(index).ok_or(PaletteError::NoSuchSwatch {
            index,
            len: self.swatches.len(),
        })
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a Swatch;
    type IntoIter = std::slice::Iter<'a, Swatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.swatches.iter()
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// One step of palette history: the swatches and how they were made.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Snapshot {
    pub palette: Palette,
    pub harmony: Option<HarmonyLabel>,
}

impl Snapshot {
    #[must_use]
    pub const fn new(palette: Palette, harmony: Option<HarmonyLabel>) -> Self {
        Self { palette, harmony }
    }

    /// Import outside colors and tag them with where they came from.
    ///
    /// # Errors
    ///
    /// Fails on the first malformed hex.
    pub fn imported<S: AsRef<str>>(
        hexes: &[S],
        provenance: Provenance,
    ) -> Result<Self, ColorFormatError> {
        Ok(Self::new(Palette::import(hexes)?, Some(provenance.label())))
    }

    /// Same harmony tag, different swatches.
    #[must_use]
    pub fn with_palette(&self, palette: Palette) -> Self {
        Self::new(palette, self.harmony)
    }
}
