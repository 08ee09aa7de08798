//! Palette generation, from a hue rule to concrete swatches.
//!
//! Each unlocked position gets a hue from the chosen [`Harmony`], then a
//! lightness and chroma drawn from ranges that suit that harmony. Colors are
//! built in OKLCH, gamut-mapped to sRGB, and materialized into swatches.
//! Locked swatches are cloned through as-is.

use std::fmt;

use rand::Rng;
use swatch_color::color::normalize_hue;
use swatch_color::{Color, Swatch};

use crate::harmony::{Harmony, HarmonyLabel};
use crate::palette::{Palette, Snapshot};

/// Palette size below 1 was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigurationError {
    pub palette_size: usize,
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "palette size must be at least 1 (got {})", self.palette_size)
    }
}

impl std::error::Error for ConfigurationError {}

/// A freshly generated palette and the rule that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    pub palette: Palette,
    pub harmony: HarmonyLabel,
}

impl Generated {
    #[must_use]
    pub fn into_snapshot(self) -> Snapshot {
        Snapshot::new(self.palette, Some(self.harmony))
    }
}

/// Generate the next palette.
///
/// - `current` empty: a full palette of `size` unlocked swatches.
/// - otherwise: positions below `size` that are locked in `current` are
///   kept exactly; the rest are regenerated. Entries past `size` are
///   dropped.
///
/// The base hue comes from the first locked swatch, or from `rng` when none
/// is locked. `requested` forces the rule; otherwise one is drawn from
/// [`Harmony::ALL`].
///
/// # Errors
///
/// [`ConfigurationError`] when `size` is zero.
pub fn generate<R: Rng + ?Sized>(
    current: &Palette,
    requested: Option<Harmony>,
    size: usize,
    rng: &mut R,
) -> Result<Generated, ConfigurationError> {
    if size == 0 {
        return Err(ConfigurationError { palette_size: size });
    }

    let harmony = requested.unwrap_or_else(|| Harmony::choose(rng));

    let anchor = current.first_locked().filter(|(pos, _)| *pos < size);
    let (anchor_pos, base_hue) = match anchor {
        Some((pos, swatch)) => (pos, swatch.to_color().h),
        None => (0, rng.gen_range(0.0..360.0)),
    };

    let swatches = (0..size)
        .map(|pos| match current.get(pos) {
            Some(kept) if kept.is_locked() => kept.clone(),
            _ => synthesize(harmony, base_hue, pos, anchor_pos, size, rng),
        })
        .collect();

    Ok(Generated {
        palette: Palette::new(swatches),
        harmony: HarmonyLabel::Rule(harmony),
    })
}

/// Build one unlocked swatch for `pos`.
fn synthesize<R: Rng + ?Sized>(
    harmony: Harmony,
    base_hue: f32,
    pos: usize,
    anchor: usize,
    size: usize,
    rng: &mut R,
) -> Swatch {
    let hue = match harmony.offset_for(pos, anchor) {
        Some(offset) => base_hue + offset + rng.gen_range(-HUE_JITTER..=HUE_JITTER),
        None => rng.gen_range(0.0..360.0),
    };

    let (lightness, chroma) = match harmony {
        Harmony::Monochromatic => {
            // Dark to light across the row, whatever the anchor.
            let step = (pos as f32 + 0.5) / size as f32;
            (
                0.60f32.mul_add(step, 0.28) + rng.gen_range(-0.03..=0.03),
                rng.gen_range(0.04..0.14),
            )
        }
        Harmony::Random => (rng.gen_range(0.40..0.90), rng.gen_range(0.05..0.20)),
        _ => (rng.gen_range(0.45..0.88), rng.gen_range(0.08..0.19)),
    };

    let color = Color::oklch(lightness.clamp(0.0, 1.0), chroma, normalize_hue(hue)).to_gamut();

    Swatch::from_rgb8(color.to_rgb8(), false)
}

/// Degrees of random wobble around each rule hue.
const HUE_JITTER: f32 = 8.0;
