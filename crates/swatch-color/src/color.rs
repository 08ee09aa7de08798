// SPDX-License-Identifier: MIT
//
// OKLCH working space for palette generation.
//
// Harmonies are defined as hue relationships, and hue only behaves once the
// space is perceptually uniform: rotating an sRGB hue by 180° can land on a
// color that looks twice as bright as where it started. The generator
// therefore picks lightness, chroma and hue in OKLCH and only drops to sRGB
// at the very end, reducing chroma until the color fits the sRGB gamut.
//
// Conversion pipeline:
//
//   OKLCH ↔ Oklab ↔ Linear sRGB ↔ sRGB ↔ #RRGGBB
//                        │
//                        └─► Linear Display-P3 ─► Display-P3
//
// The Oklab matrices are Björn Ottosson's:
// https://bottosson.github.io/posts/oklab/

use std::fmt;

use crate::hex;

// ─── Color ───────────────────────────────────────────────────────────────────

/// An opaque color in OKLCH.
///
/// ```
/// use swatch_color::Color;
///
/// let vivid = Color::oklch(0.7, 0.4, 150.0).to_gamut();
/// assert!(vivid.in_srgb_gamut());
/// assert_eq!(vivid.to_hex().len(), 7);
/// ```
#[derive(Clone, Copy)]
pub struct Color {
    /// Lightness: 0.0 (black) to 1.0 (white).
    pub l: f32,
    /// Chroma: 0.0 (gray) upward; sRGB tops out around 0.32.
    pub c: f32,
    /// Hue angle in degrees, [0, 360).
    pub h: f32,
}

impl Color {
    #[inline]
    #[must_use]
    pub const fn oklch(l: f32, c: f32, h: f32) -> Self {
        Self { l, c, h }
    }

    /// Build from 8-bit sRGB channels.
    #[must_use]
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        let (l, c, h) = srgb_to_oklch(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
        );
        Self { l, c, h }
    }

    #[inline]
    #[must_use]
    pub fn is_achromatic(self) -> bool {
        self.c.abs() < 1e-5
    }

    /// sRGB components clamped to 0.0–1.0.
    #[must_use]
    pub fn to_srgb(self) -> (f32, f32, f32) {
        let (r, g, b) = oklch_to_srgb(self.l, self.c, self.h);
        (r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0))
    }

    #[must_use]
    pub fn to_rgb8(self) -> [u8; 3] {
        let (r, g, b) = self.to_srgb();
        [to_u8(r), to_u8(g), to_u8(b)]
    }

    /// Canonical upper-case `#RRGGBB`.
    #[must_use]
    pub fn to_hex(self) -> String {
        hex::format(self.to_rgb8())
    }

    /// Whether the unclamped sRGB conversion lands inside [0, 1]³.
    #[must_use]
    pub fn in_srgb_gamut(self) -> bool {
        let (r, g, b) = oklch_to_srgb(self.l, self.c, self.h);
        [r, g, b].iter().all(|v| (-GAMUT_EPS..=1.0 + GAMUT_EPS).contains(v))
    }

    /// Reduce chroma until the color fits sRGB, keeping lightness and hue.
    #[must_use]
    pub fn to_gamut(self) -> Self {
        if self.in_srgb_gamut() {
            return self;
        }

        let mut lo: f32 = 0.0;
        let mut hi: f32 = self.c;
        for _ in 0..20 {
            let mid = (lo + hi) * 0.5;
            let candidate = Self { c: mid, ..self };
            if candidate.in_srgb_gamut() {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        Self { c: lo, ..self }
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color::oklch({:.4}, {:.4}, {:.1})", self.l, self.c, self.h)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        const EPS: f32 = 1e-5;
        (self.l - other.l).abs() < EPS
            && (self.c - other.c).abs() < EPS
            && (self.is_achromatic() || other.is_achromatic() || hue_diff(self.h, other.h) < EPS)
    }
}

// ─── Display-P3 ──────────────────────────────────────────────────────────────

/// Re-express an sRGB color in Display-P3 coordinates (0.0–1.0 each).
///
/// sRGB sits entirely inside P3, so this is an exact change of primaries:
/// decode, multiply by the linear sRGB → linear P3 matrix, re-encode. Both
/// spaces share the sRGB transfer curve and the D65 white point.
#[must_use]
pub fn display_p3([r, g, b]: [u8; 3]) -> [f32; 3] {
    let lr = srgb_to_linear(f32::from(r) / 255.0);
    let lg = srgb_to_linear(f32::from(g) / 255.0);
    let lb = srgb_to_linear(f32::from(b) / 255.0);

    let pr = 0.177_538_f32.mul_add(lg, 0.822_462_1 * lr);
    let pg = 0.966_805_8_f32.mul_add(lg, 0.033_194_2 * lr);
    let pb = 0.910_519_9_f32.mul_add(lb, 0.072_397_4_f32.mul_add(lg, 0.017_082_7 * lr));

    [pr, pg, pb].map(|v| linear_to_srgb(v.clamp(0.0, 1.0)))
}

// ─── Hue helpers ─────────────────────────────────────────────────────────────

/// Tolerance for gamut checks; float noise at the cube's faces is not
/// out-of-gamut.
const GAMUT_EPS: f32 = 1e-4;

/// Wrap a hue angle into [0, 360).
#[inline]
#[must_use]
pub fn normalize_hue(h: f32) -> f32 {
    let h = h % 360.0;
    if h < 0.0 { h + 360.0 } else { h }
}

/// Shortest arc between two hues, in degrees.
#[inline]
#[must_use]
pub fn hue_diff(a: f32, b: f32) -> f32 {
    let d = (a - b).abs() % 360.0;
    if d > 180.0 { 360.0 - d } else { d }
}

// ─── OKLCH ↔ Oklab ↔ Linear sRGB ────────────────────────────────────────────

#[inline]
fn oklch_to_oklab_ab(c: f32, h: f32) -> (f32, f32) {
    let h_rad = h.to_radians();
    (c * h_rad.cos(), c * h_rad.sin())
}

#[inline]
fn oklab_ab_to_oklch(a: f32, b: f32) -> (f32, f32) {
    let c = a.hypot(b);
    if c < 1e-8 {
        return (c, 0.0);
    }
    (c, normalize_hue(b.atan2(a).to_degrees()))
}

fn oklab_to_linear_srgb(l_ok: f32, a: f32, b: f32) -> (f32, f32, f32) {
    let l_ = 0.215_803_76f32.mul_add(b, 0.396_337_78f32.mul_add(a, l_ok));
    let m_ = 0.063_854_17f32.mul_add(-b, 0.105_561_346f32.mul_add(-a, l_ok));
    let s_ = 1.291_485_5f32.mul_add(-b, 0.089_484_18f32.mul_add(-a, l_ok));

    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    (
        0.230_969_94f32.mul_add(s, 4.076_741_7f32.mul_add(l, -(3.307_711_6 * m))),
        0.341_319_38f32.mul_add(-s, (-1.268_438f32).mul_add(l, 2.609_757_4 * m)),
        1.707_614_7f32.mul_add(s, (-0.004_196_086_3f32).mul_add(l, -(0.703_418_6 * m))),
    )
}

fn linear_srgb_to_oklab(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let l = 0.051_445_995f32.mul_add(b, 0.412_221_47f32.mul_add(r, 0.536_332_55 * g)).cbrt();
    let m = 0.107_396_96f32.mul_add(b, 0.211_903_5f32.mul_add(r, 0.680_699_5 * g)).cbrt();
    let s = 0.629_978_7f32.mul_add(b, 0.088_302_46f32.mul_add(r, 0.281_718_84 * g)).cbrt();

    (
        0.004_072_047f32.mul_add(-s, 0.210_454_26f32.mul_add(l, 0.793_617_8 * m)),
        0.450_593_7f32.mul_add(s, 1.977_998_5f32.mul_add(l, -(2.428_592_2 * m))),
        0.808_675_77f32.mul_add(-s, 0.025_904_037f32.mul_add(l, 0.782_771_77 * m)),
    )
}

// ─── Transfer curve ──────────────────────────────────────────────────────────

/// Encode a linear component with the sRGB curve (shared by Display-P3).
#[inline]
#[must_use]
pub fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055f32.mul_add(c.powf(1.0 / 2.4), -0.055)
    }
}

/// Decode an sRGB component to linear light (IEC 61966-2-1 threshold).
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn srgb_to_oklch(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let (l, a, b_ok) =
        linear_srgb_to_oklab(srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b));
    let (c, h) = oklab_ab_to_oklch(a, b_ok);
    (l, c, h)
}

fn oklch_to_srgb(l: f32, c: f32, h: f32) -> (f32, f32, f32) {
    let (a, b) = oklch_to_oklab_ab(c, h);
    let (lr, lg, lb) = oklab_to_linear_srgb(l, a, b);
    (linear_to_srgb(lr), linear_to_srgb(lg), linear_to_srgb(lb))
}

#[inline]
fn to_u8(v: f32) -> u8 {
    v.mul_add(255.0, 0.5).clamp(0.0, 255.0) as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────
