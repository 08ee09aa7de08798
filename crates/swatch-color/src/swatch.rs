// SPDX-License-Identifier: MIT
//
// Swatch: one palette entry with its accessibility annotations.

use std::fmt;

use serde::Serialize;

use crate::color::{self, Color};
use crate::contrast::{self, AA_NORMAL_TEXT};
use crate::hex::{self, ColorFormatError};

/// Which plain text color reads best on top of a swatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Overlay {
    White,
    Black,
}

impl Overlay {
    #[must_use]
    pub const fn rgb(self) -> [u8; 3] {
        match self {
            Self::White => contrast::WHITE,
            Self::Black => contrast::BLACK,
        }
    }
}

/// A palette entry.
///
/// The hex string is the only real input; rgb, P3 and every WCAG figure are
/// computed from it once in [`Swatch::materialize`] and never change. The
/// lock flag is the one piece of user state and the only thing that can be
/// modified after construction.
///
/// Serializes with camelCase keys (`isLocked`, `wcagWhiteCompliant`, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Swatch {
    hex: String,
    rgb: String,
    p3: String,
    is_locked: bool,
    wcag_white: f64,
    wcag_black: f64,
    wcag_white_compliant: bool,
    wcag_black_compliant: bool,
    is_compliant: bool,
    #[serde(skip)]
    channels: [u8; 3],
}

impl Swatch {
    /// Build a swatch from a hex string.
    ///
    /// # Errors
    ///
    /// Returns [`ColorFormatError`] unless `hex` is exactly six hex digits
    /// with an optional leading `#`.
    pub fn materialize(hex: &str, is_locked: bool) -> Result<Self, ColorFormatError> {
        hex::parse(hex).map(|channels| Self::from_rgb8(channels, is_locked))
    }

    /// Build a swatch from channels that are already known to be valid.
    #[must_use]
    pub fn from_rgb8(channels: [u8; 3], is_locked: bool) -> Self {
        let [r, g, b] = channels;
        let [pr, pg, pb] = color::display_p3(channels);

        let luminance = contrast::relative_luminance(channels);
        let wcag_white = contrast::luminance_ratio(luminance, 1.0);
        let wcag_black = contrast::luminance_ratio(luminance, 0.0);
        let wcag_white_compliant = wcag_white >= AA_NORMAL_TEXT;
        let wcag_black_compliant = wcag_black >= AA_NORMAL_TEXT;

        Self {
            hex: hex::format(channels),
            rgb: format!("rgb({r}, {g}, {b})"),
            p3: format!("color(display-p3 {pr:.4} {pg:.4} {pb:.4})"),
            is_locked,
            wcag_white,
            wcag_black,
            wcag_white_compliant,
            wcag_black_compliant,
            is_compliant: wcag_white_compliant || wcag_black_compliant,
            channels,
        }
    }

    /// Canonical upper-case `#RRGGBB`.
    #[inline]
    #[must_use]
    pub fn hex(&self) -> &str {
        &self.hex
    }

    /// `rgb(r, g, b)`.
    #[inline]
    #[must_use]
    pub fn rgb(&self) -> &str {
        &self.rgb
    }

    /// `color(display-p3 r g b)`.
    #[inline]
    #[must_use]
    pub fn p3(&self) -> &str {
        &self.p3
    }

    #[inline]
    #[must_use]
    pub const fn channels(&self) -> [u8; 3] {
        self.channels
    }

    #[inline]
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.is_locked
    }

    #[inline]
    #[must_use]
    pub const fn wcag_white(&self) -> f64 {
        self.wcag_white
    }

    #[inline]
    #[must_use]
    pub const fn wcag_black(&self) -> f64 {
        self.wcag_black
    }

    #[inline]
    #[must_use]
    pub const fn wcag_white_compliant(&self) -> bool {
        self.wcag_white_compliant
    }

    #[inline]
    #[must_use]
    pub const fn wcag_black_compliant(&self) -> bool {
        self.wcag_black_compliant
    }

    /// True when white or black text (or both) passes AA on this swatch.
    #[inline]
    #[must_use]
    pub const fn is_compliant(&self) -> bool {
        self.is_compliant
    }

    /// Same color with the lock flag set to `locked`.
    #[must_use]
    pub fn with_lock(self, locked: bool) -> Self {
        Self { is_locked: locked, ..self }
    }

    pub fn toggle_lock(&mut self) {
        self.is_locked = !self.is_locked;
    }

    /// The swatch in OKLCH, for hue-relative generation.
    #[must_use]
    pub fn to_color(&self) -> Color {
        let [r, g, b] = self.channels;
        Color::rgb8(r, g, b)
    }

    /// WCAG contrast between this swatch and another.
    #[must_use]
    pub fn contrast_with(&self, other: &Self) -> f64 {
        contrast::contrast_ratio(self.channels, other.channels)
    }

    /// The overlay text color with the higher contrast. Ties go to white.
    #[must_use]
    pub fn overlay_text(&self) -> Overlay {
        if self.wcag_white >= self.wcag_black {
            Overlay::White
        } else {
            Overlay::Black
        }
    }
}

impl fmt::Display for Swatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex)?;
        if self.is_locked {
            f.write_str(" (locked)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn hex_is_normalized() {
        let s = Swatch::materialize("1982c4", false).unwrap();
        assert_eq!(s.hex(), "#1982C4");
        assert_eq!(s.rgb(), "rgb(25, 130, 196)");
    }

    #[test]
    fn materialize_is_idempotent() {
        for input in ["#1982c4", "ff595e", "#FFCA3A", "8Ac926", "#000000", "#ffffff"] {
            let first = Swatch::materialize(input, false).unwrap();
            let second = Swatch::materialize(first.hex(), false).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn lock_flag_is_carried() {
        assert!(Swatch::materialize("#123456", true).unwrap().is_locked());
        assert!(!Swatch::materialize("#123456", false).unwrap().is_locked());
    }

    #[test]
    fn invalid_hex_fails() {
        assert_eq!(Swatch::materialize("#12345", false), Err(ColorFormatError::InvalidLength(5)));
        assert_eq!(Swatch::materialize("", true), Err(ColorFormatError::Empty));
    }

    #[test]
    fn white_swatch_figures() {
        let s = Swatch::materialize("#FFFFFF", false).unwrap();
        assert!(approx_eq(s.wcag_white(), 1.0, 1e-9));
        assert!(approx_eq(s.wcag_black(), 21.0, 1e-9));
        assert!(!s.wcag_white_compliant());
        assert!(s.wcag_black_compliant());
        assert!(s.is_compliant());
        assert_eq!(s.overlay_text(), Overlay::Black);
    }

    #[test]
    fn black_swatch_figures() {
        let s = Swatch::materialize("#000000", false).unwrap();
        assert!(approx_eq(s.wcag_white(), 21.0, 1e-9));
        assert!(approx_eq(s.wcag_black(), 1.0, 1e-9));
        assert!(s.wcag_white_compliant());
        assert!(!s.wcag_black_compliant());
        assert_eq!(s.overlay_text(), Overlay::White);
    }

    #[test]
    fn ratios_are_at_least_one() {
        for hex in ["#1982C4", "#FF595E", "#FFCA3A", "#8AC926", "#6A4C93", "#777777"] {
            let s = Swatch::materialize(hex, false).unwrap();
            assert!(s.wcag_white() >= 1.0 && s.wcag_black() >= 1.0, "{hex}");
        }
    }

    #[test]
    fn compliance_is_either_direction() {
        // #777777 fails on white (4.48) but passes on black.
        let s = Swatch::materialize("#777777", false).unwrap();
        assert!(!s.wcag_white_compliant());
        assert!(s.wcag_black_compliant());
        assert!(s.is_compliant());
    }

    #[test]
    fn white_p3_string() {
        let s = Swatch::materialize("#FFFFFF", false).unwrap();
        assert_eq!(s.p3(), "color(display-p3 1.0000 1.0000 1.0000)");
        let s = Swatch::materialize("#000000", false).unwrap();
        assert_eq!(s.p3(), "color(display-p3 0.0000 0.0000 0.0000)");
    }

    #[test]
    fn p3_string_shape() {
        let s = Swatch::materialize("#FF595E", false).unwrap();
        let inner = s.p3().strip_prefix("color(display-p3 ").and_then(|r| r.strip_suffix(')')).unwrap();
        let parts: Vec<f64> = inner.split(' ').map(|p| p.parse().unwrap()).collect();
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn with_lock_keeps_everything_else() {
        let s = Swatch::materialize("#8AC926", false).unwrap();
        let locked = s.clone().with_lock(true);
        assert!(locked.is_locked());
        assert_eq!(locked.with_lock(false), s);
    }

    #[test]
    fn toggle_lock_flips() {
        let mut s = Swatch::materialize("#8AC926", false).unwrap();
        s.toggle_lock();
        assert!(s.is_locked());
        s.toggle_lock();
        assert!(!s.is_locked());
    }

    #[test]
    fn contrast_with_is_symmetric() {
        let a = Swatch::materialize("#1982C4", false).unwrap();
        let b = Swatch::materialize("#FFCA3A", false).unwrap();
        assert!(approx_eq(a.contrast_with(&b), b.contrast_with(&a), 1e-12));
        assert!(approx_eq(a.contrast_with(&a), 1.0, 1e-12));
    }

    #[test]
    fn to_color_round_trips() {
        let s = Swatch::materialize("#6A4C93", false).unwrap();
        assert_eq!(s.to_color().to_hex(), "#6A4C93");
    }

    #[test]
    fn serializes_with_camel_case() {
        let s = Swatch::materialize("#FFFFFF", true).unwrap();
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["hex"], "#FFFFFF");
        assert_eq!(json["isLocked"], true);
        assert_eq!(json["wcagBlackCompliant"], true);
        assert_eq!(json["wcagWhiteCompliant"], false);
        assert_eq!(json["isCompliant"], true);
        assert!(json.get("channels").is_none());
    }

    #[test]
    fn display_marks_locked() {
        let s = Swatch::materialize("#1982c4", true).unwrap();
        assert_eq!(s.to_string(), "#1982C4 (locked)");
    }
}
