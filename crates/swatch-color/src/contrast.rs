// SPDX-License-Identifier: MIT
//
// WCAG 2.x contrast.
//
// Luminance is computed on the 8-bit channels exactly as WCAG 2.x writes
// it, including its 0.03928 linearization threshold (the sRGB standard uses
// 0.04045; the two curves differ by less than one 8-bit step, but the
// published ratios are computed with WCAG's figure).

/// AA threshold for normal-size text.
pub const AA_NORMAL_TEXT: f64 = 4.5;

pub const WHITE: [u8; 3] = [255, 255, 255];
pub const BLACK: [u8; 3] = [0, 0, 0];

/// Linearize one 8-bit channel.
#[must_use]
pub fn linearize(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.039_28 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance: 0.0 for black, 1.0 for white.
#[must_use]
pub fn relative_luminance([r, g, b]: [u8; 3]) -> f64 {
    0.2126f64.mul_add(linearize(r), 0.7152f64.mul_add(linearize(g), 0.0722 * linearize(b)))
}

/// Contrast between two luminances, lighter over darker. Always ≥ 1.
#[must_use]
pub fn luminance_ratio(a: f64, b: f64) -> f64 {
    let (lighter, darker) = if a >= b { (a, b) } else { (b, a) };
    (lighter + 0.05) / (darker + 0.05)
}

/// WCAG contrast ratio between two colors, in [1, 21].
///
/// Argument order does not matter.
#[must_use]
pub fn contrast_ratio(a: [u8; 3], b: [u8; 3]) -> f64 {
    luminance_ratio(relative_luminance(a), relative_luminance(b))
}
