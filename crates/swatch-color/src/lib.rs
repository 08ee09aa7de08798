// SPDX-License-Identifier: MIT
//
// swatch-color: the color model behind swatchbook.
//
// Every palette entry starts life as a hex string. This crate turns that
// string into a `Swatch`: the canonical hex, its rgb() and Display-P3
// renderings, and the WCAG contrast figures against white and black text.
// Everything a swatch carries is derived from its hex, so two swatches with
// the same hex are interchangeable (apart from the lock flag).
//
// The generator works in OKLCH instead of raw RGB, so the perceptual
// `Color` type lives here too:
//
//   hex ─► hex::parse ─► [u8; 3] ─┬─► contrast (WCAG luminance, ratios)
//                                 ├─► color::display_p3
//                                 └─► Color (OKLCH) ◄─► generator math

// Single-char math variables are standard in color science.
#![allow(clippy::many_single_char_names)]
// Channel math casts between u8, u32 and f32 on purpose.
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#![allow(clippy::similar_names)]

pub mod color;
pub mod contrast;
pub mod hex;
pub mod swatch;

pub use color::Color;
pub use contrast::{AA_NORMAL_TEXT, contrast_ratio, relative_luminance};
pub use hex::ColorFormatError;
pub use swatch::{Overlay, Swatch};
