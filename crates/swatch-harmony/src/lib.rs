//! # swatch-harmony: palette generation engine
//!
//! Produces new palettes from old ones. Locked swatches pass through
//! untouched; every other position is filled from a hue relationship
//! anchored on the first locked swatch (or on a random hue when nothing is
//! locked).
//!
//! # Architecture
//!
//! ```text
//! current Palette + Option<Harmony> + size + &mut Rng
//!     │
//!     ▼
//! harmony.rs:  hue offsets per rule, labels incl. provenance
//!     │
//!     ▼
//! generate.rs: OKLCH lightness/chroma per slot, gamut map, materialize
//!     │
//!     ▼
//! palette.rs:  Palette / Snapshot values, direct edits and imports
//! ```
//!
//! Curated palettes for the "trending" view live in [`trending`].
//!
//! Randomness is always passed in. Nothing here owns an RNG, so a seeded
//! `StdRng` reproduces any generation exactly.

// Slot indices and palette sizes are small; casting them to f32 is exact.
#![allow(clippy::cast_precision_loss)]

pub mod generate;
pub mod harmony;
pub mod palette;
pub mod trending;

pub use generate::{ConfigurationError, Generated, generate};
pub use harmony::{Harmony, HarmonyLabel, Provenance};
pub use palette::{Palette, PaletteError, Snapshot};
