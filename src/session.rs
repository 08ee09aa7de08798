// SPDX-License-Identifier: MIT
//
// The palette session: one current snapshot, its undo history, favorites,
// and the mockups generated so far.
//
// Every accepted action builds a complete new snapshot and commits it
// exactly once. Undo and redo move through history without committing.
// A failing action returns its error before touching any state.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use swatch_color::ColorFormatError;
use swatch_harmony::{
    ConfigurationError, Harmony, Palette, PaletteError, Provenance, Snapshot, generate, trending,
};
use swatch_history::History;

use crate::collab::{
    ExtractionError, GeneratedImage, GenerationError, ImagePayload, MockupGenerator,
    PaletteExtractor, mockup_prompt,
};
use crate::favorites::Favorites;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// An action the session refused. State is unchanged when one is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    Color(ColorFormatError),
    Configuration(ConfigurationError),
    Extraction(ExtractionError),
    Generation(GenerationError),
    /// 0-based swatch index past the end of the palette.
    NoSuchSwatch(usize),
    /// 0-based favorites index past the end of the list.
    NoSuchFavorite(usize),
    UnknownTrend(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color(e) => write!(f, "invalid color: {e}"),
            Self::Configuration(e) => write!(f, "{e}"),
            Self::Extraction(e) => write!(f, "{e}"),
            Self::Generation(e) => write!(f, "{e}"),
            Self::NoSuchSwatch(i) => write!(f, "no swatch {}", i + 1),
            Self::NoSuchFavorite(i) => write!(f, "no favorite {}", i + 1),
            Self::UnknownTrend(name) => write!(f, "no trending palette named {name:?}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Color(e) => Some(e),
            Self::Configuration(e) => Some(e),
            Self::Extraction(e) => Some(e),
            Self::Generation(e) => Some(e),
            Self::NoSuchSwatch(_) | Self::NoSuchFavorite(_) | Self::UnknownTrend(_) => None,
        }
    }
}

impl From<ColorFormatError> for SessionError {
    fn from(e: ColorFormatError) -> Self {
        Self::Color(e)
    }
}

impl From<ConfigurationError> for SessionError {
    fn from(e: ConfigurationError) -> Self {
        Self::Configuration(e)
    }
}

impl From<ExtractionError> for SessionError {
    fn from(e: ExtractionError) -> Self {
        Self::Extraction(e)
    }
}

impl From<GenerationError> for SessionError {
    fn from(e: GenerationError) -> Self {
        Self::Generation(e)
    }
}

impl From<PaletteError> for SessionError {
    fn from(e: PaletteError) -> Self {
        match e {
            PaletteError::NoSuchSwatch { index, .. } => Self::NoSuchSwatch(index),
            PaletteError::Color(e) => Self::Color(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Palette state plus everything hanging off it.
#[derive(Debug)]
pub struct Session<R> {
    history: History<Snapshot>,
    favorites: Favorites,
    images: Vec<GeneratedImage>,
    size: usize,
    rng: R,
    next_image: u64,
}

impl<R: Rng> Session<R> {
    /// Start with a freshly generated palette of `size` swatches. The first
    /// palette is not an undo step.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError`] when `size` is zero.
    pub fn new(size: usize, depth: usize, mut rng: R) -> Result<Self, ConfigurationError> {
        let first = generate(&Palette::default(), None, size, &mut rng)?;
        Ok(Self {
            history: History::with_capacity(first.into_snapshot(), depth),
            favorites: Favorites::default(),
            images: Vec::new(),
            size,
            rng,
            next_image: 0,
        })
    }

    #[must_use]
    pub fn with_favorites(mut self, favorites: Favorites) -> Self {
        self.favorites = favorites;
        self
    }

    // ── Queries ─────────────────────────────────────────────

    #[must_use]
    pub const fn current(&self) -> &Snapshot {
        self.history.current()
    }

    #[must_use]
    pub const fn palette(&self) -> &Palette {
        &self.history.current().palette
    }

    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    #[must_use]
    pub fn undo_count(&self) -> usize {
        self.history.undo_count()
    }

    #[must_use]
    pub fn redo_count(&self) -> usize {
        self.history.redo_count()
    }

    #[must_use]
    pub const fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    #[must_use]
    pub fn is_favorite(&self) -> bool {
        self.favorites.contains(self.palette())
    }

    /// Generated mockups, newest first.
    #[must_use]
    pub fn images(&self) -> &[GeneratedImage] {
        &self.images
    }

    /// Contrast ratio of every swatch against the one at `base`.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoSuchSwatch`] for a bad index.
    pub fn contrast_against(&self, base: usize) -> Result<Vec<f64>, SessionError> {
        let palette = self.palette();
        let base = palette.get(base).ok_or(SessionError::NoSuchSwatch(base))?;
        Ok(palette.iter().map(|s| s.contrast_with(base)).collect())
    }

    // ── Actions ─────────────────────────────────────────────

    /// Generate the next palette, keeping locked swatches.
    ///
    /// # Errors
    ///
    /// Only [`SessionError::Configuration`], which `new` already rules out.
    pub fn regenerate(&mut self, harmony: Option<Harmony>) -> Result<&Snapshot, SessionError> {
        let next = generate(&self.history.current().palette, harmony, self.size, &mut self.rng)?;
        Ok(self.commit(next.into_snapshot()))
    }

    /// Flip the lock on swatch `index`.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoSuchSwatch`].
    pub fn toggle_lock(&mut self, index: usize) -> Result<&Snapshot, SessionError> {
        let palette = self.palette().with_lock_toggled(index)?;
        let next = self.current().with_palette(palette);
        Ok(self.commit(next))
    }

    /// Replace swatch `index` with `hex`, keeping its lock.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoSuchSwatch`] or [`SessionError::Color`].
    pub fn edit(&mut self, index: usize, hex: &str) -> Result<&Snapshot, SessionError> {
        let palette = self.palette().with_swatch(index, hex)?;
        let next = self.current().with_palette(palette);
        Ok(self.commit(next))
    }

    /// Move swatch `from` to position `to`.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoSuchSwatch`] for either index.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<&Snapshot, SessionError> {
        let palette = self.palette().reordered(from, to)?;
        let next = self.current().with_palette(palette);
        Ok(self.commit(next))
    }

    /// Replace the palette with outside colors, all unlocked. Colors past
    /// the palette size are dropped.
    ///
    /// # Errors
    ///
    /// [`SessionError::Color`] on the first malformed hex that is kept.
    pub fn import<S: AsRef<str>>(
        &mut self,
        hexes: &[S],
        provenance: Provenance,
    ) -> Result<&Snapshot, SessionError> {
        let kept = &hexes[..hexes.len().min(self.size)];
        let next = Snapshot::imported(kept, provenance)?;
        Ok(self.commit(next))
    }

    /// Ask `extractor` for the image's colors and import them.
    ///
    /// # Errors
    ///
    /// [`SessionError::Extraction`] from the extractor, or
    /// [`SessionError::Color`] if it returned a malformed hex.
    pub fn import_from_image<E: PaletteExtractor + ?Sized>(
        &mut self,
        extractor: &E,
        image: &ImagePayload,
    ) -> Result<&Snapshot, SessionError> {
        let hexes = extractor.extract(image)?;
        self.import(&hexes, Provenance::Image)
    }

    /// Load a curated trending palette by name.
    ///
    /// # Errors
    ///
    /// [`SessionError::UnknownTrend`].
    pub fn load_trend(&mut self, name: &str) -> Result<&Snapshot, SessionError> {
        let trend = trending::trend(name).ok_or_else(|| SessionError::UnknownTrend(name.into()))?;
        let next = trend.snapshot()?;
        Ok(self.commit(next))
    }

    /// Load favorite `index`. The result carries no harmony label.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoSuchFavorite`], or [`SessionError::Color`] for a
    /// corrupt saved entry.
    pub fn load_favorite(&mut self, index: usize) -> Result<&Snapshot, SessionError> {
        let hexes = self
            .favorites
            .get(index)
            .ok_or(SessionError::NoSuchFavorite(index))?;
        let next = Snapshot::new(Palette::import(hexes)?, None);
        Ok(self.commit(next))
    }

    /// Swap in a whole favorites list, returning the old one.
    pub fn replace_favorites(&mut self, favorites: Favorites) -> Favorites {
        std::mem::replace(&mut self.favorites, favorites)
    }

    /// Save the current palette as a favorite, or unsave it if it already
    /// is one. Returns `true` when it was saved. Not an undo step.
    pub fn toggle_favorite(&mut self) -> bool {
        self.favorites.toggle(&self.history.current().palette)
    }

    /// Remove favorite `index` and return its colors.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoSuchFavorite`].
    pub fn delete_favorite(&mut self, index: usize) -> Result<Vec<String>, SessionError> {
        self.favorites
            .remove(index)
            .ok_or(SessionError::NoSuchFavorite(index))
    }

    /// Step back. `None` (and nothing changes) when there is no past.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        self.history.undo()
    }

    /// Step forward. `None` (and nothing changes) when there is no future.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        self.history.redo()
    }

    /// Render a mockup in the current colors and record it.
    ///
    /// # Errors
    ///
    /// [`SessionError::Generation`]; an empty payload counts as
    /// [`GenerationError::NoImage`].
    pub fn generate_mockup<G: MockupGenerator + ?Sized>(
        &mut self,
        generator: &G,
        subject: &str,
        reference: Option<&ImagePayload>,
    ) -> Result<&GeneratedImage, SessionError> {
        let prompt = mockup_prompt(self.palette(), subject);
        let data = generator.generate(&prompt, reference)?;
        if data.is_empty() {
            return Err(GenerationError::NoImage.into());
        }

        let timestamp = now_millis();
        self.next_image += 1;
        self.images.insert(
            0,
            GeneratedImage {
                id: format!("{timestamp}-{}", self.next_image),
                prompt,
                data,
                timestamp,
            },
        );
        Ok(&self.images[0])
    }

    fn commit(&mut self, next: Snapshot) -> &Snapshot {
        self.history.commit(next);
        self.history.current()
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}
