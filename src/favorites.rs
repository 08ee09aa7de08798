// SPDX-License-Identifier: MIT
//
// Saved palettes. A favorite is just the ordered hex list; locks and the
// harmony label are not kept. Newest first.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use swatch_harmony::Palette;

/// The favorites list, as stored on disk (a JSON array of hex arrays).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites {
    entries: Vec<Vec<String>>,
}

impl Favorites {
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&[String]> {
        self.entries.get(index).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = &[String]> {
        self.entries.iter().map(Vec::as_slice)
    }

    /// True if some favorite has exactly this palette's colors, in order.
    #[must_use]
    pub fn contains(&self, palette: &Palette) -> bool {
        self.entries.iter().any(|fav| palette.same_hexes(fav))
    }

    /// Add the palette at the front, or remove it if already saved.
    /// Returns `true` when it was added.
    pub fn toggle(&mut self, palette: &Palette) -> bool {
        if self.contains(palette) {
            self.entries.retain(|fav| !palette.same_hexes(fav));
            false
        } else {
            self.entries.insert(0, palette.hexes());
            true
        }
    }

    /// Remove the favorite at `index`.
    pub fn remove(&mut self, index: usize) -> Option<Vec<String>> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    /// Read favorites from `path`. A missing file is an empty list.
    ///
    /// # Errors
    ///
    /// Unreadable file or invalid JSON.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("read favorites {}", path.display()));
            }
        };
        serde_json::from_str(&text).with_context(|| format!("parse favorites {}", path.display()))
    }

    /// Write favorites to `path` as pretty JSON.
    ///
    /// # Errors
    ///
    /// Serialization or write failure.
    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("serialize favorites")?;
        fs::write(path, json).with_context(|| format!("write favorites {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn palette(hexes: &[&str]) -> Palette {
        Palette::import(hexes).unwrap()
    }

    #[test]
    fn toggle_adds_newest_first_then_removes() {
        let a = palette(&["#111111", "#222222"]);
        let b = palette(&["#333333"]);
        let mut favs = Favorites::default();

        assert!(favs.toggle(&a));
        assert!(favs.toggle(&b));
        assert_eq!(favs.get(0), Some(&["#333333".to_string()][..]));
        assert!(favs.contains(&a));

        assert!(!favs.toggle(&a));
        assert!(!favs.contains(&a));
        assert_eq!(favs.len(), 1);
    }

    #[test]
    fn membership_is_ordered_and_ignores_locks() {
        let mut favs = Favorites::default();
        favs.toggle(&palette(&["#111111", "#222222"]));

        let locked = palette(&["#111111", "#222222"]).with_lock_toggled(0).unwrap();
        assert!(favs.contains(&locked));
        assert!(!favs.contains(&palette(&["#222222", "#111111"])));
    }

    #[test]
    fn remove_by_index() {
        let mut favs = Favorites::default();
        favs.toggle(&palette(&["#111111"]));
        assert_eq!(favs.remove(3), None);
        assert_eq!(favs.remove(0), Some(vec!["#111111".to_string()]));
        assert!(favs.is_empty());
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favorites.json");

        let mut favs = Favorites::default();
        favs.toggle(&palette(&["#111111", "#222222"]));
        favs.toggle(&palette(&["#ABCDEF"]));
        favs.save(&path).unwrap();

        let loaded = Favorites::load(&path).unwrap();
        assert_eq!(loaded, favs);
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let favs = Favorites::load(dir.path().join("nope.json")).unwrap();
        assert!(favs.is_empty());
    }

    #[test]
    fn garbage_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favorites.json");
        fs::write(&path, "{ not json").unwrap();
        let err = Favorites::load(&path).unwrap_err();
        assert!(err.to_string().starts_with("parse favorites"), "{err}");
    }
}
