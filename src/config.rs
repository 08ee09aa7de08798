// SPDX-License-Identifier: MIT
//
// `swatchbook.toml`: every section and field is optional and falls back to
// its default, so an empty file is a valid config.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use swatch_history::DEFAULT_CAPACITY;

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub palette: PaletteConfig,
    pub history: HistoryConfig,
    pub favorites: FavoritesConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Swatches per palette.
    pub size: usize,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self { size: 5 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// How many steps `undo` can go back.
    pub depth: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct FavoritesConfig {
    /// Where favorites are persisted. `None` keeps them in memory only.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Characters per swatch cell.
    pub swatch_width: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { swatch_width: 12 }
    }
}

/// Narrowest cell that still fits a `#RRGGBB` label with padding.
pub const MIN_SWATCH_WIDTH: usize = 8;

impl Config {
    /// Parse a config file.
    ///
    /// # Errors
    ///
    /// A message naming the read or parse failure.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .map_err(|e| format!("read config {}: {e}", path.display()))?;
        toml::from_str(&data).map_err(|e| format!("parse config {}: {e}", path.display()))
    }

    /// Parse a config file, or fall back to defaults with the reason.
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Human-readable problems with the values. Empty means all good.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.palette.size == 0 {
            w.push("palette.size is 0; palettes need at least one swatch".into());
        }
        if self.history.depth == 0 {
            w.push("history.depth is 0; undo is disabled".into());
        }
        if self.render.swatch_width < MIN_SWATCH_WIDTH {
            w.push(format!(
                "render.swatch_width {} is below {MIN_SWATCH_WIDTH}; hex labels will be cut",
                self.render.swatch_width
            ));
        }
        w
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.palette.size, 5);
        assert_eq!(cfg.history.depth, 3);
        assert_eq!(cfg.favorites.path, None);
        assert_eq!(cfg.render.swatch_width, 12);
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn empty_file_is_default() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let sample = r#"
            [palette]
            size = 7

            [favorites]
            path = "favs.json"
        "#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(sample.as_bytes()).unwrap();

        let cfg = Config::load_from_file(file.path()).unwrap();
        assert_eq!(cfg.palette.size, 7);
        assert_eq!(cfg.favorites.path, Some(PathBuf::from("favs.json")));
        assert_eq!(cfg.history, HistoryConfig::default());
        assert_eq!(cfg.render, RenderConfig::default());
    }

    #[test]
    fn missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let (cfg, warning) = Config::load_or_default(dir.path().join("swatchbook.toml"));
        assert_eq!(cfg, Config::default());
        assert!(warning.is_some_and(|w| w.starts_with("read config")));
    }

    #[test]
    fn malformed_file_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[palette]\nsize = \"five\"\n").unwrap();
        let (cfg, warning) = Config::load_or_default(file.path());
        assert_eq!(cfg, Config::default());
        assert!(warning.is_some_and(|w| w.starts_with("parse config")));
    }

    #[test]
    fn validate_detects_warnings() {
        let mut cfg = Config::default();
        cfg.palette.size = 0;
        cfg.history.depth = 0;
        cfg.render.swatch_width = 4;
        let w = cfg.validate();
        assert_eq!(w.len(), 3, "{w:?}");
        assert!(w[2].contains("swatch_width 4"));
    }
}
