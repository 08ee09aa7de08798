// SPDX-License-Identifier: MIT
//
// Session commands, one per input line.
//
// | Command              | Action                                        |
// |----------------------|-----------------------------------------------|
// | `new [harmony]`      | Regenerate (alias `space`)                    |
// | `lock N`             | Toggle the lock on swatch N                   |
// | `set N HEX`          | Replace swatch N                              |
// | `move FROM TO`       | Move a swatch                                 |
// | `import TEXT`        | Import every `#RRGGBB` found in TEXT          |
// | `extract PATH`       | Import a saved extraction reply               |
// | `mockup PATH SUBJECT`| Record a saved base64 image as a mockup       |
// | `images`             | List recorded mockups                         |
// | `trend NAME`         | Load a curated palette                        |
// | `trends`             | List curated palettes                         |
// | `harmonies`          | List harmony rules                            |
// | `fav` / `favs`       | Toggle / list favorites                       |
// | `load N` / `unfav N` | Load / delete favorite N                      |
// | `contrast N`         | Contrast of every swatch against swatch N     |
// | `export`             | Print the current snapshot as JSON            |
// | `undo` / `redo`      | Step through history                          |
// | `show`               | Reprint the palette                           |
// | `help` / `quit`      |                                               |
//
// Positions are 1-based for the user and converted to 0-based here.

use std::path::PathBuf;

use regex::Regex;
use swatch_harmony::{Harmony, HarmonyLabel};

/// A parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    New(Option<Harmony>),
    Lock(usize),
    Set(usize, String),
    Move(usize, usize),
    Import(Vec<String>),
    Extract(PathBuf),
    /// Saved image path, then the subject for the prompt.
    Mockup(PathBuf, String),
    Images,
    Trend(String),
    Trends,
    Harmonies,
    Fav,
    Favs,
    Load(usize),
    Unfav(usize),
    Contrast(usize),
    Export,
    Undo,
    Redo,
    Show,
    Help,
    Quit,
    /// A known command with bad arguments; holds the message to show.
    Usage(String),
    /// Not a command at all; holds the input.
    Unknown(String),
}

/// Turns input lines into [`Command`]s.
#[derive(Debug, Clone)]
pub struct CommandParser {
    hex: Regex,
}

impl CommandParser {
    /// # Errors
    ///
    /// Only if the hex-token pattern fails to compile.
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            hex: Regex::new(r"(?:#|\b)([0-9A-Fa-f]{6})\b")?,
        })
    }

    /// Every six-digit hex token in `text`, `#`-prefixed, in order.
    #[must_use]
    pub fn hex_tokens(&self, text: &str) -> Vec<String> {
        self.hex
            .captures_iter(text)
            .map(|c| format!("#{}", &c[1]))
            .collect()
    }

    /// Parse one input line.
    #[must_use]
    pub fn parse(&self, input: &str) -> Command {
        let trimmed = input.trim();
        let (cmd, arg) = trimmed
            .find(char::is_whitespace)
            .map_or((trimmed, ""), |pos| (&trimmed[..pos], trimmed[pos..].trim_start()));

        match cmd.to_lowercase().as_str() {
            "new" | "space" => parse_new(arg),
            "lock" => position(arg).map_or_else(Command::Usage, Command::Lock),
            "set" => parse_set(arg),
            "move" => parse_move(arg),
            "import" => {
                let hexes = self.hex_tokens(arg);
                if hexes.is_empty() {
                    Command::Usage("import: no #RRGGBB colors found".into())
                } else {
                    Command::Import(hexes)
                }
            }
            "extract" if !arg.is_empty() => Command::Extract(PathBuf::from(arg)),
            "extract" => Command::Usage("extract: expected a path".into()),
            "mockup" => parse_mockup(arg),
            "images" => Command::Images,
            "trend" if !arg.is_empty() => Command::Trend(arg.to_string()),
            "trend" => Command::Usage("trend: expected a name (see `trends`)".into()),
            "trends" => Command::Trends,
            "harmonies" => Command::Harmonies,
            "fav" => Command::Fav,
            "favs" => Command::Favs,
            "load" => position(arg).map_or_else(Command::Usage, Command::Load),
            "unfav" => position(arg).map_or_else(Command::Usage, Command::Unfav),
            "contrast" => position(arg).map_or_else(Command::Usage, Command::Contrast),
            "export" => Command::Export,
            "undo" | "u" => Command::Undo,
            "redo" | "r" => Command::Redo,
            "show" | "" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => Command::Unknown(trimmed.to_string()),
        }
    }
}

fn parse_new(arg: &str) -> Command {
    if arg.is_empty() {
        return Command::New(None);
    }
    match HarmonyLabel::from_name(arg) {
        Some(HarmonyLabel::Rule(h)) => Command::New(Some(h)),
        Some(label) => Command::Usage(format!("new: {label} is a palette origin, not a harmony")),
        None => Command::Usage(format!("new: unknown harmony {arg:?} (see `harmonies`)")),
    }
}

fn parse_mockup(arg: &str) -> Command {
    match arg.split_once(char::is_whitespace) {
        Some((path, subject)) if !subject.trim().is_empty() => {
            Command::Mockup(PathBuf::from(path), subject.trim().to_string())
        }
        _ => Command::Usage("mockup: expected PATH SUBJECT".into()),
    }
}

fn parse_set(arg: &str) -> Command {
    let mut parts = arg.split_whitespace();
    match (parts.next().map(position), parts.next(), parts.next()) {
        (Some(Ok(i)), Some(hex), None) => Command::Set(i, hex.to_string()),
        (Some(Err(e)), _, _) => Command::Usage(e),
        _ => Command::Usage("set: expected N HEX".into()),
    }
}

fn parse_move(arg: &str) -> Command {
    let mut parts = arg.split_whitespace();
    match (parts.next().map(position), parts.next().map(position), parts.next()) {
        (Some(Ok(from)), Some(Ok(to)), None) => Command::Move(from, to),
        (Some(Err(e)), _, _) | (_, Some(Err(e)), _) => Command::Usage(e),
        _ => Command::Usage("move: expected FROM TO".into()),
    }
}

/// A 1-based position typed by the user, as a 0-based index.
fn position(arg: &str) -> Result<usize, String> {
    match arg.trim().parse::<usize>() {
        Ok(0) => Err("positions start at 1".into()),
        Ok(n) => Ok(n - 1),
        Err(_) if arg.trim().is_empty() => Err("expected a position".into()),
        Err(_) => Err(format!("not a position: {:?}", arg.trim())),
    }
}
