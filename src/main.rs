// SPDX-License-Identifier: MIT
//
// swatchbook: a terminal palette generator.
//
// This is the binary that wires the crates together:
//
//   swatch-color   → hex parsing, OKLCH math, WCAG contrast, swatches
//   swatch-harmony → harmony rules, generation with locks, trends
//   swatch-history → bounded undo/redo
//
// One command per stdin line flows through:
//
//   stdin → CommandParser → App::run_command → Session action
//         → history commit → render to stdout
//
// Errors from a single command are reported on stderr and the session goes
// on; only startup failures end the process.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use swatch_harmony::{Harmony, Provenance, Snapshot, trending};
use swatchbook::collab::{CannedImage, CannedReply, ImagePayload};
use swatchbook::command::{Command, CommandParser};
use swatchbook::config::Config;
use swatchbook::favorites::Favorites;
use swatchbook::render;
use swatchbook::session::{Session, SessionError};

#[derive(Parser, Debug)]
#[command(about = "Generate, lock and check color palettes from the terminal", version)]
struct Args {
    /// TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed the generator for a reproducible session.
    #[arg(long)]
    seed: Option<u64>,
    /// Swatches per palette (overrides the config).
    #[arg(long)]
    size: Option<usize>,
    /// Favorites JSON file (overrides the config).
    #[arg(long)]
    favorites: Option<PathBuf>,
    /// Trace every history change on stderr.
    #[arg(long, short)]
    verbose: bool,
}

/// What the REPL should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CommandResult {
    /// Done. Optional message for stdout.
    Ok(Option<String>),
    /// Refused. Message for stderr.
    Err(String),
    Quit,
}

impl From<SessionError> for CommandResult {
    fn from(e: SessionError) -> Self {
        Self::Err(e.to_string())
    }
}

struct App {
    session: Session<StdRng>,
    parser: CommandParser,
    swatch_width: usize,
    favorites_path: Option<PathBuf>,
    verbose: bool,
}

impl App {
    /// Run one command, writing any palette output to `out`.
    fn run_command(&mut self, cmd: Command, out: &mut impl Write) -> io::Result<CommandResult> {
        let committed = match cmd {
            Command::New(harmony) => self.session.regenerate(harmony).map(|_| ()),
            Command::Lock(i) => self.session.toggle_lock(i).map(|_| ()),
            Command::Set(i, hex) => self.session.edit(i, &hex).map(|_| ()),
            Command::Move(from, to) => self.session.reorder(from, to).map(|_| ()),
            Command::Import(hexes) => self.session.import(&hexes, Provenance::Image).map(|_| ()),
            Command::Trend(name) => self.session.load_trend(&name).map(|_| ()),
            Command::Load(i) => self.session.load_favorite(i).map(|_| ()),
            Command::Extract(path) => return self.cmd_extract(&path, out),
            Command::Mockup(path, subject) => return Ok(self.cmd_mockup(&path, &subject)),
            Command::Images => return self.cmd_images(out),
            Command::Undo => return self.cmd_step(out, "undo", Session::undo),
            Command::Redo => return self.cmd_step(out, "redo", Session::redo),
            Command::Fav => return Ok(self.cmd_fav()),
            Command::Unfav(i) => return Ok(self.cmd_unfav(i)),
            Command::Favs => return self.cmd_favs(out),
            Command::Contrast(i) => return self.cmd_contrast(i, out),
            Command::Export => return self.cmd_export(out),
            Command::Trends => {
                let names: Vec<_> = trending::trend_names().collect();
                return Ok(CommandResult::Ok(Some(names.join("  "))));
            }
            Command::Harmonies => {
                let names: Vec<_> = Harmony::ALL.iter().map(|h| h.name()).collect();
                return Ok(CommandResult::Ok(Some(names.join("  "))));
            }
            Command::Show => {
                self.show(out)?;
                return Ok(CommandResult::Ok(None));
            }
            Command::Help => return Ok(CommandResult::Ok(Some(HELP.trim_end().to_string()))),
            Command::Quit => return Ok(CommandResult::Quit),
            Command::Usage(msg) => return Ok(CommandResult::Err(msg)),
            Command::Unknown(input) => {
                return Ok(CommandResult::Err(format!("unknown command: {input} (try `help`)")));
            }
        };

        match committed {
            Ok(()) => {
                self.trace("commit");
                self.show(out)?;
                Ok(CommandResult::Ok(None))
            }
            Err(e) => Ok(e.into()),
        }
    }

    /// `undo` / `redo`: silent when there is nowhere to go.
    fn cmd_step(
        &mut self,
        out: &mut impl Write,
        what: &str,
        step: fn(&mut Session<StdRng>) -> Option<&Snapshot>,
    ) -> io::Result<CommandResult> {
        if step(&mut self.session).is_none() {
            return Ok(CommandResult::Ok(Some(format!("nothing to {what}"))));
        }
        self.trace(what);
        self.show(out)?;
        Ok(CommandResult::Ok(None))
    }

    /// `extract PATH`: replay a saved `{ "palette": [...] }` reply.
    fn cmd_extract(&mut self, path: &Path, out: &mut impl Write) -> io::Result<CommandResult> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => return Ok(CommandResult::Err(format!("{}: {e}", path.display()))),
        };
        let reply = CannedReply::new(json);
        match self.session.import_from_image(&reply, &ImagePayload::default()) {
            Ok(_) => {
                self.trace("commit");
                self.show(out)?;
                Ok(CommandResult::Ok(None))
            }
            Err(e) => Ok(e.into()),
        }
    }

    /// `mockup PATH SUBJECT`: record a saved base64 image as a mockup of
    /// the current palette.
    fn cmd_mockup(&mut self, path: &Path, subject: &str) -> CommandResult {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) => return CommandResult::Err(format!("{}: {e}", path.display())),
        };
        match self.session.generate_mockup(&CannedImage::new(data), subject, None) {
            Ok(image) => CommandResult::Ok(Some(format!("mockup {}: {}", image.id, image.prompt))),
            Err(e) => e.into(),
        }
    }

    fn cmd_images(&self, out: &mut impl Write) -> io::Result<CommandResult> {
        if self.session.images().is_empty() {
            return Ok(CommandResult::Ok(Some("no mockups yet".into())));
        }
        for (i, image) in self.session.images().iter().enumerate() {
            writeln!(out, "{:>2} {}  {}", i + 1, image.id, image.prompt)?;
        }
        Ok(CommandResult::Ok(None))
    }

    // Favorites commands keep memory and disk in step: a failed save puts
    // the previous list back.

    fn cmd_fav(&mut self) -> CommandResult {
        let before = self.session.favorites().clone();
        let added = self.session.toggle_favorite();
        if let Err(e) = self.save_favorites() {
            self.session.replace_favorites(before);
            return CommandResult::Err(format!("{e:#}"));
        }
        let msg = if added { "saved to favorites" } else { "removed from favorites" };
        CommandResult::Ok(Some(msg.into()))
    }

    fn cmd_unfav(&mut self, index: usize) -> CommandResult {
        let before = self.session.favorites().clone();
        if let Err(e) = self.session.delete_favorite(index) {
            return e.into();
        }
        if let Err(e) = self.save_favorites() {
            self.session.replace_favorites(before);
            return CommandResult::Err(format!("{e:#}"));
        }
        CommandResult::Ok(Some(format!("deleted favorite {}", index + 1)))
    }

    fn cmd_favs(&self, out: &mut impl Write) -> io::Result<CommandResult> {
        if self.session.favorites().is_empty() {
            return Ok(CommandResult::Ok(Some("no favorites yet".into())));
        }
        for (i, hexes) in self.session.favorites().iter().enumerate() {
            writeln!(out, "{:>2} {}", i + 1, hexes.join(" "))?;
        }
        Ok(CommandResult::Ok(None))
    }

    fn cmd_contrast(&self, base: usize, out: &mut impl Write) -> io::Result<CommandResult> {
        match self.session.contrast_against(base) {
            Ok(ratios) => {
                render::contrast_table(out, self.session.palette(), base, &ratios)?;
                Ok(CommandResult::Ok(None))
            }
            Err(e) => Ok(e.into()),
        }
    }

    fn cmd_export(&self, out: &mut impl Write) -> io::Result<CommandResult> {
        match serde_json::to_string_pretty(self.session.current()) {
            Ok(json) => {
                writeln!(out, "{json}")?;
                Ok(CommandResult::Ok(None))
            }
            Err(e) => Ok(CommandResult::Err(format!("export: {e}"))),
        }
    }

    fn save_favorites(&self) -> anyhow::Result<()> {
        match &self.favorites_path {
            Some(path) => self.session.favorites().save(path),
            None => Ok(()),
        }
    }

    fn show(&self, out: &mut impl Write) -> io::Result<()> {
        render::snapshot(
            out,
            self.session.current(),
            self.swatch_width,
            self.session.is_favorite(),
        )
    }

    fn trace(&self, what: &str) {
        if self.verbose {
            let harmony = self.session.current().harmony.map_or("none", |h| h.name());
            eprintln!(
                "swatchbook: {what} harmony={harmony} past={} future={}",
                self.session.undo_count(),
                self.session.redo_count()
            );
        }
    }
}

const HELP: &str = "\
new [harmony]   regenerate, keeping locked swatches (alias: space)
lock N          toggle the lock on swatch N
set N HEX       replace swatch N
move FROM TO    move a swatch
import TEXT     import every #RRGGBB found in TEXT
extract PATH    import a saved extraction reply ({\"palette\": [...]})
mockup PATH SUBJECT  record a saved base64 image as a mockup      images  list them
trend NAME      load a curated palette      trends     list them
harmonies       list harmony rules
fav             save/unsave the current palette
favs            list favorites   load N   unfav N
contrast N      contrast of every swatch against swatch N
export          print the current palette as JSON
undo / redo     step through history
show / help / quit
";

fn build_app(args: Args) -> anyhow::Result<App> {
    let mut config = match &args.config {
        Some(path) => {
            let (config, warning) = Config::load_or_default(path);
            if let Some(warning) = warning {
                eprintln!("swatchbook: {warning}; using defaults");
            }
            config
        }
        None => Config::default(),
    };
    if let Some(size) = args.size {
        config.palette.size = size;
    }
    if let Some(path) = args.favorites {
        config.favorites.path = Some(path);
    }
    for warning in config.validate() {
        eprintln!("swatchbook: warning: {warning}");
    }

    let rng = args
        .seed
        .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    let favorites = match &config.favorites.path {
        Some(path) => Favorites::load(path)?,
        None => Favorites::default(),
    };
    let session = Session::new(config.palette.size, config.history.depth, rng)
        .context("start session")?
        .with_favorites(favorites);

    Ok(App {
        session,
        parser: CommandParser::new().context("compile hex pattern")?,
        swatch_width: config.render.swatch_width,
        favorites_path: config.favorites.path,
        verbose: args.verbose,
    })
}

fn repl(app: &mut App) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    app.show(&mut out)?;
    writeln!(out, "Type 'help' for commands. 'quit' to exit.")?;

    let stdin = io::stdin();
    let mut lines = stdin.lock();
    loop {
        write!(out, "swatchbook> ")?;
        out.flush()?;

        let mut line = String::new();
        if lines.read_line(&mut line)? == 0 {
            // EOF (Ctrl+D)
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let cmd = app.parser.parse(&line);
        match app.run_command(cmd, &mut out)? {
            CommandResult::Ok(Some(msg)) => writeln!(out, "{msg}")?,
            CommandResult::Ok(None) => {}
            CommandResult::Err(msg) => eprintln!("swatchbook: {msg}"),
            CommandResult::Quit => break,
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    let result = build_app(args).and_then(|mut app| repl(&mut app));
    if let Err(e) = result {
        eprintln!("swatchbook: {e:#}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use swatch_color::Swatch;
    use swatch_harmony::HarmonyLabel;

    use super::*;

    fn app(favorites_path: Option<PathBuf>) -> App {
        sized_app(5, favorites_path)
    }

    fn sized_app(size: usize, favorites_path: Option<PathBuf>) -> App {
        App {
            session: Session::new(size, 3, StdRng::seed_from_u64(42)).unwrap(),
            parser: CommandParser::new().unwrap(),
            swatch_width: 12,
            favorites_path,
            verbose: false,
        }
    }

    /// Run `line` and return the result plus whatever was printed.
    fn run(app: &mut App, line: &str) -> (CommandResult, String) {
        let mut out = Vec::new();
        let cmd = app.parser.parse(line);
        let result = app.run_command(cmd, &mut out).unwrap();
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn lock_then_new_keeps_the_swatch() {
        let mut a = app(None);
        let first = a.session.palette().get(0).cloned().unwrap();

        let (result, printed) = run(&mut a, "lock 1");
        assert_eq!(result, CommandResult::Ok(None));
        assert!(printed.starts_with("harmony: "));

        run(&mut a, "new triadic");
        let kept = a.session.palette().get(0).unwrap();
        assert_eq!(kept.hex(), first.hex());
        assert!(kept.is_locked());
        assert_eq!(
            a.session.current().harmony,
            Some(HarmonyLabel::Rule(Harmony::Triadic))
        );
    }

    #[test]
    fn import_then_undo_redo() {
        let mut a = app(None);
        let before = a.session.current().clone();

        run(&mut a, "import logo uses #1982C4, #FF595E and #FFCA3A");
        assert_eq!(a.session.current().harmony, Some(HarmonyLabel::Imported));
        assert_eq!(a.session.palette().len(), 3);

        run(&mut a, "undo");
        assert_eq!(a.session.current(), &before);
        let (result, _) = run(&mut a, "undo");
        assert_eq!(result, CommandResult::Ok(Some("nothing to undo".into())));

        run(&mut a, "redo");
        assert_eq!(a.session.palette().len(), 3);
    }

    #[test]
    fn import_keeps_only_palette_size_colors() {
        let mut a = app(None);
        let (result, _) = run(&mut a, "import #000001 #000002 #000003 #000004 #000005 #000006 #000007");
        assert_eq!(result, CommandResult::Ok(None));
        assert_eq!(a.session.palette().len(), 5);
        assert_eq!(a.session.palette().get(4).map(Swatch::hex), Some("#000005"));
    }

    #[test]
    fn extract_keeps_only_palette_size_colors() {
        let dir = tempfile::tempdir().unwrap();
        let reply = dir.path().join("reply.json");
        fs::write(
            &reply,
            r##"{"palette": ["#000001", "#000002", "#000003", "#000004", "#000005"]}"##,
        )
        .unwrap();

        let mut a = sized_app(3, None);
        run(&mut a, &format!("extract {}", reply.display()));
        assert!(a.session.palette().same_hexes(&["#000001", "#000002", "#000003"]));
    }

    #[test]
    fn errors_are_reported_not_fatal() {
        let mut a = app(None);
        let before = a.session.current().clone();

        let (result, printed) = run(&mut a, "set 9 #000000");
        assert_eq!(result, CommandResult::Err("no swatch 9".into()));
        assert!(printed.is_empty());

        let (result, _) = run(&mut a, "set 1 #00000");
        assert!(matches!(result, CommandResult::Err(msg) if msg.starts_with("invalid color")));

        let (result, _) = run(&mut a, "frobnicate");
        assert!(matches!(result, CommandResult::Err(_)));
        assert_eq!(a.session.current(), &before);
    }

    #[test]
    fn extract_reads_a_saved_reply() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("reply.json");
        fs::write(&good, r##"{"palette": ["#111111", "#222222", "#333333"]}"##).unwrap();
        let bad = dir.path().join("bad.json");
        fs::write(&bad, r#"{"palette": []}"#).unwrap();

        let mut a = app(None);
        let (result, _) = run(&mut a, &format!("extract {}", good.display()));
        assert_eq!(result, CommandResult::Ok(None));
        assert_eq!(a.session.current().harmony, Some(HarmonyLabel::Imported));
        assert!(a.session.palette().same_hexes(&["#111111", "#222222", "#333333"]));

        let (result, _) = run(&mut a, &format!("extract {}", bad.display()));
        assert_eq!(result, CommandResult::Err("extraction reply contained no colors".into()));
        let (result, _) = run(&mut a, &format!("extract {}", dir.path().join("nope").display()));
        assert!(matches!(result, CommandResult::Err(_)));
    }

    #[test]
    fn favorites_persist_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favorites.json");
        let mut a = app(Some(path.clone()));

        let (result, _) = run(&mut a, "fav");
        assert_eq!(result, CommandResult::Ok(Some("saved to favorites".into())));
        let saved = Favorites::load(&path).unwrap();
        assert!(saved.contains(a.session.palette()));

        let (_, listed) = run(&mut a, "favs");
        assert!(listed.starts_with(" 1 #"));

        run(&mut a, "new");
        run(&mut a, "load 1");
        assert!(a.session.is_favorite());
        assert_eq!(a.session.current().harmony, None);

        run(&mut a, "unfav 1");
        assert!(Favorites::load(&path).unwrap().is_empty());
        let (result, _) = run(&mut a, "unfav 1");
        assert_eq!(result, CommandResult::Err("no favorite 1".into()));
    }

    #[test]
    fn failed_favorites_save_is_rolled_back() {
        // A directory cannot be written as a file.
        let dir = tempfile::tempdir().unwrap();
        let mut a = app(Some(dir.path().to_path_buf()));

        let (result, _) = run(&mut a, "fav");
        assert!(matches!(result, CommandResult::Err(_)));
        assert!(a.session.favorites().is_empty());
        assert!(!a.session.is_favorite());

        a.session.toggle_favorite();
        let (result, _) = run(&mut a, "unfav 1");
        assert!(matches!(result, CommandResult::Err(_)));
        assert_eq!(a.session.favorites().len(), 1);
    }

    #[test]
    fn mockup_replays_a_saved_image() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("poster.b64");
        fs::write(&image, "iVBORw0KGgo=\n").unwrap();
        let empty = dir.path().join("empty.b64");
        fs::write(&empty, "").unwrap();

        let mut a = app(None);
        let (_, listed) = run(&mut a, "images");
        assert!(listed.is_empty());

        let (result, _) = run(&mut a, &format!("mockup {} a jazz poster", image.display()));
        let first_hex = a.session.palette().get(0).map(|s| s.hex().to_string()).unwrap();
        assert!(
            matches!(&result, CommandResult::Ok(Some(msg)) if msg.contains("a jazz poster") && msg.contains(&first_hex)),
            "{result:?}"
        );
        assert_eq!(a.session.images().len(), 1);
        assert_eq!(a.session.images()[0].data, "iVBORw0KGgo=");
        assert!(!a.session.can_undo());

        let (result, _) = run(&mut a, &format!("mockup {} a mug", empty.display()));
        assert_eq!(result, CommandResult::Err("no image was generated".into()));
        let (_, listed) = run(&mut a, "images");
        assert!(listed.starts_with(" 1 "));
        assert_eq!(listed.lines().count(), 1);
    }

    #[test]
    fn trend_and_lists() {
        let mut a = app(None);
        run(&mut a, "trend ocean");
        assert_eq!(a.session.current().harmony, Some(HarmonyLabel::Trending));

        let (result, _) = run(&mut a, "trends");
        assert!(matches!(result, CommandResult::Ok(Some(s)) if s.contains("ocean")));
        let (result, _) = run(&mut a, "harmonies");
        assert!(matches!(result, CommandResult::Ok(Some(s)) if s.contains("split-complementary")));
    }

    #[test]
    fn export_is_camel_case_json() {
        let mut a = app(None);
        run(&mut a, "set 1 #ffffff");
        let (_, printed) = run(&mut a, "export");
        let json: serde_json::Value = serde_json::from_str(&printed).unwrap();

        let first = &json["palette"][0];
        assert_eq!(first["hex"], "#FFFFFF");
        assert_eq!(first["isLocked"], false);
        assert_eq!(first["wcagBlackCompliant"], true);
        assert_eq!(first["isCompliant"], true);
        assert!(json["harmony"].is_string());
    }

    #[test]
    fn contrast_and_move() {
        let mut a = app(None);
        run(&mut a, "import #000000 #FFFFFF");
        let (_, printed) = run(&mut a, "contrast 1");
        assert!(printed.starts_with("contrast against 1 (#000000):"));

        run(&mut a, "move 2 1");
        assert_eq!(a.session.palette().get(0).map(Swatch::hex), Some("#FFFFFF"));
    }

    #[test]
    fn quit() {
        let mut a = app(None);
        assert_eq!(run(&mut a, "quit").0, CommandResult::Quit);
    }
}
