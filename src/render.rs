// SPDX-License-Identifier: MIT
//
// Terminal output for palettes.
//
// Each swatch is a 24-bit background cell labeled in whichever of white or
// black reads better on it, followed by one detail line per swatch. Writers
// take any `impl Write` so tests can render into a Vec.

use std::io::{self, Write};

use swatch_color::{AA_NORMAL_TEXT, Swatch};
use swatch_harmony::{Palette, Snapshot};

/// Set a 24-bit foreground color.
#[inline]
pub fn fg(w: &mut impl Write, [r, g, b]: [u8; 3]) -> io::Result<()> {
    write!(w, "\x1b[38;2;{r};{g};{b}m")
}

/// Set a 24-bit background color.
#[inline]
pub fn bg(w: &mut impl Write, [r, g, b]: [u8; 3]) -> io::Result<()> {
    write!(w, "\x1b[48;2;{r};{g};{b}m")
}

/// Reset all SGR attributes.
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

/// One colored cell, `width` characters wide, labeled with the hex (and a
/// lock marker when locked).
pub fn swatch_cell(w: &mut impl Write, swatch: &Swatch, width: usize) -> io::Result<()> {
    let label = if swatch.is_locked() {
        format!("{}*", swatch.hex())
    } else {
        swatch.hex().to_string()
    };
    let label: String = label.chars().take(width).collect();

    bg(w, swatch.channels())?;
    fg(w, swatch.overlay_text().rgb())?;
    write!(w, "{label:^width$}")?;
    reset(w)
}

/// The whole row of cells on one line.
pub fn palette_row(w: &mut impl Write, palette: &Palette, width: usize) -> io::Result<()> {
    for swatch in palette {
        swatch_cell(w, swatch, width)?;
    }
    writeln!(w)
}

fn mark(ok: bool) -> &'static str {
    if ok { "AA" } else { "--" }
}

/// `N  #RRGGBB  rgb(..)  color(display-p3 ..)  white x.xx AA  black y.yy --`
pub fn swatch_details(w: &mut impl Write, index: usize, swatch: &Swatch) -> io::Result<()> {
    writeln!(
        w,
        "{:>2} {} {}  {:<18} {}  white {:>5.2} {}  black {:>5.2} {}",
        index + 1,
        if swatch.is_locked() { "L" } else { " " },
        swatch.hex(),
        swatch.rgb(),
        swatch.p3(),
        swatch.wcag_white(),
        mark(swatch.wcag_white_compliant()),
        swatch.wcag_black(),
        mark(swatch.wcag_black_compliant()),
    )
}

/// Header, cells, then details for every swatch.
pub fn snapshot(
    w: &mut impl Write,
    snap: &Snapshot,
    width: usize,
    favorite: bool,
) -> io::Result<()> {
    let label = snap.harmony.map_or("none", |h| h.name());
    writeln!(
        w,
        "harmony: {label}{}",
        if favorite { "  (favorite)" } else { "" }
    )?;
    palette_row(w, &snap.palette, width)?;
    for (i, swatch) in snap.palette.iter().enumerate() {
        swatch_details(w, i, swatch)?;
    }
    Ok(())
}

/// Ratio of every swatch against swatch `base`, flagging AA passes.
pub fn contrast_table(
    w: &mut impl Write,
    palette: &Palette,
    base: usize,
    ratios: &[f64],
) -> io::Result<()> {
    let base_hex = palette.get(base).map_or("?", Swatch::hex);
    writeln!(w, "contrast against {} ({base_hex}):", base + 1)?;
    for (i, (swatch, ratio)) in palette.iter().zip(ratios).enumerate() {
        let verdict = if i == base {
            "base"
        } else if *ratio >= AA_NORMAL_TEXT {
            "AA"
        } else {
            "--"
        };
        writeln!(w, "{:>2} {}  {ratio:>5.2}  {verdict}", i + 1, swatch.hex())?;
    }
    Ok(())
}
