//! Plain-text table for non-interactive output.

use std::io::{self, Write};

use crossterm::style::{Color as TermColor, Stylize};

use crate::app::Row;

/// Write one line per row: swatch, name, hex, RGB, HSL and (when searching)
/// the distance. `styled` controls whether the swatch gets an ANSI background.
pub fn write_table<W: Write>(out: &mut W, rows: &[Row<'_>], styled: bool) -> io::Result<()> {
    let name_width = rows
        .iter()
        .map(|r| r.entry.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Name".len());

    writeln!(
        out,
        "{:<4} {:<name_width$}  {:<7}  {:<13}  {:<14}{}",
        "",
        "Name",
        "Hex",
        "RGB",
        "HSL",
        if rows.iter().any(|r| r.similarity.is_some()) {
            "  Distance"
        } else {
            ""
        }
    )?;

    for row in rows {
        let entry = row.entry;
        let swatch = if styled {
            "    "
                .on(TermColor::Rgb {
                    r: entry.rgb.r,
                    g: entry.rgb.g,
                    b: entry.rgb.b,
                })
                .to_string()
        } else {
            "    ".to_string()
        };
        write!(
            out,
            "{swatch} {:<name_width$}  {:<7}  {:<13}  {:<14}",
            entry.name,
            entry.hex,
            entry.rgb.to_rgb_string(),
            entry.hsl.to_string(),
        )?;
        match row.similarity {
            Some(distance) => writeln!(out, "  {distance:>8.2}")?,
            None => writeln!(out)?,
        }
    }
    Ok(())
}
