//! Free-form query parsing: classifies user text as empty, hex, RGB triple
//! or invalid.

use crate::color::Color;

/// Multiplier to expand hex color shorthand (e.g., F -> FF)
const HEX_SHORTHAND_MULTIPLIER: u8 = 17;

/// A successfully classified query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    /// Nothing was entered. Callers treat this as "clear the search".
    Empty,
    /// A color to search for.
    Color(Color),
}

/// The query matched neither the hex nor the RGB syntax.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid color. Please enter a valid hex color or RGB values separated by commas.")]
pub struct InvalidColor {
    /// The offending input, kept for diagnostics.
    pub input: String,
}

/// Parse user input.
///
/// Accepts `#rgb`, `#rrggbb` (case-insensitive) and `r, g, b` with each
/// channel a decimal integer in [0, 255]. Surrounding whitespace is ignored.
pub fn parse_query(text: &str) -> Result<Query, InvalidColor> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Query::Empty);
    }

    let parsed = match trimmed.strip_prefix('#') {
        Some(digits) => parse_hex_digits(digits),
        None => parse_rgb_triplet(trimmed),
    };

    match parsed {
        Some(color) => Ok(Query::Color(color)),
        None => {
            log::debug!("rejected query {trimmed:?}");
            Err(InvalidColor {
                input: text.to_string(),
            })
        }
    }
}

/// Parse 3 or 6 hex digits (without the `#`). Shorthand digits are doubled.
fn parse_hex_digits(digits: &str) -> Option<Color> {
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match digits.len() {
        3 => {
            let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).ok();
            Some(Color::new(
                nibble(0)? * HEX_SHORTHAND_MULTIPLIER,
                nibble(1)? * HEX_SHORTHAND_MULTIPLIER,
                nibble(2)? * HEX_SHORTHAND_MULTIPLIER,
            ))
        }
        6 => Color::from_hex(digits).ok(),
        _ => None,
    }
}

/// Parse `r, g, b`. Values above 255 are rejected rather than wrapped.
fn parse_rgb_triplet(text: &str) -> Option<Color> {
    let mut channels = text.split(',').map(|part| {
        let part = part.trim();
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        part.parse::<u8>().ok()
    });

    let r = channels.next()??;
    let g = channels.next()??;
    let b = channels.next()??;
    if channels.next().is_some() {
        return None;
    }
    Some(Color::new(r, g, b))
}
