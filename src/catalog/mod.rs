//! The named-color palette: normalized entries, their sources and the loader
//! that owns the in-memory copy.

pub mod loader;
pub mod source;

use crate::color::{Color, Hsl};
use crate::error::{FetchError, Result};

use source::{PaletteSource, RawColor};

/// A named color with every representation precomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    pub name: String,
    /// Canonical lowercase `#rrggbb`.
    pub hex: String,
    pub rgb: Color,
    pub hsl: Hsl,
}

impl PaletteEntry {
    /// Normalize a raw `{color, hex}` record.
    pub fn from_raw(raw: &RawColor) -> Result<Self> {
        let rgb = Color::from_hex(raw.hex.trim()).map_err(|_| FetchError::InvalidEntry {
            name: raw.color.clone(),
            hex: raw.hex.clone(),
        })?;
        Ok(Self {
            name: raw.color.trim().to_string(),
            hex: rgb.to_hex(),
            rgb,
            hsl: rgb.to_hsl(),
        })
    }
}

/// Ordered list of entries in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Normalize every raw record. One bad record fails the whole palette.
    pub fn from_raw(raw: &[RawColor]) -> Result<Self> {
        let entries = raw
            .iter()
            .map(PaletteEntry::from_raw)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fetch from `source` and normalize. This is one full load attempt.
pub fn load_palette(source: &dyn PaletteSource) -> Result<Palette> {
    let raw = source.fetch()?;
    let palette = Palette::from_raw(&raw)?;
    log::info!(
        "loaded {} palette entries from {}",
        palette.len(),
        source.describe()
    );
    Ok(palette)
}
