use crate::catalog::{Palette, PaletteEntry};
use crate::color::Color;

/// Number of matches shown when the caller does not ask for a limit.
pub const DEFAULT_LIMIT: usize = 100;

/// A palette entry ranked against a query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult<'a> {
    pub entry: &'a PaletteEntry,
    /// Euclidean RGB distance to the query. 0 is an exact match.
    pub similarity: f64,
}

/// Rank every palette entry by RGB distance to `query` and keep the closest
/// `limit`. Ties keep palette order.
///
/// This is a linear scan; palettes are around a thousand entries.
pub fn find_closest(query: Color, palette: &Palette, limit: usize) -> Vec<SearchResult<'_>> {
    let mut results: Vec<SearchResult<'_>> = palette
        .entries()
        .iter()
        .map(|entry| SearchResult {
            entry,
            similarity: query.distance(entry.rgb),
        })
        .collect();

    // sort_by is stable, so equal distances stay in source order.
    results.sort_by(|a, b| a.similarity.total_cmp(&b.similarity));
    results.truncate(limit);
    results
}
