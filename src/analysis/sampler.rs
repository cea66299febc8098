use std::collections::HashMap;

use crate::foundation::core::{Bitmap, Color};

/// Corner margin used when none is configured.
pub const DEFAULT_MARGIN: u32 = 5;

/// Depth of the corner squares sampled for background estimation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Margin {
    /// Fixed depth in pixels.
    Fixed(u32),
    /// One tenth of the shorter side.
    Proportional,
}

impl Default for Margin {
    fn default() -> Self {
        Self::Fixed(DEFAULT_MARGIN)
    }
}

impl Margin {
    /// Margin actually sampled for a `width x height` bitmap.
    ///
    /// Clamped to half the shorter side (at least 1) so corner squares never leave the bitmap.
    /// Empty bitmaps yield `0`.
    pub fn resolve(self, width: u32, height: u32) -> u32 {
        let short = width.min(height);
        if short == 0 {
            return 0;
        }
        let requested = match self {
            Self::Fixed(m) => m,
            Self::Proportional => short / 10,
        };
        requested.clamp(1, (short / 2).max(1))
    }
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    color: Color,
    count: u32,
}

/// Occurrence counts of exact colors, remembering first-seen order.
///
/// Ranking ties are broken by first occurrence, so results are deterministic for a given
/// sampling order.
#[derive(Clone, Debug, Default)]
pub struct ColorFrequencyTable {
    slots: HashMap<Color, usize>,
    entries: Vec<Entry>,
}

impl ColorFrequencyTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `color`.
    pub fn add(&mut self, color: Color) {
        match self.slots.get(&color) {
            Some(&i) => self.entries[i].count += 1,
            None => {
                self.slots.insert(color, self.entries.len());
                self.entries.push(Entry { color, count: 1 });
            }
        }
    }

    /// Occurrences recorded for `color`.
    pub fn count(&self, color: Color) -> u32 {
        self.slots
            .get(&color)
            .map(|&i| self.entries[i].count)
            .unwrap_or(0)
    }

    /// Number of distinct colors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nothing was sampled.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of samples.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.count)).sum()
    }

    /// The `k` most frequent colors, highest count first, ties by first occurrence.
    pub fn top(&self, k: usize) -> Vec<(Color, u32)> {
        let mut ranked = self.entries.clone();
        // stable: equal counts keep insertion order
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked
            .into_iter()
            .take(k)
            .map(|e| (e.color, e.count))
            .collect()
    }
}

/// Count colors in the four `margin x margin` corner squares of `bitmap`.
///
/// Each step of the scan visits the mirrored position in all four corners (top-left,
/// top-right, bottom-left, bottom-right). Alpha is ignored for identity.
pub fn sample_corners(bitmap: &Bitmap, margin: Margin) -> ColorFrequencyTable {
    let mut table = ColorFrequencyTable::new();
    let (width, height) = bitmap.dimensions();
    let m = margin.resolve(width, height);

    for y in 0..m {
        for x in 0..m {
            let right = width - 1 - x;
            let bottom = height - 1 - y;
            table.add(bitmap.pixel(x, y).color());
            table.add(bitmap.pixel(right, y).color());
            table.add(bitmap.pixel(x, bottom).color());
            table.add(bitmap.pixel(right, bottom).color());
        }
    }
    table
}

#[cfg(test)]
#[path = "../../tests/unit/analysis/sampler.rs"]
mod tests;
