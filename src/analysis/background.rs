use crate::{
    analysis::sampler::{Margin, sample_corners},
    foundation::core::{Bitmap, Color},
};

/// Per-channel tolerance used by every background mode.
pub const DEFAULT_TOLERANCE: u8 = 30;

/// How many dominant corner colors count as background.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundMode {
    /// The single most frequent corner color.
    #[default]
    Single,
    /// The two most frequent corner colors (two-tone or gradient borders).
    Dual,
}

impl BackgroundMode {
    fn color_count(self) -> usize {
        match self {
            Self::Single => 1,
            Self::Dual => 2,
        }
    }
}

/// Background colors plus the tolerance used to match them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackgroundSpec {
    /// One or two colors, most frequent first.
    pub colors: Vec<Color>,
    /// Strict per-channel tolerance, see [`Color::within_tolerance`].
    pub tolerance: u8,
}

impl BackgroundSpec {
    /// Background made of a single known color.
    pub fn single(color: Color, tolerance: u8) -> Self {
        Self {
            colors: vec![color],
            tolerance,
        }
    }

    /// `true` when `color` is within tolerance of any background color.
    pub fn matches(&self, color: Color) -> bool {
        self.colors
            .iter()
            .any(|bg| color.within_tolerance(*bg, self.tolerance))
    }
}

/// Estimate the background of `bitmap` from its corner squares.
///
/// Falls back to white when nothing can be sampled. In [`BackgroundMode::Dual`] a bitmap with a
/// single corner color yields a one-color spec.
pub fn estimate_background(
    bitmap: &Bitmap,
    margin: Margin,
    mode: BackgroundMode,
    tolerance: u8,
) -> BackgroundSpec {
    let table = sample_corners(bitmap, margin);
    let mut colors: Vec<Color> = table
        .top(mode.color_count())
        .into_iter()
        .map(|(color, _)| color)
        .collect();
    if colors.is_empty() {
        colors.push(Color::WHITE);
    }

    tracing::debug!(
        sampled = table.total(),
        distinct = table.len(),
        background = ?colors,
        "estimated background"
    );

    BackgroundSpec { colors, tolerance }
}

#[cfg(test)]
#[path = "../../tests/unit/analysis/background.rs"]
mod tests;
