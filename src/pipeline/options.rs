use std::{fs::File, io::BufReader, path::Path};

use crate::{
    analysis::{
        background::{BackgroundMode, DEFAULT_TOLERANCE},
        sampler::Margin,
    },
    encode::raster::{DEFAULT_QUALITY, RasterOpts},
    foundation::{
        core::{Color, OutputFormat},
        error::{ConvertError, ConvertResult},
    },
    vector::trace::VectorStrategy,
};

/// Options for a single-image conversion, shared by every image of a batch.
///
/// Deserializes from JSON with every field optional:
///
/// ```json
/// { "format": "svg", "strategy": "run_merge", "margin": { "fixed": 8 } }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertOptions {
    /// Output format.
    pub format: OutputFormat,
    /// JPEG quality in `[0.0, 1.0]`. Not validated; non-finite values use the default.
    pub quality: f32,
    /// Vectorizer strategy for SVG output.
    pub strategy: VectorStrategy,
    /// Number of dominant corner colors treated as background.
    pub background: BackgroundMode,
    /// Corner sampling depth.
    pub margin: Margin,
    /// Strict per-channel background tolerance.
    pub tolerance: u8,
    /// Pass SVG output through the canonicalizer.
    pub canonicalize_svg: bool,
    /// Matte color for JPEG alpha flattening.
    pub matte_rgb: [u8; 3],
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Png,
            quality: DEFAULT_QUALITY,
            strategy: VectorStrategy::default(),
            background: BackgroundMode::default(),
            margin: Margin::default(),
            tolerance: DEFAULT_TOLERANCE,
            canonicalize_svg: true,
            matte_rgb: [255, 255, 255],
        }
    }
}

impl ConvertOptions {
    /// Default options targeting `format`.
    pub fn for_format(format: OutputFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    /// Parse options from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ConvertResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ConvertError::validation(format!("parse options JSON: {e}")))
    }

    /// Parse options from a JSON string.
    pub fn from_json_str(s: &str) -> ConvertResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse options from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ConvertResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ConvertError::validation(format!("open options JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Reject option combinations that cannot produce a meaningful conversion.
    pub fn validate(&self) -> ConvertResult<()> {
        if self.tolerance == 0 {
            return Err(ConvertError::validation(
                "tolerance must be >= 1 (0 would never match any pixel)",
            ));
        }
        if self.margin == Margin::Fixed(0) {
            return Err(ConvertError::validation("fixed margin must be >= 1"));
        }
        Ok(())
    }

    /// Raster encoder parameters derived from these options.
    pub fn raster_opts(&self) -> RasterOpts {
        let [r, g, b] = self.matte_rgb;
        RasterOpts {
            quality: self.quality,
            matte: Color::rgb(r, g, b),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/options.rs"]
mod tests;
