//! bgconvert removes flat backgrounds from raster images and re-encodes them as PNG, JPEG or a
//! rectangle-based SVG approximation, one image at a time or as an ordered parallel batch.
//!
//! # Pipeline overview
//!
//! 1. **Decode**: encoded bytes -> [`Bitmap`] (straight RGBA8)
//! 2. **Estimate**: corner color frequencies -> [`BackgroundSpec`]
//! 3. **Mask**: pixels within tolerance of the background become fully transparent
//! 4. **Correct**: the masked bitmap is forced back to the input dimensions
//! 5. **Encode**: [`vectorize`] + [`canonicalize_svg`] for SVG, or [`encode_raster`] for PNG/JPEG
//!
//! [`BatchOrchestrator`] fans the pipeline out over many inputs and returns outputs in input
//! order.
//!
//! ```no_run
//! use bgconvert::{BatchMode, BatchOrchestrator, ConvertOptions, OutputFormat};
//!
//! # fn main() -> bgconvert::ConvertResult<()> {
//! let inputs = vec![std::fs::read("a.png").unwrap(), std::fs::read("b.jpg").unwrap()];
//! let opts = ConvertOptions::for_format(OutputFormat::Svg);
//! let orch = BatchOrchestrator::new(None)?;
//! let outputs = orch.convert_batch(&inputs, &opts, BatchMode::Parallel)?;
//! assert_eq!(outputs.len(), 2);
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod analysis;
mod encode;
mod foundation;
mod pipeline;
mod vector;

pub use analysis::background::{
    BackgroundMode, BackgroundSpec, DEFAULT_TOLERANCE, estimate_background,
};
pub use analysis::correct::correct_dimensions;
pub use analysis::mask::{mask_background, mask_background_in_place};
pub use analysis::sampler::{ColorFrequencyTable, DEFAULT_MARGIN, Margin, sample_corners};
pub use encode::raster::{
    DEFAULT_QUALITY, RasterOpts, encode_raster, encode_raster_named, jpeg_quality_percent,
};
pub use foundation::core::{Bitmap, Color, OutputFormat, RasterFormat, Rgba};
pub use foundation::error::{ConvertError, ConvertResult};
pub use pipeline::batch::{BatchMode, BatchOrchestrator};
pub use pipeline::convert::{
    EncodedAsset, convert_image, decode_bitmap, encode_bitmap, remove_background,
};
pub use pipeline::options::ConvertOptions;
pub use vector::canonical::{canonicalize_svg, rasterize_svg};
pub use vector::svg::{vectorize, write_svg};
pub use vector::trace::{PixelRect, VectorPrimitive, VectorStrategy, trace};
