//! Raster encoders.

/// PNG and JPEG encoding of bitmaps.
pub mod raster;
