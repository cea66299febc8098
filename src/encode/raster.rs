use std::io::Cursor;

use image::{
    ExtendedColorType, ImageEncoder,
    codecs::{jpeg::JpegEncoder, png::PngEncoder},
};

use crate::foundation::{
    core::{Bitmap, Color, OutputFormat, RasterFormat},
    error::{ConvertError, ConvertResult},
};

/// Quality factor used when none (or a non-finite one) is given.
pub const DEFAULT_QUALITY: f32 = 0.8;

/// Raster encoding parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RasterOpts {
    /// JPEG quality in `[0.0, 1.0]`; ignored for PNG.
    pub quality: f32,
    /// Color that transparent pixels are flattened onto for JPEG.
    pub matte: Color,
}

impl Default for RasterOpts {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            matte: Color::WHITE,
        }
    }
}

/// Map a `[0.0, 1.0]` quality factor to the encoder's `1..=100` scale.
///
/// Out-of-range values are clamped; non-finite values fall back to [`DEFAULT_QUALITY`].
pub fn jpeg_quality_percent(quality: f32) -> u8 {
    let q = if quality.is_finite() {
        quality
    } else {
        tracing::debug!(quality, "non-finite jpeg quality, using default");
        DEFAULT_QUALITY
    };
    ((q.clamp(0.0, 1.0) * 100.0).round() as u8).max(1)
}

/// Encode `bitmap` as PNG (lossless, with alpha) or JPEG (lossy, alpha flattened).
pub fn encode_raster(
    bitmap: &Bitmap,
    format: RasterFormat,
    opts: RasterOpts,
) -> ConvertResult<Vec<u8>> {
    if !bitmap.has_valid_buffer() {
        return Err(ConvertError::encode(format!(
            "bitmap buffer length {} does not match {}x{} rgba8",
            bitmap.data.len(),
            bitmap.width,
            bitmap.height
        )));
    }

    let mut buf = Cursor::new(Vec::new());
    match format {
        RasterFormat::Png => PngEncoder::new(&mut buf)
            .write_image(
                &bitmap.data,
                bitmap.width,
                bitmap.height,
                ExtendedColorType::Rgba8,
            )
            .map_err(|e| ConvertError::encode(format!("png: {e}")))?,
        RasterFormat::Jpeg => {
            let rgb = flatten_over_matte(bitmap, opts.matte);
            JpegEncoder::new_with_quality(&mut buf, jpeg_quality_percent(opts.quality))
                .write_image(&rgb, bitmap.width, bitmap.height, ExtendedColorType::Rgb8)
                .map_err(|e| ConvertError::encode(format!("jpeg: {e}")))?
        }
    }
    Ok(buf.into_inner())
}

/// Encode `bitmap` to the raster format named by `format` (`png`, `jpeg` or `jpg`).
pub fn encode_raster_named(
    bitmap: &Bitmap,
    format: &str,
    opts: RasterOpts,
) -> ConvertResult<Vec<u8>> {
    let parsed: OutputFormat = format.parse()?;
    let raster = parsed.raster().ok_or_else(|| {
        ConvertError::unsupported_format(format!("'{format}' is not a raster format"))
    })?;
    encode_raster(bitmap, raster, opts)
}

/// Composite straight-alpha RGBA8 over an opaque matte, producing packed RGB8.
fn flatten_over_matte(bitmap: &Bitmap, matte: Color) -> Vec<u8> {
    let (mr, mg, mb) = (matte.r as u16, matte.g as u16, matte.b as u16);
    let mut rgb = Vec::with_capacity(bitmap.data.len() / 4 * 3);
    for s in bitmap.data.chunks_exact(4) {
        let a = s[3] as u16;
        if a == 255 {
            rgb.extend_from_slice(&s[..3]);
            continue;
        }
        let inv = 255 - a;
        rgb.push((mul_div255(s[0] as u16, a) + mul_div255(mr, inv)).min(255) as u8);
        rgb.push((mul_div255(s[1] as u16, a) + mul_div255(mg, inv)).min(255) as u8);
        rgb.push((mul_div255(s[2] as u16, a) + mul_div255(mb, inv)).min(255) as u8);
    }
    rgb
}

fn mul_div255(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/encode/raster.rs"]
mod tests;
