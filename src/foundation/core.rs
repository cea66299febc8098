use std::str::FromStr;

use crate::foundation::error::{ConvertError, ConvertResult};

/// Opaque RGB color used as an identity key.
///
/// Equality is exact channel equality. Near-equality is a separate concern, see
/// [`Color::within_tolerance`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Pure white, the estimator's fallback when nothing could be sampled.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Construct a color from its channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// `true` when every channel differs from `other` by strictly less than `tolerance`.
    pub fn within_tolerance(self, other: Self, tolerance: u8) -> bool {
        self.r.abs_diff(other.r) < tolerance
            && self.g.abs_diff(other.g) < tolerance
            && self.b.abs_diff(other.b) < tolerance
    }
}

/// One straight-alpha RGBA8 pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel, `0` = fully transparent, `255` = opaque.
    pub a: u8,
}

impl Rgba {
    /// Fully transparent pixel with cleared color channels.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Construct a pixel from its channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque pixel of `color`.
    pub const fn opaque(color: Color) -> Self {
        Self::new(color.r, color.g, color.b, 255)
    }

    /// Color channels without alpha.
    pub fn color(self) -> Color {
        Color::rgb(self.r, self.g, self.b)
    }

    /// `true` when alpha is zero.
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }
}

/// Owned bitmap of straight-alpha RGBA8 pixels, tightly packed and row-major.
///
/// Dimensions never change implicitly: stages that produce a differently sized result must go
/// through [`crate::correct_dimensions`] before handing the bitmap downstream.
///
/// The buffer is always `width * height * 4` bytes long; the constructors are the only way to
/// build one from outside the crate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) data: Vec<u8>,
}

impl Bitmap {
    /// Fully transparent bitmap.
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_pixel(width, height, Rgba::TRANSPARENT)
    }

    /// Bitmap filled with a single pixel value.
    pub fn from_pixel(width: u32, height: u32, px: Rgba) -> Self {
        let len = width as usize * height as usize;
        let mut data = Vec::with_capacity(len * 4);
        for _ in 0..len {
            data.extend_from_slice(&[px.r, px.g, px.b, px.a]);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Wrap raw RGBA8 bytes, validating the buffer length.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> ConvertResult<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(ConvertError::validation(format!(
                "bitmap buffer length {} does not match {width}x{height} rgba8 ({expected})",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Take ownership of an `image` RGBA buffer.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let mut data = img.into_raw();
        // `image` allows trailing bytes past the last pixel
        data.truncate(width as usize * height as usize * 4);
        Self {
            width,
            height,
            data,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Packed RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Give up the bitmap and return its RGBA8 buffer.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// `true` when the buffer length matches the dimensions.
    pub(crate) fn has_valid_buffer(&self) -> bool {
        self.data.len() == self.width as usize * self.height as usize * 4
    }

    /// Copy into an `image` RGBA buffer.
    pub fn to_rgba_image(&self) -> ConvertResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| ConvertError::validation("bitmap buffer does not match its dimensions"))
    }

    /// `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// `true` when the bitmap has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Read the pixel at `(x, y)`.
    ///
    /// Panics when the coordinate is out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        let i = self.offset(x, y);
        Rgba::new(
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        )
    }

    /// Overwrite the pixel at `(x, y)`.
    ///
    /// Panics when the coordinate is out of bounds.
    pub fn put_pixel(&mut self, x: u32, y: u32, px: Rgba) {
        let i = self.offset(x, y);
        self.data[i..i + 4].copy_from_slice(&[px.r, px.g, px.b, px.a]);
    }

    /// Iterate pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgba> + '_ {
        self.data
            .chunks_exact(4)
            .map(|p| Rgba::new(p[0], p[1], p[2], p[3]))
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds for {}x{} bitmap",
            self.width,
            self.height
        );
        (y as usize * self.width as usize + x as usize) * 4
    }
}

/// Raster encodings supported by [`crate::encode_raster`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RasterFormat {
    /// Lossless PNG.
    Png,
    /// Lossy JPEG with a quality factor.
    Jpeg,
}

/// Output format of a conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Lossless PNG with transparency.
    Png,
    /// Lossy JPEG, alpha flattened over a matte color.
    #[serde(alias = "jpg")]
    Jpeg,
    /// SVG built from merged pixel rectangles.
    Svg,
}

impl OutputFormat {
    /// Lowercase format tag, also used as file extension.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Svg => "svg",
        }
    }

    /// Raster encoding for this format, `None` for SVG.
    pub fn raster(self) -> Option<RasterFormat> {
        match self {
            Self::Png => Some(RasterFormat::Png),
            Self::Jpeg => Some(RasterFormat::Jpeg),
            Self::Svg => None,
        }
    }

    /// Parse a format selector as accepted at the external boundary (`png` or `svg` only).
    pub fn parse_boundary(s: &str) -> ConvertResult<Self> {
        match s.parse::<Self>()? {
            Self::Jpeg => Err(ConvertError::unsupported_format(format!(
                "'{s}' is not accepted here (expected 'png' or 'svg')"
            ))),
            other => Ok(other),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "svg" => Ok(Self::Svg),
            _ => Err(ConvertError::unsupported_format(format!(
                "'{s}' (expected png, jpeg, jpg or svg)"
            ))),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
