use crate::{
    analysis::{
        background::{BackgroundSpec, estimate_background},
        correct::correct_dimensions,
        mask::mask_background,
    },
    encode::raster::encode_raster,
    foundation::{
        core::{Bitmap, OutputFormat},
        error::{ConvertError, ConvertResult},
    },
    pipeline::options::ConvertOptions,
    vector::{canonical::canonicalize_svg, svg::vectorize},
};

/// Encoded output of one conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedAsset {
    /// Format the bytes are encoded in.
    pub format: OutputFormat,
    /// Encoded bytes.
    pub bytes: Vec<u8>,
}

impl EncodedAsset {
    /// Archive entry name for the asset at 0-based batch position `index`: `image<N>.<format>`,
    /// with `N` 1-indexed.
    pub fn entry_name(&self, index: usize) -> String {
        format!("image{}.{}", index + 1, self.format.as_str())
    }
}

/// Decode encoded image bytes (any format `image` supports) into a straight-alpha bitmap.
pub fn decode_bitmap(bytes: &[u8]) -> ConvertResult<Bitmap> {
    if bytes.is_empty() {
        return Err(ConvertError::decode("input is empty"));
    }
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| ConvertError::decode(format!("decode image from memory: {e}")))?;
    Ok(Bitmap::from_rgba_image(dyn_img.to_rgba8()))
}

/// Estimate the background of `src`, mask it out and restore the original dimensions.
pub fn remove_background(src: &Bitmap, opts: &ConvertOptions) -> ConvertResult<Bitmap> {
    let spec: BackgroundSpec =
        estimate_background(src, opts.margin, opts.background, opts.tolerance);
    let masked = mask_background(src, &spec);
    correct_dimensions(masked, src.width, src.height)
}

/// Encode an already masked bitmap to `opts.format`.
pub fn encode_bitmap(bitmap: &Bitmap, opts: &ConvertOptions) -> ConvertResult<EncodedAsset> {
    let bytes = match opts.format.raster() {
        Some(raster) => encode_raster(bitmap, raster, opts.raster_opts())?,
        None => {
            let svg = vectorize(bitmap, opts.strategy)?;
            if opts.canonicalize_svg {
                canonicalize_svg(svg.as_bytes())?
            } else {
                svg.into_bytes()
            }
        }
    };
    Ok(EncodedAsset {
        format: opts.format,
        bytes,
    })
}

/// Run the full single-image pipeline: decode, remove background, encode.
#[tracing::instrument(skip_all, fields(input_bytes = bytes.len(), format = %opts.format))]
pub fn convert_image(bytes: &[u8], opts: &ConvertOptions) -> ConvertResult<EncodedAsset> {
    let src = decode_bitmap(bytes)?;
    let masked = remove_background(&src, opts)?;
    let asset = encode_bitmap(&masked, opts)?;
    tracing::debug!(
        width = src.width,
        height = src.height,
        output_bytes = asset.bytes.len(),
        "converted image"
    );
    Ok(asset)
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/convert.rs"]
mod tests;
