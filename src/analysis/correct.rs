use image::imageops::{self, FilterType};

use crate::foundation::{
    core::Bitmap,
    error::{ConvertError, ConvertResult},
};

/// Guarantee that `bitmap` has the `width x height` of the original input.
///
/// Matching bitmaps are returned untouched. A mismatch is resampled (nearest neighbour) onto a
/// new canvas of the original size; a correct masker never takes that path.
pub fn correct_dimensions(bitmap: Bitmap, width: u32, height: u32) -> ConvertResult<Bitmap> {
    if bitmap.dimensions() == (width, height) {
        return Ok(bitmap);
    }

    tracing::warn!(
        from_width = bitmap.width,
        from_height = bitmap.height,
        to_width = width,
        to_height = height,
        "masked bitmap changed size, resampling to original dimensions"
    );

    if bitmap.is_empty() || width == 0 || height == 0 {
        return Ok(Bitmap::new(width, height));
    }

    let src = bitmap.to_rgba_image().map_err(|e| {
        ConvertError::validation(format!("dimension correction on invalid bitmap: {e}"))
    })?;
    let resized = imageops::resize(&src, width, height, FilterType::Nearest);
    Ok(Bitmap::from_rgba_image(resized))
}

#[cfg(test)]
#[path = "../../tests/unit/analysis/correct.rs"]
mod tests;
