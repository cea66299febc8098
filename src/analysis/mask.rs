use rayon::prelude::*;

use crate::{
    analysis::background::BackgroundSpec,
    foundation::core::{Bitmap, Color},
};

/// Bitmaps with at least this many pixels are classified in parallel.
const PARALLEL_PIXEL_THRESHOLD: usize = 32 * 1024;

/// Make background pixels fully transparent.
///
/// A pixel is background when its RGB is within tolerance of any color in `spec`; it becomes
/// `[0, 0, 0, 0]`. Every other pixel is copied unchanged, alpha included. The result always has
/// the dimensions of `src`.
pub fn mask_background(src: &Bitmap, spec: &BackgroundSpec) -> Bitmap {
    let mut out = src.clone();
    mask_background_in_place(&mut out, spec);
    out
}

/// In-place form of [`mask_background`].
pub fn mask_background_in_place(bitmap: &mut Bitmap, spec: &BackgroundSpec) {
    let classify = |px: &mut [u8]| {
        if spec.matches(Color::rgb(px[0], px[1], px[2])) {
            px.fill(0);
        }
    };

    let len = bitmap.width as usize * bitmap.height as usize;
    if len >= PARALLEL_PIXEL_THRESHOLD {
        bitmap.data.par_chunks_exact_mut(4).for_each(classify);
    } else {
        bitmap.data.chunks_exact_mut(4).for_each(classify);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/analysis/mask.rs"]
mod tests;
