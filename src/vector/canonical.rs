use crate::foundation::{
    core::Bitmap,
    error::{ConvertError, ConvertResult},
};

/// Re-serialize an SVG document into normalized markup via `usvg`.
///
/// Malformed or empty input is a [`ConvertError::Transcode`]; the document is never dropped
/// silently.
pub fn canonicalize_svg(svg: &[u8]) -> ConvertResult<Vec<u8>> {
    let tree = parse_tree(svg)?;
    let write_opts = usvg::WriteOptions::default();
    Ok(tree.to_string(&write_opts).into_bytes())
}

/// Render an SVG document at its intrinsic size into a straight-alpha bitmap.
///
/// Used to check that vectorized output reproduces the bitmap it was traced from.
pub fn rasterize_svg(svg: &[u8]) -> ConvertResult<Bitmap> {
    fn to_px(v: f32) -> ConvertResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(ConvertError::transcode("svg has invalid width/height"));
        }
        Ok((v.ceil() as u32).max(1))
    }

    let tree = parse_tree(svg)?;
    let width = to_px(tree.size().width())?;
    let height = to_px(tree.size().height())?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| ConvertError::transcode("failed to allocate svg pixmap"))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::default(),
        &mut pixmap.as_mut(),
    );

    let mut data = Vec::with_capacity(width as usize * height as usize * 4);
    for px in pixmap.pixels() {
        let c = px.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Bitmap::from_raw(width, height, data)
}

fn parse_tree(svg: &[u8]) -> ConvertResult<usvg::Tree> {
    if svg.is_empty() {
        return Err(ConvertError::transcode("svg data is empty"));
    }
    let opts = usvg::Options::default();
    usvg::Tree::from_data(svg, &opts)
        .map_err(|e| ConvertError::transcode(format!("parse svg tree: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/vector/canonical.rs"]
mod tests;
