//! SVG document writer for traced primitives.

use std::fmt::Write;

use crate::{
    foundation::{
        core::{Bitmap, Rgba},
        error::{ConvertError, ConvertResult},
    },
    vector::trace::{PixelRect, VectorPrimitive, VectorStrategy, trace},
};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Vectorize a (masked) bitmap into an SVG document string.
///
/// Fully transparent pixels are omitted. Partially transparent fills carry `fill-opacity`.
pub fn vectorize(bitmap: &Bitmap, strategy: VectorStrategy) -> ConvertResult<String> {
    if bitmap.is_empty() {
        return Err(ConvertError::vectorize(format!(
            "cannot vectorize an empty {}x{} bitmap",
            bitmap.width, bitmap.height
        )));
    }
    if !bitmap.has_valid_buffer() {
        return Err(ConvertError::vectorize(
            "bitmap buffer does not match its dimensions",
        ));
    }

    let prims = trace(bitmap, strategy);
    Ok(write_svg(bitmap.width, bitmap.height, &prims))
}

/// Serialize primitives into a standalone SVG document of `width x height` pixels.
pub fn write_svg(width: u32, height: u32, prims: &[VectorPrimitive]) -> String {
    let mut out = String::with_capacity(128 + prims.len() * 64);
    let _ = write!(
        out,
        r#"<svg xmlns="{SVG_NS}" width="{width}" height="{height}" viewBox="0 0 {width} {height}" shape-rendering="crispEdges">"#
    );
    for prim in prims {
        match prim {
            VectorPrimitive::Rect(r) => {
                let _ = write!(
                    out,
                    r#"<rect x="{}" y="{}" width="{}" height="{}"{}/>"#,
                    r.x,
                    r.y,
                    r.width,
                    r.height,
                    fill_attrs(r.fill)
                );
            }
            VectorPrimitive::Path { fill, rects } => {
                let _ = write!(
                    out,
                    r#"<path{} d="{}"/>"#,
                    fill_attrs(*fill),
                    path_data(rects)
                );
            }
        }
    }
    out.push_str("</svg>");
    out
}

/// `M x y h w v h h -w z` per rectangle.
fn path_data(rects: &[PixelRect]) -> String {
    let mut d = String::with_capacity(rects.len() * 24);
    for (i, r) in rects.iter().enumerate() {
        if i > 0 {
            d.push(' ');
        }
        let _ = write!(
            d,
            "M{} {}h{}v{}h-{}z",
            r.x, r.y, r.width, r.height, r.width
        );
    }
    d
}

fn fill_attrs(fill: Rgba) -> String {
    let hex = fill.color().to_hex();
    if fill.a == 255 {
        format!(r#" fill="{hex}""#)
    } else {
        format!(
            r#" fill="{hex}" fill-opacity="{:.4}""#,
            f32::from(fill.a) / 255.0
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/vector/svg.rs"]
mod tests;
