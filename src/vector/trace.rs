use std::collections::HashMap;

use crate::foundation::core::{Bitmap, Rgba};

/// Primitive-merging policy of the vectorizer.
///
/// All strategies cover every non-transparent pixel exactly once and skip fully transparent
/// pixels; they differ only in how many primitives they emit.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum VectorStrategy {
    /// One `1x1` rect per pixel.
    PixelRects,
    /// One rect per horizontal run of identical pixels.
    RunMerge,
    /// Runs grown downward into blocks, one path per fill.
    #[default]
    BlockMerge,
}

/// Axis-aligned rectangle of identical pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelRect {
    /// Left column.
    pub x: u32,
    /// Top row.
    pub y: u32,
    /// Width in pixels (>= 1).
    pub width: u32,
    /// Height in pixels (>= 1).
    pub height: u32,
    /// Pixel value shared by every covered pixel.
    pub fill: Rgba,
}

impl PixelRect {
    /// `true` when `(x, y)` lies inside the rectangle.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// Number of covered pixels.
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Vector element emitted by [`trace`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VectorPrimitive {
    /// A standalone rectangle.
    Rect(PixelRect),
    /// Several rectangles sharing one fill, written as a single path.
    Path {
        /// Fill shared by all rectangles.
        fill: Rgba,
        /// Rectangles in scan order.
        rects: Vec<PixelRect>,
    },
}

impl VectorPrimitive {
    /// Fill of the primitive.
    pub fn fill(&self) -> Rgba {
        match self {
            Self::Rect(r) => r.fill,
            Self::Path { fill, .. } => *fill,
        }
    }

    /// Rectangles drawn by this primitive.
    pub fn rects(&self) -> &[PixelRect] {
        match self {
            Self::Rect(r) => std::slice::from_ref(r),
            Self::Path { rects, .. } => rects,
        }
    }
}

/// Decompose `bitmap` into vector primitives using `strategy`.
///
/// Primitives come out in row-major scan order; for [`VectorStrategy::BlockMerge`] paths are
/// ordered by the first appearance of their fill.
pub fn trace(bitmap: &Bitmap, strategy: VectorStrategy) -> Vec<VectorPrimitive> {
    let prims = match strategy {
        VectorStrategy::PixelRects => trace_pixels(bitmap)
            .into_iter()
            .map(VectorPrimitive::Rect)
            .collect(),
        VectorStrategy::RunMerge => trace_runs(bitmap)
            .into_iter()
            .map(VectorPrimitive::Rect)
            .collect(),
        VectorStrategy::BlockMerge => group_by_fill(trace_blocks(bitmap)),
    };
    tracing::debug!(?strategy, primitives = prims.len(), "traced bitmap");
    prims
}

fn trace_pixels(bitmap: &Bitmap) -> Vec<PixelRect> {
    let mut rects = Vec::new();
    for y in 0..bitmap.height {
        for x in 0..bitmap.width {
            let fill = bitmap.pixel(x, y);
            if fill.is_transparent() {
                continue;
            }
            rects.push(PixelRect {
                x,
                y,
                width: 1,
                height: 1,
                fill,
            });
        }
    }
    rects
}

fn trace_runs(bitmap: &Bitmap) -> Vec<PixelRect> {
    let mut rects = Vec::new();
    for y in 0..bitmap.height {
        let mut x = 0;
        while x < bitmap.width {
            let fill = bitmap.pixel(x, y);
            let start = x;
            x += 1;
            while x < bitmap.width && bitmap.pixel(x, y) == fill {
                x += 1;
            }
            if !fill.is_transparent() {
                rects.push(PixelRect {
                    x: start,
                    y,
                    width: x - start,
                    height: 1,
                    fill,
                });
            }
        }
    }
    rects
}

/// Greedy block merge: take the maximal unvisited run at the first unvisited pixel, then grow
/// it downward while the full band below matches. Not a minimum rectangle decomposition.
fn trace_blocks(bitmap: &Bitmap) -> Vec<PixelRect> {
    let (width, height) = bitmap.dimensions();
    let idx = |x: u32, y: u32| y as usize * width as usize + x as usize;
    let mut visited = vec![false; width as usize * height as usize];
    let mut rects = Vec::new();

    for y in 0..height {
        for x in 0..width {
            if visited[idx(x, y)] {
                continue;
            }
            let fill = bitmap.pixel(x, y);
            if fill.is_transparent() {
                continue;
            }

            let mut run = 1;
            while x + run < width
                && !visited[idx(x + run, y)]
                && bitmap.pixel(x + run, y) == fill
            {
                run += 1;
            }

            let mut rows = 1;
            while y + rows < height
                && (x..x + run)
                    .all(|cx| !visited[idx(cx, y + rows)] && bitmap.pixel(cx, y + rows) == fill)
            {
                rows += 1;
            }

            for ry in y..y + rows {
                for rx in x..x + run {
                    visited[idx(rx, ry)] = true;
                }
            }
            rects.push(PixelRect {
                x,
                y,
                width: run,
                height: rows,
                fill,
            });
        }
    }
    rects
}

fn group_by_fill(rects: Vec<PixelRect>) -> Vec<VectorPrimitive> {
    let mut slots = HashMap::<Rgba, usize>::new();
    let mut groups = Vec::<(Rgba, Vec<PixelRect>)>::new();
    for rect in rects {
        match slots.get(&rect.fill) {
            Some(&i) => groups[i].1.push(rect),
            None => {
                slots.insert(rect.fill, groups.len());
                groups.push((rect.fill, vec![rect]));
            }
        }
    }
    groups
        .into_iter()
        .map(|(fill, rects)| VectorPrimitive::Path { fill, rects })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/vector/trace.rs"]
mod tests;
