//! Raster to vector conversion: tracing strategies, SVG writing and canonicalization.

/// SVG canonicalization and rasterization through `usvg`/`resvg`.
pub mod canonical;
/// SVG document writer.
pub mod svg;
/// Rectangle tracing strategies.
pub mod trace;
