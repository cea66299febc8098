//! Raster analysis: background estimation, masking and dimension correction.

/// Background estimator and [`BackgroundSpec`](background::BackgroundSpec).
pub mod background;
/// Dimension corrector.
pub mod correct;
/// Tolerance-based background masker.
pub mod mask;
/// Corner color frequency sampling.
pub mod sampler;
