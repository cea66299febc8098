//! Conversion pipeline: options, single-image conversion and batch orchestration.

/// Batch orchestrator over a worker pool.
pub mod batch;
/// Single-image pipeline.
pub mod convert;
/// Conversion options.
pub mod options;
