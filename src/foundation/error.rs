/// Convenience result type used across bgconvert.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Top-level error taxonomy used by conversion APIs.
#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    /// Input bytes are not a decodable raster image.
    #[error("decode error: {0}")]
    Decode(String),

    /// Requested output format is not recognized.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Building the intermediate SVG document failed.
    #[error("vectorize error: {0}")]
    Vectorize(String),

    /// The SVG document could not be parsed or re-serialized.
    #[error("transcode error: {0}")]
    Transcode(String),

    /// Raster encoding (PNG/JPEG) failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Invalid user-provided options.
    #[error("validation error: {0}")]
    Validation(String),

    /// A specific image of a batch failed.
    #[error("batch task {index} failed: {source}")]
    BatchTask {
        /// 0-based input index of the failing image.
        index: usize,
        /// The per-image failure.
        #[source]
        source: Box<ConvertError>,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ConvertError {
    /// Build a [`ConvertError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`ConvertError::UnsupportedFormat`] value.
    pub fn unsupported_format(msg: impl Into<String>) -> Self {
        Self::UnsupportedFormat(msg.into())
    }

    /// Build a [`ConvertError::Vectorize`] value.
    pub fn vectorize(msg: impl Into<String>) -> Self {
        Self::Vectorize(msg.into())
    }

    /// Build a [`ConvertError::Transcode`] value.
    pub fn transcode(msg: impl Into<String>) -> Self {
        Self::Transcode(msg.into())
    }

    /// Build a [`ConvertError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`ConvertError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Attach a batch input index to a per-image error.
    ///
    /// Errors that already carry an index are returned unchanged.
    pub fn at_index(self, index: usize) -> Self {
        match self {
            err @ Self::BatchTask { .. } => err,
            other => Self::BatchTask {
                index,
                source: Box::new(other),
            },
        }
    }

    /// Input index of the failing image for batch errors.
    pub fn failed_index(&self) -> Option<usize> {
        match self {
            Self::BatchTask { index, .. } => Some(*index),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
