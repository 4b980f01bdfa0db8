use thiserror::Error;

/// Errors that can occur while reading a disc image.
///
/// None of these cross the per-file boundary of the extractor: they abort a
/// single pipeline stage, which then falls through to the next one.
#[derive(Debug, Error)]
pub enum DiscError {
    /// I/O error while reading the image (including short reads)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The container header is not recognized or is invalid
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// The container header parsed but its index or offsets are inconsistent
    #[error("Corrupt image: {0}")]
    CorruptImage(String),

    /// A compressed block could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// The image is too small to contain the requested structure
    #[error("Image too small: expected at least {expected} bytes, got {actual}")]
    TooSmall { expected: u64, actual: u64 },
}

impl DiscError {
    pub fn invalid_format(msg: impl Into<String>) -> Self {
        Self::InvalidFormat(msg.into())
    }

    pub fn corrupt_image(msg: impl Into<String>) -> Self {
        Self::CorruptImage(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}
