use thiserror::Error;

/// Errors raised while validating a sensor frame before remapping.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("frame has a zero dimension: {width}x{height}")]
    ZeroDimension { width: usize, height: usize },

    #[error("frame dimensions {width}x{height} overflow the addressable size")]
    TooLarge { width: usize, height: usize },

    #[error("frame buffer is {actual} bytes, expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, FrameError>;
