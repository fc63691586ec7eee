use thiserror::Error;

/// Presentation-side errors.
#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("presentation failed: {0}")]
    Present(String),

    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("snapshot write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("window support not compiled in (enable the `window` feature)")]
    WindowUnavailable,
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, PreviewError>;
