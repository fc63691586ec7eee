use thiserror::Error;

/// Sensor subsystem errors.
#[derive(Debug, Error)]
pub enum SensorError {
    #[error("sensor not found: {0}")]
    DeviceNotFound(String),

    #[error("sensor enumeration failed: {0}")]
    Enumeration(String),

    #[error("sensor failed to start: {0}")]
    Start(String),

    #[error("sensor already streaming: {0}")]
    AlreadyStreaming(String),

    #[error("sensor I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, SensorError>;
