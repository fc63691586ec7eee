use crate::sensor::error::{Result, SensorError};
use crate::sensor::types::{FrameCallback, SensorDevice, SensorId, StreamFormat};

/// Platform-agnostic sensor-frame provider.
///
/// Implementations enumerate devices and, once started, deliver color frames
/// to the registered callback on their own thread until stopped.
pub trait SensorBackend: Send + Sync {
    /// Enumerate all sensors currently known to the backend.
    fn enumerate_sensors(&self) -> Result<Vec<SensorDevice>>;

    /// Enable the color stream in `format` and start delivering frames.
    fn start(&self, id: &SensorId, format: StreamFormat, on_frame: FrameCallback) -> Result<()>;

    /// Stop the stream. Stopping a sensor that is not streaming is a no-op.
    fn stop(&self, id: &SensorId) -> Result<()>;
}

/// Backend with no devices, used where no native backend exists.
pub struct NullBackend;

impl SensorBackend for NullBackend {
    fn enumerate_sensors(&self) -> Result<Vec<SensorDevice>> {
        Ok(vec![])
    }

    fn start(&self, id: &SensorId, _format: StreamFormat, _on_frame: FrameCallback) -> Result<()> {
        Err(SensorError::DeviceNotFound(id.to_string()))
    }

    fn stop(&self, _id: &SensorId) -> Result<()> {
        Ok(())
    }
}
