//! Startup sensor selection.
//!
//! Picks the first sensor reporting `Connected`, starts its color stream and
//! holds it until shutdown. Selection happens once; there is no re-probing
//! if a sensor is plugged in later.

use std::sync::Arc;

use tracing::{info, warn};

use crate::sensor::backend::SensorBackend;
use crate::sensor::types::{FrameCallback, SensorDevice, SensorStatus, StreamFormat};

/// A sensor whose stream was started successfully.
pub struct ActiveSensor {
    backend: Arc<dyn SensorBackend>,
    device: SensorDevice,
    stopped: bool,
}

impl ActiveSensor {
    pub fn device(&self) -> &SensorDevice {
        &self.device
    }

    /// Stop the stream. Idempotent; also runs on drop.
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        if let Err(e) = self.backend.stop(&self.device.id) {
            warn!("failed to stop sensor '{}': {e}", self.device.name);
        }
    }
}

impl Drop for ActiveSensor {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Outcome of startup selection: either a running sensor or none at all.
pub enum SensorChoice {
    Connected(ActiveSensor),
    Absent,
}

impl SensorChoice {
    /// Enumerate `backend`, start the first connected sensor and route its
    /// frames to `on_frame`.
    ///
    /// Enumeration or start failures are logged and yield `Absent`; the
    /// caller keeps presenting its fallback image.
    pub fn choose(
        backend: Arc<dyn SensorBackend>,
        format: StreamFormat,
        on_frame: FrameCallback,
    ) -> Self {
        let devices = match backend.enumerate_sensors() {
            Ok(devices) => devices,
            Err(e) => {
                warn!("sensor enumeration failed: {e}");
                return Self::Absent;
            }
        };

        let Some(device) = devices
            .into_iter()
            .find(|d| d.status == SensorStatus::Connected)
        else {
            info!("no connected sensor, showing fallback image");
            return Self::Absent;
        };

        match backend.start(&device.id, format, on_frame) {
            Ok(()) => {
                info!("started sensor '{}' ({})", device.name, device.id);
                Self::Connected(ActiveSensor {
                    backend,
                    device,
                    stopped: false,
                })
            }
            Err(e) => {
                warn!("failed to start sensor '{}': {e}", device.name);
                Self::Absent
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected(_))
    }

    /// The running sensor, if any.
    pub fn device(&self) -> Option<&SensorDevice> {
        match self {
            Self::Connected(active) => Some(active.device()),
            Self::Absent => None,
        }
    }

    /// Stop the running sensor, if any.
    pub fn stop(&mut self) {
        if let Self::Connected(active) = self {
            active.stop();
        }
    }
}
