use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::frame::error::Result as FrameResult;
use crate::frame::types::{SourceFrame, BYTES_PER_PIXEL};

/// Stable sensor identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SensorId(String);

impl SensorId {
    /// Create a new `SensorId` from a raw string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Return the inner string representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reported state of a sensor at enumeration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorStatus {
    Connected,
    Disconnected,
    NotPowered,
    Initializing,
    Error,
}

/// Discovered sensor device.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorDevice {
    pub id: SensorId,
    pub name: String,
    pub status: SensorStatus,
}

/// Color stream format requested when starting a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StreamFormat {
    pub width: u32,
    pub height: u32,
    pub fps: f32,
}

impl StreamFormat {
    /// Highest frame rate a stream may request.
    pub const MAX_FPS: f32 = 1000.0;

    /// Time between frames, or `None` when `fps` is not a finite rate in
    /// `(0, MAX_FPS]`.
    pub fn frame_interval(&self) -> Option<Duration> {
        if !self.fps.is_finite() || self.fps <= 0.0 || self.fps > Self::MAX_FPS {
            return None;
        }
        Duration::try_from_secs_f32(self.fps.recip()).ok()
    }

    /// Bytes in one `[B, G, R, X]` frame of this format.
    pub fn frame_len(&self) -> usize {
        self.width as usize * self.height as usize * BYTES_PER_PIXEL
    }
}

impl Default for StreamFormat {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            fps: 30.0,
        }
    }
}

/// One captured color frame, owned by the provider for the duration of the
/// frame-ready callback.
#[derive(Debug, Clone)]
pub struct SensorFrame {
    /// Raw pixel data, `[B, G, R, X]` per pixel.
    pub data: Vec<u8>,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Capture timestamp in microseconds.
    pub timestamp_us: u64,
}

impl SensorFrame {
    /// Borrow as a validated remap source.
    pub fn as_source(&self) -> FrameResult<SourceFrame<'_>> {
        SourceFrame::new(&self.data, self.width as usize, self.height as usize)
    }
}

/// Frame-ready callback. Runs on the provider's thread.
pub type FrameCallback = Arc<dyn Fn(&SensorFrame) + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sensor_id_displays_inner_string() {
        let id = SensorId::new("dummy:sensor-001");
        assert_eq!(id.to_string(), "dummy:sensor-001");
        assert_eq!(id.as_str(), "dummy:sensor-001");
    }

    #[test]
    fn stream_format_defaults_to_vga_at_30fps() {
        let format = StreamFormat::default();
        assert_eq!(format.width, 640);
        assert_eq!(format.height, 480);
        assert_eq!(format.fps, 30.0);
        assert_eq!(format.frame_len(), 640 * 480 * 4);
    }

    #[test]
    fn frame_interval_follows_fps() {
        let format = StreamFormat::default();
        let interval = format.frame_interval().unwrap();
        assert!((interval.as_secs_f64() - 1.0 / 30.0).abs() < 1e-6);

        let fastest = StreamFormat {
            fps: StreamFormat::MAX_FPS,
            ..format
        };
        assert_eq!(fastest.frame_interval(), Some(Duration::from_millis(1)));
    }

    #[test]
    fn frame_interval_rejects_unusable_rates() {
        for fps in [0.0, -30.0, 1e-30, f32::NAN, f32::INFINITY, 1001.0] {
            let format = StreamFormat {
                fps,
                ..StreamFormat::default()
            };
            assert_eq!(format.frame_interval(), None, "fps {fps}");
        }
    }

    #[test]
    fn sensor_device_serialises_to_camelcase() {
        let device = SensorDevice {
            id: SensorId::new("s1"),
            name: "Sensor".to_string(),
            status: SensorStatus::NotPowered,
        };
        let json = serde_json::to_value(&device).unwrap();
        assert_eq!(json["id"], "s1");
        assert_eq!(json["status"], "not_powered");
    }

    #[test]
    fn sensor_frame_as_source_validates_length() {
        let frame = SensorFrame {
            data: vec![0; 2 * 2 * 4],
            width: 2,
            height: 2,
            timestamp_us: 0,
        };
        assert!(frame.as_source().is_ok());

        let truncated = SensorFrame {
            data: vec![0; 7],
            ..frame
        };
        assert!(truncated.as_source().is_err());
    }
}
