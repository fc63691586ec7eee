use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::sensor::backend::SensorBackend;
use crate::sensor::error::{Result, SensorError};
use crate::sensor::types::{
    FrameCallback, SensorDevice, SensorFrame, SensorId, SensorStatus, StreamFormat,
};

const DUMMY_SENSOR_ID: &str = "dummy:test:sensor-001";
const DUMMY_SENSOR_NAME: &str = "Dummy Test Sensor";

/// Width in pixels of one color bar in the test pattern.
const BAR_WIDTH: u32 = 32;

/// `[B, G, R, X]` bar colors: white, yellow, cyan, green, magenta, red, blue, black.
const BARS: [[u8; 4]; 8] = [
    [255, 255, 255, 0],
    [0, 255, 255, 0],
    [255, 255, 0, 0],
    [0, 255, 0, 0],
    [255, 0, 255, 0],
    [0, 0, 255, 0],
    [255, 0, 0, 0],
    [0, 0, 0, 0],
];

/// A running simulated stream.
struct DummyStream {
    running: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl DummyStream {
    fn stop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

/// Simulated sensor for development and testing without hardware.
///
/// Exposes a single connected device. Starting it spawns a thread that
/// delivers scrolling color-bar frames in `[B, G, R, X]` order at the
/// requested frame rate.
///
/// Enable via `DUMMY_SENSOR=1` environment variable.
pub struct DummyBackend {
    streams: Mutex<HashMap<SensorId, DummyStream>>,
}

impl DummyBackend {
    /// Create a new DummyBackend with no active stream.
    pub fn new() -> Self {
        Self {
            streams: Mutex::new(HashMap::new()),
        }
    }

    /// Whether the dummy sensor is enabled via environment variable.
    pub fn is_enabled() -> bool {
        std::env::var("DUMMY_SENSOR").is_ok_and(|v| v == "1" || v == "true")
    }

    /// The stable device ID for the dummy sensor.
    pub fn sensor_id() -> SensorId {
        SensorId::new(DUMMY_SENSOR_ID)
    }

    /// Whether the stream for `id` is currently running.
    pub fn is_streaming(&self, id: &SensorId) -> bool {
        self.streams
            .lock()
            .get(id)
            .is_some_and(|s| s.running.load(Ordering::Relaxed))
    }

    /// Render frame number `index` of the color-bar pattern.
    ///
    /// Bars scroll one pixel to the left per frame so consecutive frames
    /// differ.
    pub fn test_frame(format: StreamFormat, index: u64) -> Vec<u8> {
        let mut data = Vec::with_capacity(format.frame_len());
        let period = BAR_WIDTH as u64 * BARS.len() as u64;
        for _y in 0..format.height {
            for x in 0..format.width {
                let shifted = (x as u64 + index) % period;
                let bar = (shifted / BAR_WIDTH as u64) as usize;
                data.extend_from_slice(&BARS[bar]);
            }
        }
        data
    }

    fn run_stream(
        interval: Duration,
        format: StreamFormat,
        running: &AtomicBool,
        on_frame: &FrameCallback,
    ) {
        let start = Instant::now();
        let mut index = 0u64;

        while running.load(Ordering::Relaxed) {
            let frame = SensorFrame {
                data: Self::test_frame(format, index),
                width: format.width,
                height: format.height,
                timestamp_us: start.elapsed().as_micros() as u64,
            };
            on_frame(&frame);
            index += 1;
            std::thread::sleep(interval);
        }
        debug!("dummy sensor delivered {index} frames");
    }
}

impl Default for DummyBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorBackend for DummyBackend {
    fn enumerate_sensors(&self) -> Result<Vec<SensorDevice>> {
        Ok(vec![SensorDevice {
            id: Self::sensor_id(),
            name: DUMMY_SENSOR_NAME.to_string(),
            status: SensorStatus::Connected,
        }])
    }

    fn start(&self, id: &SensorId, format: StreamFormat, on_frame: FrameCallback) -> Result<()> {
        if id != &Self::sensor_id() {
            return Err(SensorError::DeviceNotFound(id.to_string()));
        }
        if format.width == 0 || format.height == 0 {
            return Err(SensorError::Start(format!(
                "unsupported format {}x{}",
                format.width, format.height
            )));
        }

        let interval = format.frame_interval().ok_or_else(|| {
            SensorError::Start(format!("unsupported frame rate {}fps", format.fps))
        })?;

        let mut streams = self.streams.lock();
        if streams.contains_key(id) {
            return Err(SensorError::AlreadyStreaming(id.to_string()));
        }

        let running = Arc::new(AtomicBool::new(true));
        let running_clone = Arc::clone(&running);
        let thread = std::thread::Builder::new()
            .name(format!("sensor-{id}"))
            .spawn(move || Self::run_stream(interval, format, &running_clone, &on_frame))?;

        info!(
            "dummy sensor streaming {}x{} @ {}fps",
            format.width, format.height, format.fps
        );
        streams.insert(
            id.clone(),
            DummyStream {
                running,
                thread: Some(thread),
            },
        );
        Ok(())
    }

    fn stop(&self, id: &SensorId) -> Result<()> {
        // Take the stream out first so the join does not hold the lock.
        let stream = self.streams.lock().remove(id);
        if let Some(mut stream) = stream {
            stream.stop();
            info!("dummy sensor stopped");
        }
        Ok(())
    }
}

impl Drop for DummyBackend {
    fn drop(&mut self) {
        for (_, mut stream) in self.streams.get_mut().drain() {
            stream.stop();
        }
    }
}
