use serde::Serialize;
use std::time::{Duration, Instant};

/// Collects statistics for the frame-arrival path of a viewer session.
pub struct DiagnosticStats {
    frame_count: u64,
    drop_count: u64,
    total_bytes: u64,
    start_time: Instant,
    last_frame_time: Option<Instant>,
    last_remap: Duration,
}

/// Snapshot of diagnostic stats for logging and serialisation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticSnapshot {
    pub fps: f64,
    pub frame_count: u64,
    pub drop_count: u64,
    pub drop_rate: f64,
    pub remap_ms: f64,
    pub bandwidth_bps: u64,
    /// Milliseconds since the last remapped frame; `None` before the first.
    pub since_last_frame_ms: Option<f64>,
}

impl DiagnosticStats {
    /// Create new stats with zeroed counters.
    pub fn new() -> Self {
        Self {
            frame_count: 0,
            drop_count: 0,
            total_bytes: 0,
            start_time: Instant::now(),
            last_frame_time: None,
            last_remap: Duration::ZERO,
        }
    }

    /// Record a sensor frame that was remapped into the screen buffer.
    pub fn record_frame(&mut self, bytes: usize, remap_time: Duration) {
        self.frame_count += 1;
        self.total_bytes += bytes as u64;
        self.last_frame_time = Some(Instant::now());
        self.last_remap = remap_time;
    }

    /// Record a frame rejected before remapping.
    pub fn record_drop(&mut self) {
        self.drop_count += 1;
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn drop_count(&self) -> u64 {
        self.drop_count
    }

    /// Time since the last remapped frame, if any arrived.
    pub fn since_last_frame(&self) -> Option<Duration> {
        self.last_frame_time.map(|t| t.elapsed())
    }

    /// Calculate remapped frames per second since start.
    pub fn fps(&self) -> f64 {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        if elapsed < 0.001 {
            return 0.0;
        }
        self.frame_count as f64 / elapsed
    }

    /// Drop rate as a percentage (0.0 - 100.0).
    pub fn drop_rate(&self) -> f64 {
        let total = self.frame_count + self.drop_count;
        if total == 0 {
            return 0.0;
        }
        (self.drop_count as f64 / total as f64) * 100.0
    }

    /// Duration of the latest remap in milliseconds.
    pub fn remap_ms(&self) -> f64 {
        self.last_remap.as_secs_f64() * 1000.0
    }

    /// Sensor bytes consumed per second.
    pub fn bandwidth_bps(&self) -> u64 {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        if elapsed < 0.001 {
            return 0;
        }
        (self.total_bytes as f64 / elapsed) as u64
    }

    /// Take a serialisable snapshot.
    pub fn snapshot(&self) -> DiagnosticSnapshot {
        DiagnosticSnapshot {
            fps: self.fps(),
            frame_count: self.frame_count,
            drop_count: self.drop_count,
            drop_rate: self.drop_rate(),
            remap_ms: self.remap_ms(),
            bandwidth_bps: self.bandwidth_bps(),
            since_last_frame_ms: self
                .since_last_frame()
                .map(|d| d.as_secs_f64() * 1000.0),
        }
    }
}

impl Default for DiagnosticStats {
    fn default() -> Self {
        Self::new()
    }
}
