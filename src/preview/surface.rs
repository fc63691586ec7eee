use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tracing::warn;

use crate::diagnostics::stats::{DiagnosticSnapshot, DiagnosticStats};
use crate::frame::error::Result as FrameResult;
use crate::frame::{Color, DestinationBuffer, ScreenSize};
use crate::sensor::types::{FrameCallback, SensorFrame};

/// The screen buffer shared between the frame-arrival path (sole writer)
/// and the presentation path (sole reader).
///
/// Access is serialised by a mutex, so a remap always completes before the
/// presenter sees the buffer and vice versa. When no frame arrives the
/// buffer keeps its previous contents: black after startup, otherwise the
/// last remapped frame.
#[derive(Clone)]
pub struct SharedSurface {
    buffer: Arc<Mutex<DestinationBuffer>>,
    /// Incremented after every successful remap.
    sequence: Arc<AtomicU64>,
    stats: Arc<Mutex<DiagnosticStats>>,
    size: ScreenSize,
}

impl SharedSurface {
    /// Allocate an opaque black surface of `size`.
    pub fn new(size: ScreenSize) -> Self {
        Self {
            buffer: Arc::new(Mutex::new(DestinationBuffer::initialize(size))),
            sequence: Arc::new(AtomicU64::new(0)),
            stats: Arc::new(Mutex::new(DiagnosticStats::new())),
            size,
        }
    }

    pub fn size(&self) -> ScreenSize {
        self.size
    }

    /// Whether the buffer lock is currently held by a remap or a present.
    pub fn is_busy(&self) -> bool {
        self.buffer.is_locked()
    }

    /// Number of frames remapped so far.
    pub fn sequence(&self) -> u64 {
        self.sequence.load(Ordering::Relaxed)
    }

    /// Validate and remap one sensor frame into the buffer.
    ///
    /// A malformed frame is rejected before the lock is taken and the
    /// buffer keeps its previous contents.
    pub fn apply(&self, frame: &SensorFrame) -> FrameResult<()> {
        let source = match frame.as_source() {
            Ok(source) => source,
            Err(e) => {
                self.stats.lock().record_drop();
                return Err(e);
            }
        };

        let start = Instant::now();
        self.buffer.lock().remap_from(&source);
        let elapsed = start.elapsed();

        self.sequence.fetch_add(1, Ordering::Relaxed);
        self.stats.lock().record_frame(frame.data.len(), elapsed);
        Ok(())
    }

    /// Frame-ready callback that feeds this surface. Malformed frames are
    /// logged and dropped.
    pub fn on_frame(&self) -> FrameCallback {
        let surface = self.clone();
        Arc::new(move |frame: &SensorFrame| {
            if let Err(e) = surface.apply(frame) {
                warn!(
                    "dropping {}x{} sensor frame: {e}",
                    frame.width, frame.height
                );
            }
        })
    }

    /// Run `f` with the current pixels while holding the lock.
    pub fn with_pixels<R>(&self, f: impl FnOnce(&[Color]) -> R) -> R {
        f(self.buffer.lock().pixels())
    }

    /// Copy of the current buffer.
    pub fn copy_buffer(&self) -> DestinationBuffer {
        self.buffer.lock().clone()
    }

    /// Take a snapshot of diagnostic stats for this surface.
    pub fn diagnostics(&self) -> DiagnosticSnapshot {
        self.stats.lock().snapshot()
    }
}
