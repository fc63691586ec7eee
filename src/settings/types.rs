use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::frame::ScreenSize;
use crate::sensor::types::StreamFormat;

/// Which presentation layer the binary drives.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PresenterKind {
    #[default]
    Headless,
    Window,
}

/// Largest accepted width or height, for the screen, the window and the
/// sensor stream alike.
pub const MAX_DIMENSION: usize = 8192;

/// Default window client area. The screen buffer is letterboxed into it.
pub const WINDOW_WIDTH: usize = 1280;
pub const WINDOW_HEIGHT: usize = 720;

/// Viewer configuration, fixed for the lifetime of a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewerSettings {
    /// Destination surface dimensions.
    pub screen: ScreenSize,
    /// Color stream requested from the sensor.
    pub sensor: StreamFormat,
    pub presenter: PresenterKind,
    /// Initial window size when `presenter` is `window`. Resizable; the
    /// screen keeps its aspect ratio inside it.
    pub window: ScreenSize,
    /// Stop after this many presented cycles; run until exit otherwise.
    pub max_cycles: Option<u64>,
    /// Write the final screen buffer here on shutdown.
    pub snapshot_path: Option<PathBuf>,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            screen: ScreenSize::default(),
            sensor: StreamFormat::default(),
            presenter: PresenterKind::default(),
            window: ScreenSize::new(WINDOW_WIDTH, WINDOW_HEIGHT),
            max_cycles: None,
            snapshot_path: None,
        }
    }
}

fn check_dimensions(what: &str, width: usize, height: usize) -> Result<(), String> {
    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(format!(
            "{what} size must be between 1 and {MAX_DIMENSION} per side, got {width}x{height}"
        ));
    }
    Ok(())
}

impl ViewerSettings {
    /// Reject dimensions and rates the remapper or the sensor cannot work
    /// with.
    pub fn validate(&self) -> Result<(), String> {
        check_dimensions("screen", self.screen.width, self.screen.height)?;
        check_dimensions("window", self.window.width, self.window.height)?;
        check_dimensions(
            "sensor",
            self.sensor.width as usize,
            self.sensor.height as usize,
        )?;
        if self.sensor.frame_interval().is_none() {
            return Err(format!(
                "sensor fps must be in (0, {}], got {}",
                StreamFormat::MAX_FPS,
                self.sensor.fps
            ));
        }
        Ok(())
    }
}
