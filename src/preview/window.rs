use std::time::Duration;

use minifb::{Key, ScaleMode, Window, WindowOptions};

use crate::frame::{Color, ScreenSize};
use crate::preview::error::{PreviewError, Result};
use crate::preview::presenter::Presenter;

/// On-screen presenter backed by a `minifb` window. Escape closes it.
///
/// The screen buffer is stretched to the window keeping its aspect ratio,
/// with black bars filling the rest.
pub struct WindowPresenter {
    window: Window,
    scratch: Vec<u32>,
    size: ScreenSize,
}

/// Resizable window that letterboxes the buffer instead of distorting it.
fn window_options() -> WindowOptions {
    WindowOptions {
        resize: true,
        scale_mode: ScaleMode::AspectRatioStretch,
        ..WindowOptions::default()
    }
}

impl WindowPresenter {
    /// Open a `window`-sized window that shows a `screen`-sized buffer.
    pub fn open(
        title: &str,
        screen: ScreenSize,
        window: ScreenSize,
        refresh: Duration,
    ) -> Result<Self> {
        let mut handle = Window::new(title, window.width, window.height, window_options())
            .map_err(|e| PreviewError::Present(e.to_string()))?;
        handle.limit_update_rate(Some(refresh));
        Ok(Self {
            window: handle,
            scratch: vec![0; screen.pixel_count()],
            size: screen,
        })
    }
}

impl Presenter for WindowPresenter {
    fn present(&mut self, pixels: &[Color], size: ScreenSize) -> Result<()> {
        self.scratch.clear();
        self.scratch.extend(pixels.iter().map(|c| c.to_0rgb()));
        self.size = size;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.window.is_open() && !self.window.is_key_down(Key::Escape)
    }

    // The rate limiter sleeps inside `update_with_buffer`, so the upload
    // happens here, after the surface lock is released.
    fn end_cycle(&mut self) -> Result<()> {
        self.window
            .update_with_buffer(&self.scratch, self.size.width, self.size.height)
            .map_err(|e| PreviewError::Present(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_keeps_aspect_ratio_when_resized() {
        let options = window_options();
        assert!(options.resize);
        assert!(matches!(options.scale_mode, ScaleMode::AspectRatioStretch));
    }
}
