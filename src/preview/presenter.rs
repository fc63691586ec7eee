use std::time::Duration;

use crate::frame::{Color, ScreenSize};
use crate::preview::error::Result;

/// Displays the screen buffer once per output cycle.
pub trait Presenter {
    /// Show `pixels` (row-major, `size.width * size.height` colors).
    fn present(&mut self, pixels: &[Color], size: ScreenSize) -> Result<()>;

    /// Whether the output surface is still open. A closed presenter ends
    /// the viewer loop.
    fn is_open(&self) -> bool {
        true
    }

    /// Called after each present, outside the surface lock. Pacing and
    /// display uploads that may block belong here.
    fn end_cycle(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Presenter without a display. Keeps a copy of the last presented frame,
/// the way a texture upload would.
#[derive(Default)]
pub struct HeadlessPresenter {
    interval: Option<Duration>,
    presented: u64,
    last: Vec<Color>,
}

impl HeadlessPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep `interval` at the end of each cycle to approximate a display's
    /// refresh cadence.
    pub fn paced(interval: Duration) -> Self {
        Self {
            interval: Some(interval),
            ..Self::default()
        }
    }

    /// Number of cycles presented.
    pub fn presented(&self) -> u64 {
        self.presented
    }

    /// Pixels from the most recent present; empty before the first one.
    pub fn last_frame(&self) -> &[Color] {
        &self.last
    }
}

impl Presenter for HeadlessPresenter {
    fn present(&mut self, pixels: &[Color], _size: ScreenSize) -> Result<()> {
        self.last.clear();
        self.last.extend_from_slice(pixels);
        self.presented += 1;
        Ok(())
    }

    fn end_cycle(&mut self) -> Result<()> {
        if let Some(interval) = self.interval {
            std::thread::sleep(interval);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_presenter_counts_and_copies() {
        let mut presenter = HeadlessPresenter::new();
        assert!(presenter.last_frame().is_empty());

        let pixels = vec![Color::opaque(1, 2, 3); 6];
        presenter.present(&pixels, ScreenSize::new(3, 2)).unwrap();
        presenter.present(&pixels, ScreenSize::new(3, 2)).unwrap();

        assert_eq!(presenter.presented(), 2);
        assert_eq!(presenter.last_frame(), pixels.as_slice());
        assert!(presenter.is_open());
    }

    #[test]
    fn paced_presenter_waits_between_cycles() {
        let mut presenter = HeadlessPresenter::paced(Duration::from_millis(20));
        let start = std::time::Instant::now();
        presenter
            .present(&[Color::BLACK], ScreenSize::new(1, 1))
            .unwrap();
        presenter.end_cycle().unwrap();
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
