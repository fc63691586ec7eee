use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::diagnostics::stats::DiagnosticSnapshot;
use crate::preview::error::Result;
use crate::preview::exit::ExitSignal;
use crate::preview::presenter::Presenter;
use crate::preview::surface::SharedSurface;
use crate::sensor::backend::SensorBackend;
use crate::sensor::chooser::SensorChoice;
use crate::settings::types::ViewerSettings;

/// Result of a finished viewer loop.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub cycles: u64,
    pub sensor_connected: bool,
    pub diagnostics: DiagnosticSnapshot,
}

/// One viewing session: a screen surface, the sensor feeding it and the
/// presentation loop that shows it.
pub struct Viewer {
    surface: SharedSurface,
    sensor: SensorChoice,
    exit: ExitSignal,
    max_cycles: Option<u64>,
}

impl Viewer {
    /// Allocate the black fallback surface and start the first connected
    /// sensor, if any.
    pub fn start(backend: Arc<dyn SensorBackend>, settings: &ViewerSettings) -> Self {
        let surface = SharedSurface::new(settings.screen);
        let sensor = SensorChoice::choose(backend, settings.sensor, surface.on_frame());
        Self {
            surface,
            sensor,
            exit: ExitSignal::new(),
            max_cycles: settings.max_cycles,
        }
    }

    /// Share `exit` with whoever ends the session, such as an interrupt
    /// handler.
    pub fn with_exit_signal(mut self, exit: ExitSignal) -> Self {
        self.exit = exit;
        self
    }

    pub fn surface(&self) -> &SharedSurface {
        &self.surface
    }

    pub fn sensor(&self) -> &SensorChoice {
        &self.sensor
    }

    /// Handle for requesting exit from another thread or input handler.
    pub fn exit_signal(&self) -> ExitSignal {
        self.exit.clone()
    }

    fn should_continue(&self, presenter: &dyn Presenter, cycles: u64) -> bool {
        let limit_reached = matches!(self.max_cycles, Some(max) if cycles >= max);
        !limit_reached && !self.exit.is_requested() && presenter.is_open()
    }

    /// Present the surface once per cycle until exit is requested, the
    /// presenter closes or the cycle limit is reached.
    ///
    /// Every cycle presents, whether or not a new frame arrived since the
    /// last one.
    pub fn run(&mut self, presenter: &mut dyn Presenter) -> Result<RunSummary> {
        let size = self.surface.size();
        let mut cycles = 0u64;

        while self.should_continue(presenter, cycles) {
            self.surface
                .with_pixels(|pixels| presenter.present(pixels, size))?;
            presenter.end_cycle()?;
            cycles += 1;
        }

        let summary = RunSummary {
            cycles,
            sensor_connected: self.sensor.is_connected(),
            diagnostics: self.surface.diagnostics(),
        };
        info!(
            "viewer finished after {} cycles, {} frames remapped, {} dropped",
            summary.cycles, summary.diagnostics.frame_count, summary.diagnostics.drop_count
        );
        Ok(summary)
    }

    /// Stop the sensor. The surface keeps its last image.
    pub fn shutdown(&mut self) {
        self.sensor.stop();
    }
}
