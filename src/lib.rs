pub mod diagnostics;
pub mod error;
pub mod frame;
pub mod preview;
pub mod sensor;
pub mod settings;

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use error::AppError;
use preview::error::PreviewError;
use preview::exit::ExitSignal;
use preview::presenter::{HeadlessPresenter, Presenter};
use preview::snapshot;
use preview::viewer::{RunSummary, Viewer};
use sensor::backend::{NullBackend, SensorBackend};
use sensor::dummy::DummyBackend;
use settings::types::{PresenterKind, ViewerSettings};

/// Output refresh cadence (~60 Hz).
const REFRESH_INTERVAL: Duration = Duration::from_micros(16_600);

/// Create the sensor backend for the current platform.
///
/// When `DUMMY_SENSOR=1` is set, a simulated sensor is used instead.
pub fn create_sensor_backend() -> Arc<dyn SensorBackend> {
    if DummyBackend::is_enabled() {
        return Arc::new(DummyBackend::new());
    }
    Arc::new(NullBackend)
}

fn create_presenter(settings: &ViewerSettings) -> Result<Box<dyn Presenter>, PreviewError> {
    match settings.presenter {
        PresenterKind::Headless => Ok(Box::new(HeadlessPresenter::paced(REFRESH_INTERVAL))),
        PresenterKind::Window => open_window(settings),
    }
}

#[cfg(feature = "window")]
fn open_window(settings: &ViewerSettings) -> Result<Box<dyn Presenter>, PreviewError> {
    let window = preview::window::WindowPresenter::open(
        "sensorview - ESC to exit",
        settings.screen,
        settings.window,
        REFRESH_INTERVAL,
    )?;
    Ok(Box::new(window))
}

#[cfg(not(feature = "window"))]
fn open_window(_settings: &ViewerSettings) -> Result<Box<dyn Presenter>, PreviewError> {
    Err(PreviewError::WindowUnavailable)
}

/// Request exit on Ctrl-C. Only one handler can be installed per process.
fn install_interrupt_handler(exit: &ExitSignal) {
    let handle = exit.clone();
    match ctrlc::set_handler(move || {
        info!("interrupt received, stopping viewer");
        handle.request();
    }) {
        Ok(()) => {}
        Err(e) => warn!("Ctrl-C handler unavailable: {e}"),
    }
}

/// Run a viewer session with `settings` on the platform sensor backend.
///
/// Ctrl-C ends the session. The sensor is stopped before returning, also
/// when presentation fails.
pub fn run(settings: &ViewerSettings) -> Result<RunSummary, AppError> {
    let exit = ExitSignal::new();
    install_interrupt_handler(&exit);
    run_with_backend(create_sensor_backend(), settings, exit)
}

/// Run a viewer session fed by `backend` until `exit` is requested, the
/// presenter closes or `settings.max_cycles` is reached.
pub fn run_with_backend(
    backend: Arc<dyn SensorBackend>,
    settings: &ViewerSettings,
    exit: ExitSignal,
) -> Result<RunSummary, AppError> {
    let mut presenter = create_presenter(settings)?;
    let mut viewer = Viewer::start(backend, settings).with_exit_signal(exit);

    let result = viewer.run(presenter.as_mut());
    viewer.shutdown();
    let summary = result?;

    if let Some(path) = &settings.snapshot_path {
        snapshot::save(&viewer.surface().copy_buffer(), path)?;
        info!("saved snapshot to {}", path.display());
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::ScreenSize;

    fn headless(max_cycles: u64) -> ViewerSettings {
        ViewerSettings {
            screen: ScreenSize::new(16, 12),
            max_cycles: Some(max_cycles),
            ..ViewerSettings::default()
        }
    }

    #[test]
    fn headless_run_without_sensor_completes() {
        let summary =
            run_with_backend(Arc::new(NullBackend), &headless(2), ExitSignal::new()).unwrap();
        assert_eq!(summary.cycles, 2);
        assert!(!summary.sensor_connected);
        assert_eq!(summary.diagnostics.frame_count, 0);
    }

    #[test]
    fn run_writes_snapshot_of_fallback_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("still.png");
        let settings = ViewerSettings {
            snapshot_path: Some(path.clone()),
            ..headless(1)
        };

        run_with_backend(Arc::new(NullBackend), &settings, ExitSignal::new()).unwrap();

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (16, 12));
        assert!(decoded.pixels().all(|p| p.0 == [0, 0, 0, 255]));
    }

    #[test]
    fn dummy_backend_run_stops_stream() {
        let backend = Arc::new(DummyBackend::new());
        let settings = ViewerSettings {
            sensor: crate::sensor::types::StreamFormat {
                width: 8,
                height: 6,
                fps: 120.0,
            },
            ..headless(3)
        };

        let summary = run_with_backend(backend.clone(), &settings, ExitSignal::new()).unwrap();

        assert!(summary.sensor_connected);
        assert!(!backend.is_streaming(&DummyBackend::sensor_id()));
    }

    #[test]
    fn requested_exit_ends_unbounded_session() {
        let settings = ViewerSettings {
            max_cycles: None,
            ..headless(1)
        };
        let exit = ExitSignal::new();
        let requester = {
            let exit = exit.clone();
            std::thread::spawn(move || {
                std::thread::sleep(Duration::from_millis(50));
                exit.request();
            })
        };

        let summary = run_with_backend(Arc::new(NullBackend), &settings, exit).unwrap();
        requester.join().unwrap();

        assert!(summary.cycles > 0);
    }

    #[cfg(not(feature = "window"))]
    #[test]
    fn window_presenter_requires_feature() {
        let settings = ViewerSettings {
            presenter: PresenterKind::Window,
            ..headless(1)
        };
        let result = run_with_backend(Arc::new(NullBackend), &settings, ExitSignal::new());
        assert!(matches!(
            result,
            Err(AppError::Preview(PreviewError::WindowUnavailable))
        ));
    }
}
