use std::process::ExitCode;

use sensorview_lib::settings::store::SettingsStore;
use tracing::{error, info};

const DEFAULT_SETTINGS_PATH: &str = "sensorview.json";

fn main() -> ExitCode {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string());
    let store = SettingsStore::new(path);
    let settings = match store.load() {
        Ok(settings) => settings,
        Err(e) => {
            error!("failed to load {}: {e}", store.path().display());
            return ExitCode::FAILURE;
        }
    };

    info!(
        "screen {}x{}, sensor {}x{} @ {}fps",
        settings.screen.width,
        settings.screen.height,
        settings.sensor.width,
        settings.sensor.height,
        settings.sensor.fps
    );

    match sensorview_lib::run(&settings) {
        Ok(summary) => {
            info!(
                "{} frames at {:.1} fps, last remap {:.2} ms",
                summary.diagnostics.frame_count, summary.diagnostics.fps, summary.diagnostics.remap_ms
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
