use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::settings::types::ViewerSettings;

/// Settings file errors.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// JSON-backed viewer settings file.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and validate settings, returning defaults when the file is missing.
    pub fn load(&self) -> Result<ViewerSettings, SettingsError> {
        let settings = if self.path.exists() {
            let contents = std::fs::read_to_string(&self.path)?;
            serde_json::from_str(&contents)?
        } else {
            ViewerSettings::default()
        };
        settings.validate().map_err(SettingsError::Invalid)?;
        Ok(settings)
    }

    /// Save settings atomically (write .tmp then rename).
    pub fn save(&self, settings: &ViewerSettings) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(settings)?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, &json)?;
        std::fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }
}
