use thiserror::Error;

use crate::preview::error::PreviewError;
use crate::settings::store::SettingsError;

/// Top-level error for a viewer session.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Preview(#[from] PreviewError),
}
