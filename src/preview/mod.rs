// Preview pipeline: shared screen surface, presentation loop and snapshots.

pub mod error;
pub mod exit;
pub mod presenter;
pub mod snapshot;
pub mod surface;
pub mod viewer;
#[cfg(feature = "window")]
pub mod window;
