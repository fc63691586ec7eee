// Sensor domain: discovery, stream lifecycle and frame delivery.

pub mod backend;
pub mod chooser;
pub mod dummy;
pub mod error;
pub mod types;
