// Diagnostics: frame-arrival counters for a viewer session.

pub mod stats;
