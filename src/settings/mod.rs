// Settings: viewer configuration loaded once at startup.

pub mod store;
pub mod types;
