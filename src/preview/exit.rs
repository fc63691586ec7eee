use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable exit request flag polled once per viewer cycle.
#[derive(Clone, Default)]
pub struct ExitSignal(Arc<AtomicBool>);

impl ExitSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the viewer loop to finish after the current cycle.
    pub fn request(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let signal = ExitSignal::new();
        let handle = signal.clone();
        assert!(!signal.is_requested());
        handle.request();
        assert!(signal.is_requested());
    }
}
