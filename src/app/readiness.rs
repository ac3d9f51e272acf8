//! Measurement readiness flag shared with the interrupt context

use core::sync::atomic::{AtomicBool, Ordering};

/// Whether the sensor has a measurement that has not been read yet
///
/// Only the interrupt path sets it ([`ReadinessGate::signal`]) and only a
/// raw capture clears it. Several edges before a capture are seen as one.
/// Usually lives in a `static` so the interrupt task can borrow it.
#[derive(Debug, Default)]
pub struct ReadinessGate {
    ready: AtomicBool,
}

impl ReadinessGate {
    pub const fn new() -> Self {
        Self {
            ready: AtomicBool::new(false),
        }
    }

    /// Mark a measurement as ready. Safe to call from interrupt context.
    #[inline]
    pub fn signal(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Check for an unread measurement
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Mark the measurement as consumed
    pub(crate) fn consume(&self) {
        self.ready.store(false, Ordering::Release);
    }
}
