//! Cancellation and lifecycle state shared between the controller and the
//! search worker.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Cooperative stop flag. The controller raises it once the deadline has
/// passed; the worker polls it before expanding each child and at the top of
/// the root loop.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    stop: Arc<AtomicBool>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn should_stop(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn reset(&self) {
        self.stop.store(false, Ordering::Relaxed);
    }
}

/// Lifecycle of one engine instance:
/// `Idle -> Running -> (Stopped | WinFound) -> Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    Running,
    /// Ended by the stop flag, the depth cap or a lack of moves.
    Stopped,
    WinFound,
}

impl SearchPhase {
    #[inline]
    pub fn is_finished(self) -> bool {
        matches!(self, SearchPhase::Stopped | SearchPhase::WinFound)
    }
}
