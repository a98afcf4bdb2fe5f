use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Process-wide cooperative halt flag.
///
/// [`HaltSignal`] is a cloneable handle to a shared boolean that starts
/// false and is monotonic: once set it is never cleared within a run. It is
/// set when any fetch observes a critical HTTP status and by the service's
/// interrupt handler, and it is consulted by the walker before each ward and
/// sheet, by the coordinator before each batch, and by every fetch before
/// issuing network I/O.
///
/// Reads and writes use relaxed ordering: a worker that starts a request
/// just after the flag flips is acceptable, since halting is cooperative and
/// in-flight work is allowed to complete.
#[derive(Debug, Clone, Default)]
pub struct HaltSignal {
    halted: Arc<AtomicBool>,
}

impl HaltSignal {
    /// Creates a new, unset halt signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the halt signal.
    pub fn halt(&self) {
        self.halted.store(true, Ordering::Relaxed);
    }

    /// Returns whether the halt signal has been set.
    pub fn is_halted(&self) -> bool {
        self.halted.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::HaltSignal;

    #[test]
    fn halt_is_visible_through_clones() {
        let signal = HaltSignal::new();
        let observer = signal.clone();

        assert!(!observer.is_halted());
        signal.halt();
        assert!(observer.is_halted());
    }

    #[test]
    fn halt_is_monotonic() {
        let signal = HaltSignal::new();
        signal.halt();
        signal.halt();
        assert!(signal.is_halted());
    }
}
