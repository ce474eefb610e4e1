//! Fake platform implementation for testing.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::pal::abstractions::Platform;

/// Fake implementation of the platform abstraction for testing.
///
/// This implementation allows tests to control the clock readings instead of relying on
/// the real clock. Multiple clones of the same `FakePlatform` share the same underlying
/// time, allowing tests to move time forward while a scope is open.
#[derive(Clone, Debug)]
pub(crate) struct FakePlatform {
    time: Arc<Mutex<Duration>>,
}

impl FakePlatform {
    /// Creates a new fake platform whose clock reads zero.
    pub(crate) fn new() -> Self {
        Self {
            time: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    /// Sets the clock reading. This affects all clones of this platform.
    pub(crate) fn set_time(&self, time: Duration) {
        *self
            .time
            .lock()
            .expect("FakePlatform state lock should not be poisoned") = time;
    }

    /// Moves the clock forward by the given amount. This affects all clones of this platform.
    pub(crate) fn advance(&self, by: Duration) {
        let mut time = self
            .time
            .lock()
            .expect("FakePlatform state lock should not be poisoned");

        *time = time.saturating_add(by);
    }
}

impl Platform for FakePlatform {
    fn monotonic_time(&self) -> Duration {
        *self
            .time
            .lock()
            .expect("FakePlatform state lock should not be poisoned")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn initializes_with_zero_time() {
        let platform = FakePlatform::new();
        assert_eq!(platform.monotonic_time(), Duration::ZERO);
    }

    #[test]
    fn advances_time() {
        let platform = FakePlatform::new();
        platform.set_time(Duration::from_millis(100));
        platform.advance(Duration::from_millis(50));

        assert_eq!(platform.monotonic_time(), Duration::from_millis(150));
    }

    #[test]
    fn shared_state_between_clones() {
        let platform1 = FakePlatform::new();
        let platform2 = platform1.clone();

        platform1.set_time(Duration::from_millis(100));
        assert_eq!(platform2.monotonic_time(), Duration::from_millis(100));
    }
}
