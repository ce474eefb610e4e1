//! Real platform implementation backed by `std::time::Instant`.

use std::time::{Duration, Instant};

use crate::pal::abstractions::Platform;

/// Reads the monotonic clock of the operating system.
#[derive(Clone, Debug)]
pub(crate) struct RealPlatform {
    origin: Instant,
}

impl RealPlatform {
    pub(crate) fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Platform for RealPlatform {
    fn monotonic_time(&self) -> Duration {
        self.origin.elapsed()
    }
}
