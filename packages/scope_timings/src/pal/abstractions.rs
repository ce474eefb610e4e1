//! Platform abstraction trait definitions.

use std::fmt::Debug;
use std::time::Duration;

/// Provides monotonic clock readings.
///
/// This trait abstracts the clock used to bracket measured regions, allowing for both
/// the real monotonic clock and fake implementations (for testing).
pub(crate) trait Platform: Debug + Send + Sync + 'static {
    /// Gets the current reading of the monotonic clock.
    ///
    /// The reading is the time elapsed since an arbitrary fixed origin and never decreases.
    fn monotonic_time(&self) -> Duration;
}
