use std::num::NonZero;

use crate::Unit;

// A poisoned lock means a panic happened while a registry was being mutated.
pub(crate) const ERR_POISONED_LOCK: &str = "encountered poisoned lock - timing data \
    can no longer be trusted to be consistent";

/// Joins scope names into a qualified path.
pub const PATH_SEPARATOR: &str = "/";

/// Width of each numeric report column unless configured otherwise.
pub(crate) const DEFAULT_COLUMN_WIDTH: NonZero<usize> =
    NonZero::new(20).expect("literal is not zero");

/// Significant digits used when rendering the mean of a path.
pub(crate) const MEAN_SIGNIFICANT_DIGITS: usize = 5;

/// Unit of profilers configured without an explicit unit or registry.
pub(crate) const DEFAULT_UNIT: Unit = Unit::Microseconds;
