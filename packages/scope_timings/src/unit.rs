use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::Error;

/// The resolution in which a profiler records its samples.
///
/// The unit is fixed for the lifetime of a [`ProfilerContext`][crate::ProfilerContext] and of the
/// [`TimingRegistry`][crate::TimingRegistry] it writes into. Samples of different units are never
/// mixed because their values are not comparable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Unit {
    /// Whole milliseconds, displayed as `ms`.
    Milliseconds,

    /// Whole microseconds, displayed as `us`.
    Microseconds,

    /// Whole nanoseconds, displayed as `ns`.
    Nanoseconds,
}

impl Unit {
    /// All supported units, from the coarsest to the finest resolution.
    pub const ALL: [Self; 3] = [Self::Milliseconds, Self::Microseconds, Self::Nanoseconds];

    /// The suffix used when displaying values recorded in this unit.
    ///
    /// # Examples
    ///
    /// ```
    /// use scope_timings::Unit;
    ///
    /// assert_eq!(Unit::Microseconds.suffix(), "us");
    /// ```
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Milliseconds => "ms",
            Self::Microseconds => "us",
            Self::Nanoseconds => "ns",
        }
    }

    /// Converts an elapsed duration into a whole number of this unit.
    ///
    /// Fractions of the unit are truncated. Durations that do not fit into a `u64` saturate.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    ///
    /// use scope_timings::Unit;
    ///
    /// assert_eq!(Unit::Milliseconds.count(Duration::from_micros(2_999)), 2);
    /// ```
    #[must_use]
    pub fn count(self, duration: Duration) -> u64 {
        let count = match self {
            Self::Milliseconds => duration.as_millis(),
            Self::Microseconds => duration.as_micros(),
            Self::Nanoseconds => duration.as_nanos(),
        };

        u64::try_from(count).unwrap_or(u64::MAX)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for Unit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ms" | "millis" | "milliseconds" => Ok(Self::Milliseconds),
            "us" | "micros" | "microseconds" => Ok(Self::Microseconds),
            "ns" | "nanos" | "nanoseconds" => Ok(Self::Nanoseconds),
            _ => Err(Error::UnknownUnit {
                value: s.to_string(),
            }),
        }
    }
}
