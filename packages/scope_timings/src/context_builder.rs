use std::num::NonZero;
use std::sync::Arc;

use crate::pal::PlatformFacade;
use crate::{
    DEFAULT_COLUMN_WIDTH, DEFAULT_UNIT, Error, ProfilerContext, Result, TimingRegistry, Unit,
};

/// Creates instances of [`ProfilerContext`].
///
/// All parameters are optional:
/// * `unit` - defaults to the unit of the supplied registry, or [`Unit::Microseconds`]
/// * `column_width` - width of numeric report columns, defaults to 20
/// * `registry` - defaults to a new registry owned by the profiler
///
/// Use `ProfilerContext::builder()` to create a new instance of this builder.
#[derive(Debug)]
#[must_use]
pub struct ProfilerContextBuilder {
    unit: Option<Unit>,
    column_width: NonZero<usize>,
    registry: Option<Arc<TimingRegistry>>,
    platform: Option<PlatformFacade>,
}

impl ProfilerContextBuilder {
    pub(crate) fn new() -> Self {
        Self {
            unit: None,
            column_width: DEFAULT_COLUMN_WIDTH,
            registry: None,
            platform: None,
        }
    }

    /// Sets the unit in which samples are recorded and displayed.
    pub fn unit(self, unit: Unit) -> Self {
        Self {
            unit: Some(unit),
            ..self
        }
    }

    /// Sets the width of each numeric column in rendered reports.
    ///
    /// Values wider than the column are rendered in full, breaking the alignment of their row.
    pub fn column_width(self, column_width: NonZero<usize>) -> Self {
        Self {
            column_width,
            ..self
        }
    }

    /// Records samples into an existing registry, which may be shared with other profilers.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    ///
    /// use scope_timings::{ProfilerContext, TimingRegistry, Unit};
    ///
    /// let registry = Arc::new(TimingRegistry::new(Unit::Milliseconds));
    ///
    /// let first = ProfilerContext::builder()
    ///     .registry(Arc::clone(&registry))
    ///     .build()
    ///     .unwrap();
    ///
    /// // A differently configured unit over the same registry is refused.
    /// let second = ProfilerContext::builder()
    ///     .unit(Unit::Nanoseconds)
    ///     .registry(registry)
    ///     .build();
    ///
    /// assert_eq!(first.unit(), Unit::Milliseconds);
    /// assert!(second.is_err());
    /// ```
    pub fn registry(self, registry: Arc<TimingRegistry>) -> Self {
        Self {
            registry: Some(registry),
            ..self
        }
    }

    #[cfg(test)]
    pub(crate) fn platform(self, platform: PlatformFacade) -> Self {
        Self {
            platform: Some(platform),
            ..self
        }
    }

    /// Creates the profiler.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnitMismatch`] if both a unit and a registry were supplied and the
    /// registry records a different unit.
    pub fn build(self) -> Result<ProfilerContext> {
        let unit = match (self.unit, &self.registry) {
            (Some(unit), Some(registry)) if registry.unit() != unit => {
                return Err(Error::UnitMismatch {
                    registry: registry.unit(),
                    requested: unit,
                });
            }
            (Some(unit), _) => unit,
            (None, Some(registry)) => registry.unit(),
            (None, None) => DEFAULT_UNIT,
        };

        let registry = self
            .registry
            .unwrap_or_else(|| Arc::new(TimingRegistry::new(unit)));

        Ok(ProfilerContext::from_parts(
            unit,
            registry,
            self.column_width,
            self.platform.unwrap_or_else(PlatformFacade::real),
        ))
    }
}
