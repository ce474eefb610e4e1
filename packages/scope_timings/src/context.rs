use std::fmt;
use std::num::NonZero;
use std::sync::Arc;
use std::sync::atomic::{self, AtomicU64};

use crate::pal::PlatformFacade;
use crate::{
    DEFAULT_COLUMN_WIDTH, Error, ProfilerContextBuilder, Report, Result, ScopeGuard, StackKey,
    TimingRegistry, Unit, with_thread_stack,
};

/// Owns the configuration and the timing registry of one profiler.
///
/// Scopes are opened via [`open_scope()`][Self::open_scope]. Each returned [`ScopeGuard`]
/// measures the wall-clock time until it is dropped and records the result under its
/// qualified path. Independent contexts never see each other's scopes or samples unless
/// they were explicitly built over the same [`TimingRegistry`].
///
/// Cloning a context is cheap and yields a handle to the same profiler.
///
/// # Examples
///
/// ```
/// use scope_timings::{ProfilerContext, Unit};
///
/// let profiler = ProfilerContext::new(Unit::Microseconds);
///
/// {
///     let _load = profiler.open_scope("load").unwrap();
///
///     for _ in 0..3 {
///         let _parse = profiler.open_scope("parse").unwrap();
///         std::hint::black_box((0..100).sum::<u32>());
///     }
/// }
///
/// let report = profiler.to_report();
/// assert_eq!(report.get("load").unwrap().count(), 1);
/// assert_eq!(report.get("load/parse").unwrap().count(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct ProfilerContext {
    shared: Arc<ProfilerShared>,
}

#[derive(Debug)]
struct ProfilerShared {
    unit: Unit,
    registry: Arc<TimingRegistry>,
    column_width: NonZero<usize>,
    platform: PlatformFacade,

    // Every thread keeps its own scope stack for this profiler under this key.
    stack_key: StackKey,

    stack_underflows: AtomicU64,
}

impl ProfilerContext {
    /// Creates a profiler with its own registry that records samples in `unit`.
    #[must_use]
    pub fn new(unit: Unit) -> Self {
        Self::from_parts(
            unit,
            Arc::new(TimingRegistry::new(unit)),
            DEFAULT_COLUMN_WIDTH,
            PlatformFacade::real(),
        )
    }

    /// Creates a builder to configure a profiler.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::num::NonZero;
    ///
    /// use scope_timings::{ProfilerContext, Unit};
    ///
    /// let profiler = ProfilerContext::builder()
    ///     .unit(Unit::Nanoseconds)
    ///     .column_width(NonZero::new(12).unwrap())
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(profiler.unit(), Unit::Nanoseconds);
    /// ```
    pub fn builder() -> ProfilerContextBuilder {
        ProfilerContextBuilder::new()
    }

    pub(crate) fn from_parts(
        unit: Unit,
        registry: Arc<TimingRegistry>,
        column_width: NonZero<usize>,
        platform: PlatformFacade,
    ) -> Self {
        Self {
            shared: Arc::new(ProfilerShared {
                unit,
                registry,
                column_width,
                platform,
                stack_key: StackKey::next(),
                stack_underflows: AtomicU64::new(0),
            }),
        }
    }

    /// Opens a measured scope named `name` on the current thread.
    ///
    /// The scope is closed and its duration recorded when the returned guard is dropped.
    /// Guards must be dropped in reverse order of creation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyScopeName`] if `name` is empty or consists only of whitespace.
    ///
    /// # Examples
    ///
    /// ```
    /// use scope_timings::{ProfilerContext, Unit};
    ///
    /// let profiler = ProfilerContext::new(Unit::Microseconds);
    ///
    /// let outer = profiler.open_scope("a").unwrap();
    /// let inner = profiler.open_scope("b").unwrap();
    /// assert_eq!(inner.path(), "a/b");
    ///
    /// drop(inner);
    /// drop(outer);
    /// assert_eq!(profiler.stack_depth(), 0);
    /// ```
    pub fn open_scope(&self, name: impl Into<String>) -> Result<ScopeGuard> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(Error::EmptyScopeName);
        }

        Ok(ScopeGuard::new(self.clone(), name))
    }

    /// Measures the execution of `f` as a scope named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyScopeName`] if `name` is empty or consists only of whitespace,
    /// in which case `f` is not executed.
    ///
    /// # Examples
    ///
    /// ```
    /// use scope_timings::{ProfilerContext, Unit};
    ///
    /// let profiler = ProfilerContext::new(Unit::Nanoseconds);
    ///
    /// let sum = profiler.measure("sum", || (0..1000).sum::<u64>()).unwrap();
    /// assert_eq!(sum, 499_500);
    /// ```
    pub fn measure<R>(&self, name: impl Into<String>, f: impl FnOnce() -> R) -> Result<R> {
        let _scope = self.open_scope(name)?;
        Ok(f())
    }

    /// The unit in which this profiler records samples.
    #[must_use]
    pub fn unit(&self) -> Unit {
        self.shared.unit
    }

    /// The registry that receives the samples of this profiler.
    #[must_use]
    pub fn registry(&self) -> &Arc<TimingRegistry> {
        &self.shared.registry
    }

    /// Creates a report of everything recorded in the registry so far.
    #[must_use]
    pub fn to_report(&self) -> Report {
        self.shared
            .registry
            .snapshot()
            .with_column_width(self.shared.column_width)
    }

    /// Prints the statistics of all qualified paths to stdout.
    ///
    /// This is equivalent to `self.to_report().print_to_stdout()`.
    #[cfg_attr(test, mutants::skip)] // Too difficult to test stdout output reliably - manually tested.
    pub fn print_report(&self) {
        self.to_report().print_to_stdout();
    }

    /// Number of scopes of this profiler currently open on the calling thread.
    #[must_use]
    pub fn stack_depth(&self) -> usize {
        with_thread_stack(self.shared.stack_key, |stack| stack.len())
            .unwrap_or_default()
    }

    /// Number of times a scope was released while the scope stack was already empty.
    ///
    /// A non-zero value indicates a lifecycle bug in the instrumented code.
    #[must_use]
    pub fn stack_underflows(&self) -> u64 {
        self.shared.stack_underflows.load(atomic::Ordering::Relaxed)
    }

    pub(crate) fn platform(&self) -> &PlatformFacade {
        &self.shared.platform
    }

    pub(crate) fn stack_key(&self) -> StackKey {
        self.shared.stack_key
    }

    pub(crate) fn record_stack_underflow(&self, path: &str) {
        self.shared
            .stack_underflows
            .fetch_add(1, atomic::Ordering::Relaxed);

        tracing::warn!(
            path,
            error = %Error::StackUnderflow,
            "released a scope while the scope stack was empty"
        );
    }
}

impl fmt::Display for ProfilerContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_report())
    }
}
