//! Process-wide profilers, one per unit.

use std::sync::LazyLock;

use crate::{ProfilerContext, Result, ScopeGuard, Unit};

static MILLISECONDS: LazyLock<ProfilerContext> =
    LazyLock::new(|| ProfilerContext::new(Unit::Milliseconds));
static MICROSECONDS: LazyLock<ProfilerContext> =
    LazyLock::new(|| ProfilerContext::new(Unit::Microseconds));
static NANOSECONDS: LazyLock<ProfilerContext> =
    LazyLock::new(|| ProfilerContext::new(Unit::Nanoseconds));

/// The process-wide profiler that records samples in `unit`.
///
/// Each unit has its own profiler with its own registry, so samples of different units are
/// never mixed. The profilers live until the process exits.
#[must_use]
pub fn global_context(unit: Unit) -> &'static ProfilerContext {
    match unit {
        Unit::Milliseconds => &MILLISECONDS,
        Unit::Microseconds => &MICROSECONDS,
        Unit::Nanoseconds => &NANOSECONDS,
    }
}

/// Opens a measured scope in the process-wide profiler of `unit`.
///
/// # Errors
///
/// Returns [`Error::EmptyScopeName`][crate::Error::EmptyScopeName] if `name` is empty or
/// consists only of whitespace.
///
/// # Examples
///
/// ```
/// use scope_timings::{Unit, global_context, open_scope};
///
/// for _ in 0..4 {
///     let _scope = open_scope("binning_2x2", Unit::Microseconds).unwrap();
///     std::hint::black_box([1_u8, 2, 3, 4].iter().map(|p| u16::from(*p)).sum::<u16>() / 4);
/// }
///
/// let report = global_context(Unit::Microseconds).to_report();
/// assert!(report.get("binning_2x2").unwrap().count() >= 4);
/// ```
pub fn open_scope(name: impl Into<String>, unit: Unit) -> Result<ScopeGuard> {
    global_context(unit).open_scope(name)
}

/// Prints the statistics of the process-wide profiler of `unit` to stdout.
#[cfg_attr(test, mutants::skip)] // Too difficult to test stdout output reliably - manually tested.
pub fn print_report(unit: Unit) {
    global_context(unit).print_report();
}
