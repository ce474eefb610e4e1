//! Measured scopes.

use std::marker::PhantomData;
use std::time::Duration;

use crate::pal::Platform;
use crate::{PATH_SEPARATOR, ProfilerContext, with_thread_stack};

/// A measured region of code that records its wall-clock duration when dropped.
///
/// Created by [`ProfilerContext::open_scope()`]. On creation the scope name is pushed onto the
/// scope stack of the current thread and the qualified path of the scope is fixed. On drop,
/// the elapsed time is recorded under that path and the name is removed from the stack again.
/// This happens on every exit path from the region, including early returns and unwinding.
///
/// Guards must be dropped in reverse order of creation. A guard cannot be sent to another
/// thread because it belongs to the scope stack of the thread that created it.
///
/// # Examples
///
/// ```
/// use scope_timings::{ProfilerContext, Unit};
///
/// let profiler = ProfilerContext::new(Unit::Microseconds);
///
/// fn parse(profiler: &ProfilerContext, input: &str) -> Option<u32> {
///     let _scope = profiler.open_scope("parse").unwrap();
///
///     // The early return still records the duration of the scope.
///     let value = input.parse().ok()?;
///     Some(value)
/// }
///
/// assert_eq!(parse(&profiler, "12"), Some(12));
/// assert_eq!(parse(&profiler, "twelve"), None);
///
/// assert_eq!(profiler.to_report().get("parse").unwrap().count(), 2);
/// ```
#[derive(Debug)]
#[must_use = "Measurements are taken between creation and drop"]
pub struct ScopeGuard {
    context: ProfilerContext,
    name: String,
    path: String,
    start_time: Duration,

    _single_threaded: PhantomData<*const ()>,
}

impl ScopeGuard {
    pub(crate) fn new(context: ProfilerContext, name: String) -> Self {
        let start_time = context.platform().monotonic_time();

        // Without a scope stack the scope is measured as if it were outermost.
        let path = with_thread_stack(context.stack_key(), |stack| {
            stack.push(name.as_str());
            stack.current_path(PATH_SEPARATOR)
        })
        .unwrap_or_else(|| name.clone());

        Self {
            context,
            name,
            path,
            start_time,
            _single_threaded: PhantomData,
        }
    }

    /// The name this scope was opened with.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The qualified path under which the duration of this scope is recorded.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    fn elapsed(&self) -> Duration {
        self.context
            .platform()
            .monotonic_time()
            .saturating_sub(self.start_time)
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        let sample = self.context.unit().count(self.elapsed());
        self.context.registry().record(&self.path, sample);

        match with_thread_stack(self.context.stack_key(), |stack| stack.pop()) {
            Some(Ok(popped)) if popped != self.name => {
                tracing::warn!(
                    path = %self.path,
                    expected = %self.name,
                    released = %popped,
                    "scopes were released out of order"
                );
            }
            Some(Ok(_)) => {}
            Some(Err(_)) => self.context.record_stack_underflow(&self.path),
            None => {
                // The scope stacks of this thread are already gone, nothing is left to pop.
                tracing::debug!(
                    path = %self.path,
                    "released a scope during thread teardown"
                );
            }
        }
    }
}
