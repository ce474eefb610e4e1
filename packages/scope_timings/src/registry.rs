use std::sync::Mutex;

use foldhash::{HashMap, HashMapExt};

use crate::{ERR_POISONED_LOCK, Report, Unit, statistics};

/// The samples recorded under one qualified path.
///
/// Samples are raw integer counts in the [`Unit`] of the registry that owns the session.
/// A session is created on the first sample for its path, so sessions inside a registry
/// are never empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TimingSession {
    samples: Vec<u64>,
}

impl TimingSession {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, sample: u64) {
        self.samples.push(sample);
    }

    /// All samples in the order they were recorded.
    #[must_use]
    pub fn samples(&self) -> &[u64] {
        &self.samples
    }

    /// Number of recorded samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no samples were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The smallest sample, or `None` if there are no samples.
    #[must_use]
    pub fn min(&self) -> Option<u64> {
        self.samples.iter().copied().min()
    }

    /// The largest sample, or `None` if there are no samples.
    #[must_use]
    pub fn max(&self) -> Option<u64> {
        self.samples.iter().copied().max()
    }

    /// The sum of all samples.
    #[must_use]
    pub fn sum(&self) -> u128 {
        self.samples.iter().copied().map(u128::from).sum()
    }

    /// The arithmetic mean of all samples, or `None` if there are no samples.
    ///
    /// The samples are accumulated as `f64` before dividing, so the result never overflows.
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        statistics::mean(&self.samples)
    }

    /// The sample standard deviation, or `None` if there are fewer than two samples.
    #[must_use]
    pub fn std_dev(&self) -> Option<f64> {
        statistics::std_dev(&self.samples)
    }

    /// The `q`-quantile of the samples for `q` in `0.0..=1.0`, for example `0.25` for the
    /// first quartile.
    ///
    /// Interpolates linearly between the two closest samples. Returns `None` if there are no
    /// samples or `q` is outside of `0.0..=1.0`.
    #[must_use]
    pub fn percentile(&self, q: f64) -> Option<f64> {
        let mut sorted = self.samples.clone();
        sorted.sort_unstable();

        statistics::percentile(&sorted, q)
    }

    /// The median of the samples, or `None` if there are no samples.
    #[must_use]
    pub fn median(&self) -> Option<f64> {
        self.percentile(0.5)
    }
}

/// Mapping from qualified path to the [`TimingSession`] recorded under that path.
///
/// A registry is bound to the [`Unit`] it was created with. It only ever grows: sessions are
/// created lazily on the first sample for a path and are never removed.
///
/// Registries can be shared between multiple [`ProfilerContext`][crate::ProfilerContext]
/// instances of the same unit via
/// [`ProfilerContextBuilder::registry()`][crate::ProfilerContextBuilder::registry].
///
/// # Examples
///
/// ```
/// use scope_timings::{TimingRegistry, Unit};
///
/// let registry = TimingRegistry::new(Unit::Microseconds);
/// registry.record("decode", 120);
/// registry.record("decode", 80);
///
/// let report = registry.snapshot();
/// let decode = report.get("decode").unwrap();
/// assert_eq!(decode.count(), 2);
/// assert_eq!(decode.max(), Some(120));
/// ```
#[derive(Debug)]
pub struct TimingRegistry {
    unit: Unit,
    sessions: Mutex<HashMap<String, TimingSession>>,
}

impl TimingRegistry {
    /// Creates an empty registry for samples recorded in `unit`.
    #[must_use]
    pub fn new(unit: Unit) -> Self {
        Self {
            unit,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// The unit of every sample in this registry.
    #[must_use]
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Appends `sample` to the session of `path`, creating the session if this is the first
    /// sample for the path.
    pub fn record(&self, path: &str, sample: u64) {
        let mut sessions = self.sessions.lock().expect(ERR_POISONED_LOCK);

        if let Some(session) = sessions.get_mut(path) {
            session.push(sample);
        } else {
            tracing::debug!(path, unit = %self.unit, "starting timing session");

            let mut session = TimingSession::new();
            session.push(sample);
            sessions.insert(path.to_string(), session);
        }

        tracing::trace!(path, sample, unit = %self.unit, "recorded sample");
    }

    /// Creates a report of all sessions, ordered by path.
    ///
    /// The registry itself is not modified.
    #[must_use]
    pub fn snapshot(&self) -> Report {
        let sessions = self.sessions.lock().expect(ERR_POISONED_LOCK);
        Report::from_sessions(self.unit, sessions.iter())
    }

    /// A copy of the session recorded under exactly `path`, if any.
    #[must_use]
    pub fn session(&self, path: &str) -> Option<TimingSession> {
        self.sessions
            .lock()
            .expect(ERR_POISONED_LOCK)
            .get(path)
            .cloned()
    }

    /// Number of distinct paths recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.lock().expect(ERR_POISONED_LOCK).len()
    }

    /// Whether no sample has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.lock().expect(ERR_POISONED_LOCK).is_empty()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn new_registry_is_empty() {
        let registry = TimingRegistry::new(Unit::Nanoseconds);

        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert_eq!(registry.unit(), Unit::Nanoseconds);
    }

    #[test]
    fn session_created_on_first_record() {
        let registry = TimingRegistry::new(Unit::Microseconds);
        assert!(registry.session("a").is_none());

        registry.record("a", 5);

        let session = registry.session("a").unwrap();
        assert_eq!(session.samples(), &[5]);
    }

    #[test]
    fn repeated_records_append_to_same_session() {
        let registry = TimingRegistry::new(Unit::Microseconds);

        for sample in 0..400 {
            registry.record("loop", sample);
        }

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.session("loop").unwrap().len(), 400);
    }

    #[test]
    fn lookup_is_by_exact_path() {
        let registry = TimingRegistry::new(Unit::Microseconds);
        registry.record("a/b", 1);
        registry.record("a", 2);
        registry.record("a/b/c", 3);

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.session("a").unwrap().samples(), &[2]);
        assert_eq!(registry.session("a/b").unwrap().samples(), &[1]);
    }

    #[test]
    fn session_statistics() {
        let mut session = TimingSession::new();
        for sample in [4, 8, 15, 16, 23, 42] {
            session.push(sample);
        }

        assert_eq!(session.min(), Some(4));
        assert_eq!(session.max(), Some(42));
        assert_eq!(session.sum(), 108);

        let mean = session.mean().unwrap();
        assert!((mean - 18.0).abs() < f64::EPSILON);

        let std_dev = session.std_dev().unwrap();
        assert!((std_dev - 182.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn session_quartiles_ignore_recording_order() {
        let mut session = TimingSession::new();
        for sample in [42, 15, 4, 23, 8, 16] {
            session.push(sample);
        }

        assert!((session.percentile(0.25).unwrap() - 9.75).abs() < 1e-9);
        assert!((session.median().unwrap() - 15.5).abs() < 1e-9);
        assert!((session.percentile(0.75).unwrap() - 21.25).abs() < 1e-9);

        // Recording order is preserved.
        assert_eq!(session.samples(), &[42, 15, 4, 23, 8, 16]);
    }

    #[test]
    fn empty_session_has_no_statistics() {
        let session = TimingSession::new();

        assert_eq!(session.min(), None);
        assert_eq!(session.max(), None);
        assert_eq!(session.mean(), None);
        assert_eq!(session.std_dev(), None);
        assert_eq!(session.median(), None);
        assert_eq!(session.sum(), 0);
    }

    #[test]
    fn mean_does_not_overflow() {
        let mut session = TimingSession::new();
        session.push(u64::MAX);
        session.push(u64::MAX);

        let mean = session.mean().unwrap();
        assert!(mean > 1.0e19);
    }

    #[test]
    fn records_from_many_threads_merge() {
        let registry = Arc::new(TimingRegistry::new(Unit::Microseconds));

        let handles = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    for sample in 0..100 {
                        registry.record("shared", sample);
                    }
                })
            })
            .collect::<Vec<_>>();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.session("shared").unwrap().len(), 400);
    }

    static_assertions::assert_impl_all!(TimingRegistry: Send, Sync);
    static_assertions::assert_impl_all!(TimingSession: Send, Sync);
}
