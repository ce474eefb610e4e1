//! Timing reports.

use std::fmt::{self, Display};
use std::num::NonZero;

use crate::format::format_significant;
use crate::{
    DEFAULT_COLUMN_WIDTH, Error, MEAN_SIGNIFICANT_DIGITS, Result, TimingSession, Unit, statistics,
};

const NAME_HEADER: &str = "name";
const VALUE_HEADERS: [&str; 4] = ["min", "max", "avg", "sample count"];

/// Rendered in place of a statistic that does not exist because a path has no samples.
const NO_DATA: &str = "-";

/// A snapshot of the statistics of every qualified path in a registry.
///
/// For human-readable output, use the `Display` trait implementation, which renders an
/// aligned ASCII table. For machine-readable output, inspect the report via [`paths()`][1].
///
/// Reports are immutable and can be sent to other threads.
///
/// # Examples
///
/// ```
/// use scope_timings::{ProfilerContext, Unit};
///
/// let profiler = ProfilerContext::new(Unit::Nanoseconds);
/// {
///     let _scope = profiler.open_scope("work").unwrap();
///     std::hint::black_box(42);
/// }
///
/// let report = profiler.to_report();
/// for path in report.paths() {
///     println!("{}: {} samples", path.path(), path.count());
/// }
///
/// println!("{report}");
/// ```
///
/// [1]: Report::paths
#[derive(Clone, Debug)]
pub struct Report {
    unit: Unit,
    column_width: NonZero<usize>,

    // Sorted by path, ascending.
    paths: Box<[PathStatistics]>,
}

impl Report {
    pub(crate) fn from_sessions<'a>(
        unit: Unit,
        sessions: impl Iterator<Item = (&'a String, &'a TimingSession)>,
    ) -> Self {
        let mut paths = sessions
            .map(|(path, session)| PathStatistics::from_session(path.clone(), session))
            .collect::<Vec<_>>();

        paths.sort_by(|a, b| a.path.cmp(&b.path));

        Self {
            unit,
            column_width: DEFAULT_COLUMN_WIDTH,
            paths: paths.into_boxed_slice(),
        }
    }

    /// Returns the same report rendered with numeric columns of the given width.
    #[must_use]
    pub fn with_column_width(self, column_width: NonZero<usize>) -> Self {
        Self {
            column_width,
            ..self
        }
    }

    /// The unit of every value in this report.
    #[must_use]
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// The width of each numeric column when rendered.
    #[must_use]
    pub fn column_width(&self) -> NonZero<usize> {
        self.column_width
    }

    /// Iterates over the statistics of every path, ordered by path.
    pub fn paths(&self) -> impl Iterator<Item = &PathStatistics> {
        self.paths.iter()
    }

    /// The statistics recorded under exactly `path`, if any.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&PathStatistics> {
        self.paths
            .binary_search_by(|candidate| candidate.path.as_str().cmp(path))
            .ok()
            .and_then(|index| self.paths.get(index))
    }

    /// Number of paths in the report.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether the report contains no paths.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Merges two reports into a new report.
    ///
    /// Paths present in both reports have their samples combined, so every statistic of the
    /// merged report, including the standard deviation and percentiles, is the same as if all
    /// samples had been recorded into one registry. The merged report uses the wider column
    /// width.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnitMismatch`] if the reports were recorded in different units.
    ///
    /// # Examples
    ///
    /// ```
    /// use scope_timings::{Report, TimingRegistry, Unit};
    ///
    /// let first = TimingRegistry::new(Unit::Microseconds);
    /// first.record("work", 10);
    ///
    /// let second = TimingRegistry::new(Unit::Microseconds);
    /// second.record("work", 30);
    ///
    /// let merged = Report::merge(&first.snapshot(), &second.snapshot()).unwrap();
    /// assert_eq!(merged.get("work").unwrap().count(), 2);
    /// ```
    pub fn merge(a: &Self, b: &Self) -> Result<Self> {
        if a.unit != b.unit {
            return Err(Error::UnitMismatch {
                registry: a.unit,
                requested: b.unit,
            });
        }

        let mut paths = a.paths.to_vec();

        for b_path in &b.paths {
            match paths.binary_search_by(|candidate| candidate.path.cmp(&b_path.path)) {
                Ok(index) => {
                    let a_path = paths
                        .get_mut(index)
                        .expect("binary search returned an index of an existing item");
                    a_path.merge_from(b_path);
                }
                Err(index) => paths.insert(index, b_path.clone()),
            }
        }

        Ok(Self {
            unit: a.unit,
            column_width: a.column_width.max(b.column_width),
            paths: paths.into_boxed_slice(),
        })
    }

    /// Prints the report table to stdout.
    ///
    /// The header and the borders of the table are printed even if the report is empty.
    #[cfg_attr(test, mutants::skip)] // Too difficult to test stdout output reliably - manually tested.
    pub fn print_to_stdout(&self) {
        print!("{self}");
    }

    fn name_width(&self) -> usize {
        self.paths
            .iter()
            .map(|path| path.path.chars().count())
            .chain([NAME_HEADER.len()])
            .max()
            .unwrap_or(NAME_HEADER.len())
    }

    fn write_rule(
        &self,
        f: &mut fmt::Formatter<'_>,
        name_width: usize,
        border: bool,
    ) -> fmt::Result {
        let separator = if border { "+" } else { "|" };
        let column = "-".repeat(self.column_width.get());

        write!(f, "{}{separator}", "-".repeat(name_width))?;

        let columns = vec![column; VALUE_HEADERS.len()];
        writeln!(f, "{}|", columns.join(separator))
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name_width = self.name_width();
        let width = self.column_width.get();

        writeln!(f, "Timings: (unit={})", self.unit)?;

        self.write_rule(f, name_width, true)?;

        write!(f, "{NAME_HEADER:>name_width$}|")?;
        for header in VALUE_HEADERS {
            write!(f, "{header:>width$}|")?;
        }
        writeln!(f)?;

        self.write_rule(f, name_width, false)?;

        for path in &self.paths {
            let min = path.min().map_or_else(|| NO_DATA.to_string(), |min| min.to_string());
            let max = path.max().map_or_else(|| NO_DATA.to_string(), |max| max.to_string());
            let mean = path.mean().map_or_else(
                || NO_DATA.to_string(),
                |mean| format_significant(mean, MEAN_SIGNIFICANT_DIGITS),
            );

            writeln!(
                f,
                "{:<name_width$}|{min:>width$}|{max:>width$}|{mean:>width$}|{:>width$}|",
                path.path,
                path.count()
            )?;
        }

        self.write_rule(f, name_width, true)
    }
}

/// Statistics of the samples recorded under one qualified path.
///
/// Part of a [`Report`]. The samples are kept so that merged reports yield the same
/// statistics as if every sample had been recorded into one registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathStatistics {
    path: String,

    // Sorted ascending.
    samples: Box<[u64]>,
}

impl PathStatistics {
    fn from_session(path: String, session: &TimingSession) -> Self {
        let mut samples = session.samples().to_vec();
        samples.sort_unstable();

        Self {
            path,
            samples: samples.into_boxed_slice(),
        }
    }

    fn merge_from(&mut self, other: &Self) {
        let capacity = self.samples.len().saturating_add(other.samples.len());
        let mut samples = Vec::with_capacity(capacity);
        samples.extend_from_slice(&self.samples);
        samples.extend_from_slice(&other.samples);
        samples.sort_unstable();

        self.samples = samples.into_boxed_slice();
    }

    /// The qualified path, scope names joined outer to inner with `/`.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Number of samples recorded under the path.
    #[must_use]
    pub fn count(&self) -> u64 {
        u64::try_from(self.samples.len()).unwrap_or(u64::MAX)
    }

    /// Sum of all samples.
    #[must_use]
    pub fn sum(&self) -> u128 {
        self.samples.iter().copied().map(u128::from).sum()
    }

    /// The smallest sample. `None` if there are no samples.
    #[must_use]
    pub fn min(&self) -> Option<u64> {
        self.samples.first().copied()
    }

    /// The largest sample. `None` if there are no samples.
    #[must_use]
    pub fn max(&self) -> Option<u64> {
        self.samples.last().copied()
    }

    /// The arithmetic mean of all samples. `None` if there are no samples.
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        statistics::mean(&self.samples)
    }

    /// The sample standard deviation. `None` if there are fewer than two samples.
    #[must_use]
    pub fn std_dev(&self) -> Option<f64> {
        statistics::std_dev(&self.samples)
    }

    /// The `q`-quantile of the samples for `q` in `0.0..=1.0`, interpolated linearly between
    /// the two closest samples. `None` if there are no samples or `q` is out of range.
    #[must_use]
    pub fn percentile(&self, q: f64) -> Option<f64> {
        statistics::percentile(&self.samples, q)
    }

    /// The median of the samples. `None` if there are no samples.
    #[must_use]
    pub fn median(&self) -> Option<f64> {
        self.percentile(0.5)
    }
}
