//! Descriptive statistics over integer samples.
//!
//! Values are computed in `f64` so that sums of large samples never overflow.

/// The arithmetic mean, or `None` if there are no samples.
pub(crate) fn mean(samples: &[u64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "statistics are for display, small precision loss on huge values is acceptable"
    )]
    let (total, count) = (
        samples.iter().map(|sample| *sample as f64).sum::<f64>(),
        samples.len() as f64,
    );

    Some(total / count)
}

/// The sample standard deviation (divided by `n - 1`), or `None` with fewer than two samples.
pub(crate) fn std_dev(samples: &[u64]) -> Option<f64> {
    if samples.len() < 2 {
        return None;
    }

    let mean = mean(samples)?;

    #[expect(
        clippy::cast_precision_loss,
        reason = "statistics are for display, small precision loss on huge values is acceptable"
    )]
    let (squares, degrees_of_freedom) = (
        samples
            .iter()
            .map(|sample| {
                let deviation = *sample as f64 - mean;
                deviation * deviation
            })
            .sum::<f64>(),
        samples.len().saturating_sub(1) as f64,
    );

    Some((squares / degrees_of_freedom).sqrt())
}

/// The `q`-quantile of samples sorted ascending, with `q` in `0.0..=1.0`.
///
/// Interpolates linearly between the two closest ranks. Returns `None` if there are no samples
/// or `q` is out of range.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    reason = "ranks are non-negative and bounded by the sample count"
)]
pub(crate) fn percentile(sorted: &[u64], q: f64) -> Option<f64> {
    if !(0.0..=1.0).contains(&q) {
        return None;
    }

    let last_index = sorted.len().checked_sub(1)?;
    let rank = q * last_index as f64;

    let lower = *sorted.get(rank.floor() as usize)? as f64;
    let upper = *sorted.get(rank.ceil() as usize)? as f64;

    Some(lower + (upper - lower) * (rank - rank.floor()))
}
