//! Number formatting for report cells.

/// Formats `value` with `digits` significant digits in general notation.
///
/// Fixed notation is used unless the decimal exponent is below -4 or at least `digits`,
/// in which case scientific notation with a signed two-digit exponent is used (`1.2346e+06`).
/// Trailing zeros of the fraction are removed in both notations.
pub(crate) fn format_significant(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    if value == 0.0 {
        return "0".to_string();
    }

    let digits = digits.max(1);
    let fraction_digits = digits.saturating_sub(1);

    // Rounding to the requested precision may carry into the next power of ten,
    // so the exponent is taken from the already rounded scientific rendering.
    let scientific = format!("{value:.fraction_digits$e}");
    let (mantissa, exponent) = scientific
        .split_once('e')
        .expect("scientific formatting of a finite number always contains an exponent");
    let exponent: i64 = exponent
        .parse()
        .expect("scientific formatting always emits an integer exponent");

    let digits_exponent = i64::try_from(digits).unwrap_or(i64::MAX);

    if exponent < -4 || exponent >= digits_exponent {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!(
            "{}e{sign}{:02}",
            trim_fraction(mantissa),
            exponent.unsigned_abs()
        );
    }

    let decimals = usize::try_from(digits_exponent.saturating_sub(1).saturating_sub(exponent))
        .expect("exponent is below the digit count in fixed notation");

    trim_fraction(&format!("{value:.decimals$}")).to_string()
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn integers_have_no_fraction() {
        assert_eq!(format_significant(12.0, 5), "12");
        assert_eq!(format_significant(400.0, 5), "400");
    }

    #[test]
    fn rounds_to_significant_digits() {
        assert_eq!(format_significant(123.456, 5), "123.46");
        assert_eq!(format_significant(1.234_567, 5), "1.2346");
        assert_eq!(format_significant(12_345.4, 5), "12345");
    }

    #[test]
    fn large_values_use_scientific_notation() {
        assert_eq!(format_significant(1_234_567.0, 5), "1.2346e+06");
        assert_eq!(format_significant(100_000.0, 5), "1e+05");
    }

    #[test]
    fn rounding_carry_switches_notation() {
        assert_eq!(format_significant(99_999.9, 5), "1e+05");
    }

    #[test]
    fn small_values() {
        assert_eq!(format_significant(0.000_123_4, 5), "0.0001234");
        assert_eq!(format_significant(0.000_012_5, 5), "1.25e-05");
    }

    #[test]
    fn zero_and_negative() {
        assert_eq!(format_significant(0.0, 5), "0");
        assert_eq!(format_significant(-2.5, 5), "-2.5");
    }

    #[test]
    fn non_finite_values() {
        assert_eq!(format_significant(f64::NAN, 5), "NaN");
        assert_eq!(format_significant(f64::INFINITY, 5), "inf");
    }
}
