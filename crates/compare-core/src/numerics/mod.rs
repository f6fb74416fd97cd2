use serde::Serialize;

/// Absolute and relative thresholds applied per value pair. A pair fails
/// when either difference strictly exceeds its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericTolerance {
    pub abs_tol: f64,
    pub rel_tol: f64,
}

impl NumericTolerance {
    pub const DEFAULT: Self = Self {
        abs_tol: 0.05,
        rel_tol: 0.0001,
    };
}

impl Default for NumericTolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueComparison {
    pub abs_diff: f64,
    pub rel_diff: f64,
    pub exceeds: bool,
}

/// Relative difference against the reference magnitude. Collapses to the
/// absolute difference when the reference is exactly zero.
pub fn relative_difference(reference: f64, test: f64) -> f64 {
    let abs_diff = (reference - test).abs();
    if reference != 0.0 {
        abs_diff / reference.abs()
    } else {
        abs_diff
    }
}

pub fn compare_with_tolerance(
    reference: f64,
    test: f64,
    tolerance: NumericTolerance,
) -> ValueComparison {
    let abs_diff = (reference - test).abs();
    let rel_diff = relative_difference(reference, test);
    let exceeds = abs_diff > tolerance.abs_tol || rel_diff > tolerance.rel_tol;

    ValueComparison {
        abs_diff,
        rel_diff,
        exceeds,
    }
}

/// Shortest round-trip rendering with a signed two-digit exponent outside
/// `[1e-4, 1e16)`, e.g. `1.0`, `0.0002`, `1e-05`, `1.5e+20`.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let rendered = format!("{value:?}");
    match rendered.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent.trim_start_matches('+')),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => rendered,
    }
}

#[cfg(test)]
mod tests {
    use super::{NumericTolerance, compare_with_tolerance, format_float, relative_difference};

    #[test]
    fn relative_difference_collapses_to_absolute_for_zero_reference() {
        assert_eq!(relative_difference(0.0, 0.03), 0.03);
        assert_eq!(relative_difference(0.0, -0.5), 0.5);
        assert!((relative_difference(100.0, 100.02) - 0.0002).abs() < 1.0e-12);
        assert!((relative_difference(-4.0, -2.0) - 0.5).abs() < 1.0e-12);
    }

    #[test]
    fn either_threshold_marks_a_value_as_exceeding() {
        let tolerance = NumericTolerance::DEFAULT;

        let absolute = compare_with_tolerance(1.0, 1.10, tolerance);
        assert!(absolute.exceeds);
        assert!((absolute.abs_diff - 0.10).abs() < 1.0e-12);

        let relative = compare_with_tolerance(100.0, 100.02, tolerance);
        assert!(relative.abs_diff <= tolerance.abs_tol);
        assert!(relative.exceeds);

        let close = compare_with_tolerance(1.0, 1.00001, tolerance);
        assert!(!close.exceeds);
    }

    #[test]
    fn zero_reference_only_fails_on_absolute_threshold() {
        let tolerance = NumericTolerance::DEFAULT;
        assert!(!compare_with_tolerance(0.0, 0.03, tolerance).exceeds);
        assert!(compare_with_tolerance(0.0, 0.06, tolerance).exceeds);
    }

    #[test]
    fn values_on_the_threshold_pass() {
        let tolerance = NumericTolerance {
            abs_tol: 0.5,
            rel_tol: 1.0,
        };
        assert!(!compare_with_tolerance(1.0, 1.5, tolerance).exceeds);
        assert!(compare_with_tolerance(1.0, 1.75, tolerance).exceeds);
    }

    #[test]
    fn format_float_uses_shortest_digits_and_signed_exponents() {
        assert_eq!(format_float(1.0), "1.0");
        assert_eq!(format_float(-0.5), "-0.5");
        assert_eq!(format_float(100.02), "100.02");
        assert_eq!(format_float(0.0001), "0.0001");
        assert_eq!(format_float(1.0e20), "1e+20");
        assert_eq!(format_float(2.5e-7), "2.5e-07");
        assert_eq!(format_float(f64::NAN), "nan");
        assert_eq!(format_float(f64::NEG_INFINITY), "-inf");
    }
}
