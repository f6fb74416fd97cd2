pub mod report;
pub mod tokenizer;

pub use report::{
    ComparisonMetrics, ComparisonReport, ExactTextMetrics, LargeDifference,
    NumericToleranceMetrics,
};
pub use tokenizer::{extract_numeric_values, is_numeric_token, numeric_values_from_reader};

use crate::domain::{CompareError, CompareRequest, CompareResult, ComparisonMode};
use crate::numerics::{NumericTolerance, compare_with_tolerance};
use std::fs;
use std::path::Path;

/// Decides whether a test file matches its reference, either byte-for-byte
/// or value-by-value within a fixed tolerance.
#[derive(Debug, Clone, Copy, Default)]
pub struct Comparator {
    tolerance: NumericTolerance,
}

impl Comparator {
    pub fn new(tolerance: NumericTolerance) -> Self {
        Self { tolerance }
    }

    pub fn tolerance(&self) -> NumericTolerance {
        self.tolerance
    }

    pub fn compare_request(&self, request: &CompareRequest) -> CompareResult<ComparisonReport> {
        self.compare_files(&request.reference_path, &request.test_path, request.mode)
    }

    pub fn compare_files(
        &self,
        reference_path: impl AsRef<Path>,
        test_path: impl AsRef<Path>,
        mode: ComparisonMode,
    ) -> CompareResult<ComparisonReport> {
        let reference_path = reference_path.as_ref();
        let test_path = test_path.as_ref();
        tracing::debug!(
            reference = %reference_path.display(),
            test = %test_path.display(),
            %mode,
            "comparing files"
        );

        let metrics = match mode {
            ComparisonMode::ExactText => {
                ComparisonMetrics::ExactText(compare_exact_text(reference_path, test_path)?)
            }
            ComparisonMode::NumericTolerance => ComparisonMetrics::NumericTolerance(
                self.compare_numeric_tolerance(reference_path, test_path)?,
            ),
        };

        Ok(ComparisonReport::new(
            reference_path,
            test_path,
            mode,
            metrics,
        ))
    }

    fn compare_numeric_tolerance(
        &self,
        reference_path: &Path,
        test_path: &Path,
    ) -> CompareResult<NumericToleranceMetrics> {
        let reference_values = extract_numeric_values(reference_path)?;
        let test_values = extract_numeric_values(test_path)?;
        Ok(compare_value_sequences(
            &reference_values,
            &test_values,
            self.tolerance,
        ))
    }
}

/// Pairs values by position over the shorter sequence; any tail beyond it is
/// only reflected in the counts.
pub fn compare_value_sequences(
    reference_values: &[f64],
    test_values: &[f64],
    tolerance: NumericTolerance,
) -> NumericToleranceMetrics {
    let mut max_abs_diff = 0.0_f64;
    let mut max_rel_diff = 0.0_f64;
    let mut large_differences = Vec::new();

    for (index, (reference, test)) in reference_values.iter().zip(test_values).enumerate() {
        let comparison = compare_with_tolerance(*reference, *test, tolerance);
        max_abs_diff = max_abs_diff.max(comparison.abs_diff);
        max_rel_diff = max_rel_diff.max(comparison.rel_diff);

        if comparison.exceeds {
            large_differences.push(LargeDifference {
                position: index + 1,
                reference: *reference,
                test: *test,
                abs_diff: comparison.abs_diff,
                rel_diff: comparison.rel_diff,
            });
        } else {
            tracing::trace!(position = index + 1, reference, test, "value within tolerance");
        }
    }

    NumericToleranceMetrics {
        reference_value_count: reference_values.len(),
        test_value_count: test_values.len(),
        compared_values: reference_values.len().min(test_values.len()),
        max_abs_diff,
        max_rel_diff,
        tolerance,
        large_differences,
    }
}

fn compare_exact_text(reference_path: &Path, test_path: &Path) -> CompareResult<ExactTextMetrics> {
    let reference_text = read_input_utf8(reference_path)?;
    let test_text = read_input_utf8(test_path)?;
    let first_mismatch = first_mismatch_offset(reference_text.as_bytes(), test_text.as_bytes());
    if let Some(offset) = first_mismatch {
        tracing::debug!(offset, "exact-text mismatch");
    }

    Ok(ExactTextMetrics {
        reference_bytes: reference_text.len(),
        test_bytes: test_text.len(),
        first_mismatch_offset: first_mismatch,
    })
}

fn read_input_utf8(path: &Path) -> CompareResult<String> {
    let bytes = fs::read(path).map_err(|source| CompareError::read_input(path, source))?;
    String::from_utf8(bytes).map_err(|source| CompareError::DecodeInput {
        path: path.to_path_buf(),
        detail: source.utf8_error().to_string(),
    })
}

fn first_mismatch_offset(left: &[u8], right: &[u8]) -> Option<usize> {
    left.iter()
        .zip(right.iter())
        .position(|(left_byte, right_byte)| left_byte != right_byte)
        .or_else(|| (left.len() != right.len()).then_some(left.len().min(right.len())))
}

#[cfg(test)]
mod tests {
    use super::{
        ComparisonMetrics, Comparator, compare_value_sequences, first_mismatch_offset,
    };
    use crate::domain::{CompareError, CompareRequest, ComparisonMode};
    use crate::numerics::NumericTolerance;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn exact_text_reports_first_mismatch_offset() {
        let temp = TempDir::new().expect("tempdir should be created");
        let reference = write_file(&temp, "ref/log.dat", "alpha\nbeta\n");
        let test = write_file(&temp, "test/log.dat", "alpha\nbeto\n");

        let report = Comparator::default()
            .compare_files(&reference, &test, ComparisonMode::ExactText)
            .expect("comparison should succeed");

        assert!(!report.passed);
        match report.metrics {
            ComparisonMetrics::ExactText(metrics) => {
                assert_eq!(metrics.reference_bytes, 11);
                assert_eq!(metrics.test_bytes, 11);
                assert_eq!(metrics.first_mismatch_offset, Some(9));
            }
            _ => panic!("expected exact-text metrics"),
        }
    }

    #[test]
    fn exact_text_does_not_normalize_line_endings() {
        let temp = TempDir::new().expect("tempdir should be created");
        let reference = write_file(&temp, "ref.txt", "1.0\n2.0\n");
        let test = write_file(&temp, "test.txt", "1.0\r\n2.0\r\n");

        let report = Comparator::default()
            .compare_files(&reference, &test, ComparisonMode::ExactText)
            .expect("comparison should succeed");
        assert!(!report.passed);
    }

    #[test]
    fn exact_text_rejects_non_utf8_input() {
        let temp = TempDir::new().expect("tempdir should be created");
        let reference = temp.path().join("ref.bin");
        fs::write(&reference, [0xc3, 0x28]).expect("file should be written");
        let test = write_file(&temp, "test.txt", "anything");

        let result =
            Comparator::default().compare_files(&reference, &test, ComparisonMode::ExactText);
        assert!(matches!(result, Err(CompareError::DecodeInput { .. })));
    }

    #[test]
    fn numeric_tolerance_collects_every_large_difference() {
        let temp = TempDir::new().expect("tempdir should be created");
        let reference = write_file(&temp, "ref.txt", "1.0 2.0\n3.0 0.0\n");
        let test = write_file(&temp, "test.txt", "1.1 2.0\n3.0 0.06\n");
        let request = CompareRequest::new(&reference, &test, ComparisonMode::NumericTolerance);

        let report = Comparator::default()
            .compare_request(&request)
            .expect("comparison should succeed");

        assert!(!report.passed);
        match report.metrics {
            ComparisonMetrics::NumericTolerance(metrics) => {
                assert_eq!(metrics.compared_values, 4);
                let positions = metrics
                    .large_differences
                    .iter()
                    .map(|difference| difference.position)
                    .collect::<Vec<_>>();
                assert_eq!(positions, vec![1, 4]);
                assert!((metrics.max_abs_diff - 0.1).abs() < 1.0e-12);
            }
            _ => panic!("expected numeric-tolerance metrics"),
        }
    }

    #[test]
    fn numeric_tolerance_propagates_missing_test_file() {
        let temp = TempDir::new().expect("tempdir should be created");
        let reference = write_file(&temp, "ref.txt", "1.0");

        let result = Comparator::default().compare_files(
            &reference,
            temp.path().join("vanished.txt"),
            ComparisonMode::NumericTolerance,
        );
        assert!(matches!(result, Err(CompareError::ReadInput { .. })));
    }

    #[test]
    fn value_sequences_ignore_unmatched_tail() {
        let metrics = compare_value_sequences(
            &[1.0, 2.0, 3.0],
            &[1.0, 2.0, 3.0, 99.0, -99.0],
            NumericTolerance::DEFAULT,
        );

        assert_eq!(metrics.reference_value_count, 3);
        assert_eq!(metrics.test_value_count, 5);
        assert_eq!(metrics.compared_values, 3);
        assert!(metrics.large_differences.is_empty());
        assert!(metrics.passed());
    }

    #[test]
    fn empty_sequences_report_zero_maxima() {
        let metrics = compare_value_sequences(&[], &[], NumericTolerance::DEFAULT);
        assert_eq!(metrics.max_abs_diff, 0.0);
        assert_eq!(metrics.max_rel_diff, 0.0);
        assert!(metrics.passed());
    }

    #[test]
    fn custom_tolerance_is_applied() {
        let comparator = Comparator::new(NumericTolerance {
            abs_tol: 1.0,
            rel_tol: 1.0,
        });
        assert_eq!(comparator.tolerance().abs_tol, 1.0);

        let metrics = compare_value_sequences(&[1.0], &[1.5], comparator.tolerance());
        assert!(metrics.passed());
    }

    #[test]
    fn mismatch_offset_covers_prefix_and_length_differences() {
        assert_eq!(first_mismatch_offset(b"same", b"same"), None);
        assert_eq!(first_mismatch_offset(b"abc", b"abd"), Some(2));
        assert_eq!(first_mismatch_offset(b"abc", b"abcdef"), Some(3));
        assert_eq!(first_mismatch_offset(b"", b"x"), Some(0));
    }

    fn write_file(temp_dir: &TempDir, relative_path: &str, content: &str) -> PathBuf {
        let path = temp_dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("parent dir should be created");
        }
        fs::write(&path, content).expect("file should be written");
        path
    }
}
