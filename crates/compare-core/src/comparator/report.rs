use crate::domain::{ComparisonMode, FAILURE_EXIT_CODE, SUCCESS_EXIT_CODE};
use crate::numerics::{NumericTolerance, format_float};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub reference_path: String,
    pub test_path: String,
    pub mode: ComparisonMode,
    pub passed: bool,
    pub metrics: ComparisonMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComparisonMetrics {
    ExactText(ExactTextMetrics),
    NumericTolerance(NumericToleranceMetrics),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExactTextMetrics {
    pub reference_bytes: usize,
    pub test_bytes: usize,
    pub first_mismatch_offset: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericToleranceMetrics {
    pub reference_value_count: usize,
    pub test_value_count: usize,
    pub compared_values: usize,
    pub max_abs_diff: f64,
    pub max_rel_diff: f64,
    pub tolerance: NumericTolerance,
    pub large_differences: Vec<LargeDifference>,
}

impl NumericToleranceMetrics {
    pub fn passed(&self) -> bool {
        self.large_differences.is_empty()
    }

    pub fn count_mismatch(&self) -> bool {
        self.reference_value_count != self.test_value_count
    }
}

/// A compared pair outside tolerance; `position` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LargeDifference {
    pub position: usize,
    pub reference: f64,
    pub test: f64,
    pub abs_diff: f64,
    pub rel_diff: f64,
}

impl ComparisonMetrics {
    pub fn passed(&self) -> bool {
        match self {
            Self::ExactText(metrics) => metrics.first_mismatch_offset.is_none(),
            Self::NumericTolerance(metrics) => metrics.passed(),
        }
    }
}

impl ComparisonReport {
    pub fn new(
        reference_path: &Path,
        test_path: &Path,
        mode: ComparisonMode,
        metrics: ComparisonMetrics,
    ) -> Self {
        Self {
            reference_path: reference_path.display().to_string(),
            test_path: test_path.display().to_string(),
            mode,
            passed: metrics.passed(),
            metrics,
        }
    }

    pub const fn exit_code(&self) -> i32 {
        if self.passed {
            SUCCESS_EXIT_CODE
        } else {
            FAILURE_EXIT_CODE
        }
    }

    /// Console lines in emission order. A passing exact-text comparison
    /// renders nothing.
    pub fn render_lines(&self) -> Vec<String> {
        match &self.metrics {
            ComparisonMetrics::ExactText(_) => {
                if self.passed {
                    Vec::new()
                } else {
                    vec![format!(
                        "Files are different: {} {}",
                        self.reference_path, self.test_path
                    )]
                }
            }
            ComparisonMetrics::NumericTolerance(metrics) => render_numeric_lines(metrics),
        }
    }
}

fn render_numeric_lines(metrics: &NumericToleranceMetrics) -> Vec<String> {
    let mut lines = Vec::with_capacity(metrics.large_differences.len() + 4);
    if metrics.count_mismatch() {
        lines.push(format!(
            "Warning: Different number of values: ref={}, test={}",
            metrics.reference_value_count, metrics.test_value_count
        ));
    }

    for difference in &metrics.large_differences {
        lines.push(format!(
            "Large difference at value {}: ref={} test={} diff={} rel={}",
            difference.position,
            format_float(difference.reference),
            format_float(difference.test),
            format_float(difference.abs_diff),
            format_float(difference.rel_diff)
        ));
    }

    lines.push(format!(
        "Maximum absolute difference: {}",
        format_float(metrics.max_abs_diff)
    ));
    lines.push(format!(
        "Maximum relative difference: {}",
        format_float(metrics.max_rel_diff)
    ));

    if !metrics.passed() {
        lines.push("Test failed: numerical differences exceed tolerance".to_string());
    }
    lines
}
