//! Reference-vs-candidate output comparison for regression pipelines.
//!
//! Files are compared either as exact text or, for numerically oriented
//! outputs, value by value within [`numerics::NumericTolerance::DEFAULT`].

pub mod comparator;
pub mod domain;
pub mod numerics;

pub use comparator::{Comparator, ComparisonReport};
pub use domain::{CompareError, CompareRequest, ComparisonMode};
