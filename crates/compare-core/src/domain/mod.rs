pub mod errors;

pub use errors::{
    CompareError, CompareErrorCategory, CompareResult, FAILURE_EXIT_CODE, InputRole,
    SUCCESS_EXIT_CODE,
};

use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Flag spellings that select tolerance mode, matched case-insensitively.
pub const TRUTHY_FLAG_VALUES: [&str; 5] = ["true", "1", "yes", "y", "t"];

pub fn parse_truthy_flag(value: &str) -> bool {
    TRUTHY_FLAG_VALUES
        .iter()
        .any(|accepted| value.eq_ignore_ascii_case(accepted))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonMode {
    #[default]
    ExactText,
    NumericTolerance,
}

impl ComparisonMode {
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some(value) if parse_truthy_flag(value) => Self::NumericTolerance,
            _ => Self::ExactText,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExactText => "exact_text",
            Self::NumericTolerance => "numeric_tolerance",
        }
    }
}

impl Display for ComparisonMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareRequest {
    pub reference_path: PathBuf,
    pub test_path: PathBuf,
    pub mode: ComparisonMode,
}

impl CompareRequest {
    pub fn new(
        reference_path: impl Into<PathBuf>,
        test_path: impl Into<PathBuf>,
        mode: ComparisonMode,
    ) -> Self {
        Self {
            reference_path: reference_path.into(),
            test_path: test_path.into(),
            mode,
        }
    }

    /// Checks the reference first, then the test file, stopping at the first
    /// path that does not exist.
    pub fn ensure_inputs_exist(&self) -> CompareResult<()> {
        ensure_exists(InputRole::Reference, &self.reference_path)?;
        ensure_exists(InputRole::Test, &self.test_path)
    }
}

fn ensure_exists(role: InputRole, path: &Path) -> CompareResult<()> {
    if path.exists() {
        return Ok(());
    }
    Err(CompareError::MissingInput {
        role,
        path: path.to_path_buf(),
    })
}
