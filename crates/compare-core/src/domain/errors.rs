use std::path::PathBuf;

pub type CompareResult<T> = Result<T, CompareError>;

/// Exit status shared by every failed outcome, whatever its category.
pub const FAILURE_EXIT_CODE: i32 = 1;
pub const SUCCESS_EXIT_CODE: i32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareErrorCategory {
    InputValidation,
    IoSystem,
    Computation,
}

impl CompareErrorCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InputValidation => "InputValidationError",
            Self::IoSystem => "IoSystemError",
            Self::Computation => "ComputationError",
        }
    }

    pub const fn exit_code(self) -> i32 {
        FAILURE_EXIT_CODE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputRole {
    Reference,
    Test,
}

impl InputRole {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Reference => "Reference",
            Self::Test => "Test",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    #[error("{} file {} does not exist", role.label(), path.display())]
    MissingInput { role: InputRole, path: PathBuf },
    #[error("failed to read '{}': {source}", path.display())]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("'{}' is not valid UTF-8: {detail}", path.display())]
    DecodeInput { path: PathBuf, detail: String },
    #[error("line {line} of '{}': token '{token}' is not a valid number", path.display())]
    NumericParse {
        path: PathBuf,
        line: usize,
        token: String,
    },
}

impl CompareError {
    pub fn read_input(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::InvalidData {
            return Self::DecodeInput {
                path,
                detail: source.to_string(),
            };
        }
        Self::ReadInput { path, source }
    }

    pub const fn category(&self) -> CompareErrorCategory {
        match self {
            Self::MissingInput { .. } => CompareErrorCategory::InputValidation,
            Self::ReadInput { .. } => CompareErrorCategory::IoSystem,
            Self::DecodeInput { .. } | Self::NumericParse { .. } => {
                CompareErrorCategory::Computation
            }
        }
    }

    pub const fn placeholder(&self) -> &'static str {
        match self {
            Self::MissingInput { .. } => "INPUT.MISSING_FILE",
            Self::ReadInput { .. } => "IO.READ_INPUT",
            Self::DecodeInput { .. } => "RUN.DECODE_INPUT",
            Self::NumericParse { .. } => "RUN.NUMERIC_PARSE",
        }
    }

    pub const fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        format!(
            "ERROR: [{}] {} ({})",
            self.placeholder(),
            self,
            self.category().as_str()
        )
    }
}
