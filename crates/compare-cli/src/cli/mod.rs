mod commands;
mod helpers;

use clap::Parser;
use compare_core::domain::{CompareError, FAILURE_EXIT_CODE};
use std::ffi::OsString;

pub(crate) const USAGE_TEXT: &str =
    "Usage: compare_outputs <reference_file> <test_file> [is_chemv]";

pub fn run_from_env() -> i32 {
    let args: Vec<OsString> = std::env::args_os().skip(1).collect();

    match run(args) {
        Ok(code) => code,
        Err(error) => {
            if let Some(diagnostic) = error.diagnostic_line() {
                tracing::debug!(%diagnostic, "comparison aborted");
            }
            println!("{}", error);
            error.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let routed = helpers::route_positionals(args.into_iter().map(Into::into));
    let full_args = std::iter::once(OsString::from("compare_outputs"))
        .chain(routed)
        .collect::<Vec<_>>();
    parse_and_dispatch(full_args)
}

fn parse_and_dispatch(args: Vec<OsString>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => {
            helpers::init_logging(cli.verbose);
            commands::run_compare_command(cli.compare)
        }
        Err(err) => match err.kind() {
            // No comparison ran, so a harness must not read this as a pass.
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(FAILURE_EXIT_CODE)
            }
            _ => Err(CliError::Usage(USAGE_TEXT.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(
    name = "compare_outputs",
    version,
    about = "Compare a test output file against a reference output",
    override_usage = "compare_outputs <reference_file> <test_file> [is_chemv]"
)]
struct Cli {
    #[command(flatten)]
    compare: commands::CompareArgs,

    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    MissingFile(CompareError),
    #[error("Error comparing files: {0}")]
    Compare(CompareError),
    #[error("Error: {0:#}")]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingFile(error) | Self::Compare(error) => error.exit_code(),
            Self::Usage(_) | Self::Internal(_) => FAILURE_EXIT_CODE,
        }
    }

    fn diagnostic_line(&self) -> Option<String> {
        match self {
            Self::MissingFile(error) | Self::Compare(error) => Some(error.diagnostic_line()),
            Self::Usage(_) | Self::Internal(_) => None,
        }
    }
}
