use super::CliError;
use super::helpers::write_report_file;
use compare_core::{Comparator, CompareRequest, ComparisonMode};
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(clap::Args)]
pub(super) struct CompareArgs {
    /// Known-good reference output
    #[arg(value_name = "reference_file")]
    reference_file: PathBuf,

    /// Candidate output under verification
    #[arg(value_name = "test_file")]
    test_file: PathBuf,

    /// Tolerance mode when one of: true, 1, yes, y, t (case-insensitive)
    #[arg(value_name = "is_chemv")]
    is_chemv: Option<OsString>,

    /// Trailing positionals are accepted and ignored
    #[arg(hide = true)]
    ignored: Vec<OsString>,

    /// Also write the comparison report as JSON
    #[arg(long, value_name = "path")]
    report: Option<PathBuf>,
}

impl CompareArgs {
    fn into_request(self) -> (CompareRequest, Option<PathBuf>) {
        // A flag that is not valid UTF-8 cannot be truthy.
        let flag = self.is_chemv.as_deref().and_then(|flag| flag.to_str());
        let mode = ComparisonMode::from_flag(flag);
        let request = CompareRequest::new(self.reference_file, self.test_file, mode);
        (request, self.report)
    }
}

pub(super) fn run_compare_command(args: CompareArgs) -> Result<i32, CliError> {
    if !args.ignored.is_empty() {
        tracing::debug!(ignored = ?args.ignored, "ignoring extra positional arguments");
    }
    let (request, report_path) = args.into_request();
    request.ensure_inputs_exist().map_err(CliError::MissingFile)?;

    let report = Comparator::default()
        .compare_request(&request)
        .map_err(CliError::Compare)?;
    for line in report.render_lines() {
        println!("{}", line);
    }

    if let Some(report_path) = report_path {
        write_report_file(&report_path, &report)?;
        tracing::info!(path = %report_path.display(), "wrote JSON report");
    }

    tracing::info!(mode = %request.mode, passed = report.passed, "comparison finished");
    Ok(report.exit_code())
}
