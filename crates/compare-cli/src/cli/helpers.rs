use anyhow::Context;
use compare_core::ComparisonReport;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr; stdout carries only the comparison report.
pub(super) fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // Already installed when the CLI runs more than once in one process.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Reorders raw arguments so that only the tool's own options reach clap as
/// options. Any other argument, including one that starts with `-`, is moved
/// behind a `--` separator and parsed as a positional.
pub(super) fn route_positionals(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    let mut options = Vec::new();
    let mut positionals = Vec::new();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        if arg == "--" {
            positionals.extend(args.by_ref());
            break;
        }
        if arg == "--report" {
            // Joined so a path starting with `-` is not read as a flag.
            match args.next() {
                Some(path) => {
                    let mut joined = OsString::from("--report=");
                    joined.push(path);
                    options.push(joined);
                }
                None => options.push(arg),
            }
        } else if is_known_option(&arg) {
            options.push(arg);
        } else {
            positionals.push(arg);
        }
    }

    options.push(OsString::from("--"));
    options.extend(positionals);
    options
}

fn is_known_option(arg: &OsStr) -> bool {
    let Some(arg) = arg.to_str() else {
        return false;
    };
    matches!(arg, "-h" | "--help" | "-V" | "--version" | "--verbose")
        || arg.starts_with("--report=")
        || arg
            .strip_prefix('-')
            .is_some_and(|cluster| !cluster.is_empty() && cluster.chars().all(|c| c == 'v'))
}

pub(super) fn write_report_file(report_path: &Path, report: &ComparisonReport) -> anyhow::Result<()> {
    if let Some(parent_dir) = report_path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent_dir).with_context(|| {
            format!("failed to create report directory '{}'", parent_dir.display())
        })?;
    }

    let report_json = serde_json::to_string_pretty(report)
        .with_context(|| format!("failed to serialize report for '{}'", report_path.display()))?;
    fs::write(report_path, report_json)
        .with_context(|| format!("failed to write report '{}'", report_path.display()))
}
