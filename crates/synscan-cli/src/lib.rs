//! Command-line runtime for the synscan syntax scanner.
//!
//! [`run`] owns argument parsing, telemetry set-up, file reading, and output
//! rendering. Streams are injected so tests can drive the runtime without a
//! child process.
//!
//! Exit codes: `0` when every file is clean, `1` when at least one defect was
//! reported, `2` when arguments were invalid or any file could not be
//! scanned.

use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use synscan::{FileChecker, LanguageParseError, SupportedLanguage};
use synscan_config::Config;

mod errors;
pub mod output;
pub mod telemetry;

use errors::AppError;
pub use output::{DiagnosticRecord, OutputFormat};

const EXIT_DEFECTS: u8 = 1;
const EXIT_FAILURE: u8 = 2;

/// Report syntax-level defects in C, C++, Java, and Python sources.
#[derive(Debug, Parser)]
#[command(name = "synscan", version)]
struct Cli {
    /// Scan every file as this language instead of detecting it from the
    /// file extension.
    #[arg(long, short = 'l', value_name = "NAME", value_parser = parse_language)]
    language: Option<SupportedLanguage>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    format: OutputFormat,

    #[command(flatten)]
    config: Config,

    /// Files to scan.
    #[arg(required = true, value_name = "FILES")]
    files: Vec<PathBuf>,
}

fn parse_language(value: &str) -> Result<SupportedLanguage, LanguageParseError> {
    value.parse()
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Clean,
    DefectsFound,
    FilesFailed,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Clean => Self::SUCCESS,
            Outcome::DefectsFound => Self::from(EXIT_DEFECTS),
            Outcome::FilesFailed => Self::from(EXIT_FAILURE),
        }
    }
}

/// Runs the CLI with `args`, writing results to `stdout` and problems to
/// `stderr`.
pub fn run<I, T, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write,
    E: Write,
{
    match try_run(args, stdout, stderr) {
        Ok(outcome) => outcome.into(),
        Err(AppError::CliUsage(error)) => report_usage(&error, stdout, stderr),
        Err(error) => {
            tracing::error!(%error, "run failed");
            best_effort(writeln!(stderr, "synscan: {error}"));
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

/// Reports a failed write to a stream that has nowhere left to report to.
fn best_effort(result: io::Result<()>) {
    if let Err(error) = result {
        tracing::debug!(%error, "could not write to output stream");
    }
}

fn report_usage<W: Write, E: Write>(error: &clap::Error, stdout: &mut W, stderr: &mut E) -> ExitCode {
    let rendered = error.render();
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            best_effort(write!(stdout, "{rendered}"));
            ExitCode::SUCCESS
        }
        _ => {
            best_effort(write!(stderr, "{rendered}"));
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn try_run<I, T, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> Result<Outcome, AppError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write,
    E: Write,
{
    let cli = Cli::try_parse_from(args).map_err(AppError::CliUsage)?;
    telemetry::initialise(&cli.config)?;

    let mut checker = FileChecker::with_scanner(cli.config.scanner()?);
    if let Some(language) = cli.language {
        checker = checker.with_language(language);
    }

    let mut records = Vec::new();
    let mut defects = 0_usize;
    let mut failed = 0_usize;

    for path in &cli.files {
        let scanned = fs::read(path)
            .map_err(|source| AppError::read_file(path, source))
            .and_then(|content| {
                let failures = checker.check_file(path, &content)?;
                Ok((content, failures))
            });
        let (content, failures) = match scanned {
            Ok(file) => file,
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "file skipped");
                writeln!(stderr, "synscan: {error}")?;
                failed += 1;
                continue;
            }
        };

        tracing::info!(path = %path.display(), defects = failures.len(), "file scanned");
        defects += failures.len();
        match cli.format {
            OutputFormat::Human => {
                for failure in &failures {
                    output::render_human(stdout, failure, &content)?;
                }
            }
            OutputFormat::Json => records.extend(failures.iter().map(DiagnosticRecord::from)),
        }
    }

    if cli.format == OutputFormat::Json {
        output::write_json(stdout, &records)?;
    }
    stdout.flush()?;

    Ok(if failed > 0 {
        Outcome::FilesFailed
    } else if defects > 0 {
        Outcome::DefectsFound
    } else {
        Outcome::Clean
    })
}
