//! CLI entrypoint for the synscan syntax scanner.
//!
//! The binary delegates to [`synscan_cli::run`], which parses arguments,
//! installs telemetry, scans every named file, and reports what it found.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    synscan_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
