//! Rendering of scan results for humans and machines.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;
use synscan::FileDiagnostic;

/// Output format selection.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// One `path:line:column: kind: message` line per defect, followed by
    /// the offending source line and a caret.
    #[default]
    Human,
    /// A single JSON array of diagnostic records.
    Json,
}

/// Machine-readable form of one diagnostic.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct DiagnosticRecord {
    /// Path as given on the command line.
    pub path: String,
    /// One-based line.
    pub line: u32,
    /// One-based column, counted in characters.
    pub column: u32,
    /// Snake-case diagnostic kind.
    pub kind: &'static str,
    /// Numeric diagnostic kind.
    pub code: i32,
    /// Human-readable description.
    pub message: String,
}

impl From<&FileDiagnostic> for DiagnosticRecord {
    fn from(failure: &FileDiagnostic) -> Self {
        let diagnostic = &failure.diagnostic;
        Self {
            path: failure.path.display().to_string(),
            line: diagnostic.line(),
            column: diagnostic.column(),
            kind: diagnostic.kind().as_str(),
            code: diagnostic.kind().code(),
            message: diagnostic.message().to_owned(),
        }
    }
}

/// Writes one diagnostic with its source line and a caret under the column.
pub(crate) fn render_human(
    out: &mut impl Write,
    failure: &FileDiagnostic,
    source: &[u8],
) -> io::Result<()> {
    writeln!(out, "{failure}")?;

    let line = failure.diagnostic.line();
    let Some(text) = source_line(source, line) else {
        return Ok(());
    };
    let number = line.to_string();
    let gutter = " ".repeat(number.len());
    let skip = usize::try_from(failure.diagnostic.column().saturating_sub(1)).unwrap_or(0);
    // Keep tabs so the caret lines up however the terminal expands them.
    let pad: String = text
        .chars()
        .take(skip)
        .map(|c| if c == '\t' { '\t' } else { ' ' })
        .collect();

    writeln!(out, "{number} | {text}")?;
    writeln!(out, "{gutter} | {pad}^")
}

/// Writes every record as one JSON array followed by a newline.
pub(crate) fn write_json(out: &mut impl Write, records: &[DiagnosticRecord]) -> Result<(), serde_json::Error> {
    serde_json::to_writer(&mut *out, records)?;
    writeln!(out).map_err(serde_json::Error::io)
}

fn source_line(source: &[u8], line: u32) -> Option<String> {
    let index = usize::try_from(line).ok()?.checked_sub(1)?;
    let raw = source.split(|&byte| byte == b'\n').nth(index)?;
    let text = raw.strip_suffix(b"\r").unwrap_or(raw);
    Some(String::from_utf8_lossy(text).into_owned())
}
