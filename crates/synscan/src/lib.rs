//! Syntax-level defect scanning for C-family languages and Python.
//!
//! This crate scans source text in a single forward pass and reports
//! lexical and structural defects as positioned diagnostics:
//!
//! - **Unterminated literals and comments** detected by the [`Tokenizer`]
//! - **Unbalanced and unexpected delimiters** detected by the
//!   [`DelimiterTracker`]
//! - **Indentation mismatches** detected by the [`IndentationTracker`]
//!   (Python only)
//!
//! Scanning never stops at the first defect. Each anomaly is recorded and the
//! scan resumes from a well-defined recovery point, so one call reports
//! everything the pass can see.
//!
//! # Supported Languages
//!
//! | Id | Language | Extensions |
//! |----|----------|------------|
//! | 1  | C        | `.c`, `.h` |
//! | 2  | C++      | `.cpp`, `.cc`, `.cxx`, `.hpp`, `.hh`, `.hxx` |
//! | 3  | Java     | `.java` |
//! | 4  | Python   | `.py`, `.pyi` |
//!
//! C and C++ numbers may use `'` digit separators (`1'000`), C++ raw strings
//! (`R"tag( ... )tag"`) are read as one literal, and in C and C++ a trailing
//! backslash carries a `//` comment onto the next line.
//!
//! # Known Limitations
//!
//! Triple-quoted literals are a Python-only form, so a Java text block
//! (`"""`) reads as an empty string followed by an unclosed one and is
//! reported as an unterminated literal.
//!
//! # Example: Scanning by Language Id
//!
//! ```
//! use synscan::{DiagnosticKind, ScanError, scan};
//!
//! let diagnostics = scan(b"if (1 { return 0; }", 1)?;
//! assert_eq!(diagnostics.len(), 1);
//!
//! let first = &diagnostics.as_slice()[0];
//! assert_eq!(first.kind(), DiagnosticKind::UnbalancedDelimiter);
//! assert_eq!((first.line(), first.column()), (1, 4));
//!
//! // Unknown identifiers are rejected rather than reported as clean.
//! assert!(matches!(scan(b"", 5), Err(ScanError::UnknownLanguage { id: 5 })));
//! # Ok::<(), synscan::ScanError>(())
//! ```
//!
//! # Example: Checking Files
//!
//! ```
//! use std::path::Path;
//! use synscan::FileChecker;
//!
//! let checker = FileChecker::new();
//! let failures = checker.check_file(Path::new("app.py"), b"def f():\n    x = 1\n  y = 2\n")?;
//! for failure in &failures {
//!     // app.py:3:3: indentation_mismatch: ...
//!     let _ = failure.to_string();
//! }
//! # Ok::<(), synscan::ScanError>(())
//! ```

mod checker;
mod delimiters;
mod diagnostic;
mod error;
mod indentation;
mod language;
mod position;
mod profile;
mod scanner;
mod tokenizer;

pub use checker::{FileChecker, FileDiagnostic};
pub use delimiters::{DelimiterFrame, DelimiterTracker};
pub use diagnostic::{
    DEFAULT_CAPACITY, Diagnostic, DiagnosticBuffer, DiagnosticCollector, DiagnosticKind,
    MAX_MESSAGE_BYTES,
};
pub use error::ScanError;
pub use indentation::{IndentFrame, IndentationTracker};
pub use language::{LanguageParseError, SupportedLanguage};
pub use position::SourcePosition;
pub use profile::LanguageProfile;
pub use scanner::{DEFAULT_TAB_WIDTH, MAX_TAB_WIDTH, ScanOptions, Scanner, scan, scan_language};
pub use tokenizer::{LexEvent, Token, TokenKind, Tokenizer};

#[cfg(test)]
mod tests;
