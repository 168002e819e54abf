//! Error types for scan operations.
//!
//! Syntax defects in the scanned text are never errors: they are reported as
//! [`Diagnostic`](crate::Diagnostic)s. A [`ScanError`] means no scan could be
//! attempted at all.

use std::path::PathBuf;

use thiserror::Error;

use crate::language::LanguageParseError;

/// Errors that prevent a scan from running.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScanError {
    /// The numeric language identifier is not one of the supported codes.
    #[error("unknown language id: {id}")]
    UnknownLanguage {
        /// The identifier that was rejected.
        id: i32,
    },

    /// A language name could not be mapped to a supported language.
    #[error(transparent)]
    UnknownLanguageName(#[from] LanguageParseError),

    /// A file's language could not be determined from its path.
    #[error("could not determine language for path: {}", path.display())]
    UnknownExtension {
        /// The path whose extension was not recognised.
        path: PathBuf,
    },

    /// The configured tab width is outside the accepted range.
    #[error("tab width must be between 1 and {max}, got {width}")]
    InvalidTabWidth {
        /// The rejected width.
        width: usize,
        /// The largest accepted width.
        max: usize,
    },
}

impl ScanError {
    /// Creates an unknown language error.
    #[must_use]
    pub const fn unknown_language(id: i32) -> Self {
        Self::UnknownLanguage { id }
    }

    /// Creates an unknown extension error.
    #[must_use]
    pub fn unknown_extension(path: impl Into<PathBuf>) -> Self {
        Self::UnknownExtension { path: path.into() }
    }

    /// Creates an invalid tab width error.
    #[must_use]
    pub const fn invalid_tab_width(width: usize, max: usize) -> Self {
        Self::InvalidTabWidth { width, max }
    }
}
