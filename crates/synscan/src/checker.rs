//! File-oriented scanning.
//!
//! [`FileChecker`] picks a language for each file from its extension (or an
//! explicit override), scans the content, and tags every diagnostic with the
//! path it came from.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::diagnostic::Diagnostic;
use crate::error::ScanError;
use crate::language::SupportedLanguage;
use crate::scanner::Scanner;

/// Scans files and attributes diagnostics to paths.
#[derive(Debug, Clone, Default)]
pub struct FileChecker {
    scanner: Scanner,
    language: Option<SupportedLanguage>,
}

impl FileChecker {
    /// Creates a checker with default scan options and extension detection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a checker that scans with `scanner`.
    #[must_use]
    pub const fn with_scanner(scanner: Scanner) -> Self {
        Self {
            scanner,
            language: None,
        }
    }

    /// Forces every file to be scanned as `language`.
    #[must_use]
    pub const fn with_language(mut self, language: SupportedLanguage) -> Self {
        self.language = Some(language);
        self
    }

    /// Resolves the language a file will be scanned as.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::UnknownExtension`] when no override is set and
    /// the extension is not recognised.
    pub fn language_for(&self, path: &Path) -> Result<SupportedLanguage, ScanError> {
        self.language
            .or_else(|| SupportedLanguage::from_path(path))
            .ok_or_else(|| ScanError::unknown_extension(path))
    }

    /// Scans one file's content.
    ///
    /// Returns the diagnostics found, in position order. An empty list means
    /// the file is clean.
    ///
    /// # Errors
    ///
    /// Returns an error if the file's language cannot be determined.
    pub fn check_file(&self, path: &Path, content: &[u8]) -> Result<Vec<FileDiagnostic>, ScanError> {
        let language = self.language_for(path)?;
        tracing::debug!(path = %path.display(), %language, "checking file");

        let failures = self
            .scanner
            .scan_language(content, language)
            .into_iter()
            .map(|diagnostic| FileDiagnostic {
                path: path.to_path_buf(),
                diagnostic,
            })
            .collect();
        Ok(failures)
    }

    /// Scans several files, returning all diagnostics in input order.
    ///
    /// # Errors
    ///
    /// Returns an error for the first file whose language cannot be
    /// determined.
    pub fn check_files<'a, I>(&self, files: I) -> Result<Vec<FileDiagnostic>, ScanError>
    where
        I: IntoIterator<Item = (&'a Path, &'a [u8])>,
    {
        let mut all = Vec::new();
        for (path, content) in files {
            all.extend(self.check_file(path, content)?);
        }
        Ok(all)
    }

    /// Returns whether a file's extension maps to a supported language.
    #[must_use]
    pub fn supports_file(path: &Path) -> bool {
        SupportedLanguage::from_path(path).is_some()
    }
}

/// A diagnostic attributed to a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiagnostic {
    /// Path of the scanned file.
    pub path: PathBuf,
    /// The defect found in it.
    pub diagnostic: Diagnostic,
}

impl fmt::Display for FileDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path.display(), self.diagnostic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DiagnosticKind;

    #[test]
    fn detects_language_from_extension() {
        let checker = FileChecker::new();
        let failures = checker
            .check_file(Path::new("main.c"), b"int main() { return 0;")
            .expect("check");
        assert_eq!(failures.len(), 1);
        let first = failures.first().expect("failure");
        assert_eq!(first.diagnostic.kind(), DiagnosticKind::UnbalancedDelimiter);
    }

    #[test]
    fn rejects_unknown_extension_without_override() {
        let checker = FileChecker::new();
        let error = checker
            .check_file(Path::new("notes.txt"), b"(")
            .expect_err("txt has no language");
        assert_eq!(error, ScanError::unknown_extension("notes.txt"));
    }

    #[test]
    fn override_applies_to_any_path() {
        let checker = FileChecker::new().with_language(SupportedLanguage::Python);
        let failures = checker
            .check_file(Path::new("script"), b"if x:\n    a\n  b\n")
            .expect("check");
        assert_eq!(failures.len(), 1);
    }

    #[test]
    fn formats_path_line_column_kind_message() {
        let checker = FileChecker::new();
        let failures = checker
            .check_file(Path::new("Main.java"), b"int f() {\n  g(1));\n}")
            .expect("check");
        let formatted: Vec<_> = failures.iter().map(ToString::to_string).collect();
        assert_eq!(
            formatted,
            [
                "Main.java:2:7: unexpected_closing_delimiter: unexpected closing ')'; expected '}' to close '{' opened at 1:9"
            ]
        );
    }

    #[test]
    fn check_files_keeps_input_order() {
        let checker = FileChecker::new();
        let files: Vec<(&Path, &[u8])> = vec![
            (Path::new("b.py"), b"x = (".as_slice()),
            (Path::new("a.c"), b"int a;".as_slice()),
            (Path::new("c.cpp"), b"}".as_slice()),
        ];
        let failures = checker.check_files(files).expect("check");
        let paths: Vec<_> = failures.iter().map(|f| f.path.display().to_string()).collect();
        assert_eq!(paths, ["b.py", "c.cpp"]);
    }

    #[test]
    fn supports_file_detects_extensions() {
        assert!(FileChecker::supports_file(Path::new("lib.hpp")));
        assert!(FileChecker::supports_file(Path::new("App.java")));
        assert!(!FileChecker::supports_file(Path::new("README.md")));
    }
}
