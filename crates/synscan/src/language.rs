//! Language identification and profile selection.
//!
//! This module provides the [`SupportedLanguage`] enum, the closed set of
//! languages the scanner understands, and maps each variant to the numeric
//! identifier used at the native boundary and to its [`LanguageProfile`].

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use crate::profile::{self, LanguageProfile};

/// Languages supported for syntax scanning.
///
/// The numeric identifiers are fixed: `1 = C`, `2 = C++`, `3 = Java`,
/// `4 = Python`. Any other value is not a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SupportedLanguage {
    /// C source files (`.c`, `.h`).
    C,
    /// C++ source files (`.cpp`, `.cc`, `.hpp`, ...).
    Cpp,
    /// Java source files (`.java`).
    Java,
    /// Python source files (`.py`, `.pyi`).
    Python,
}

impl SupportedLanguage {
    /// Resolves a boundary language identifier.
    ///
    /// Returns `None` for identifiers outside `1..=4`.
    ///
    /// # Examples
    ///
    /// ```
    /// use synscan::SupportedLanguage;
    ///
    /// assert_eq!(SupportedLanguage::from_id(4), Some(SupportedLanguage::Python));
    /// assert_eq!(SupportedLanguage::from_id(0), None);
    /// ```
    #[must_use]
    pub const fn from_id(id: i32) -> Option<Self> {
        match id {
            1 => Some(Self::C),
            2 => Some(Self::Cpp),
            3 => Some(Self::Java),
            4 => Some(Self::Python),
            _ => None,
        }
    }

    /// Returns the boundary identifier for this language.
    #[must_use]
    pub const fn id(self) -> i32 {
        match self {
            Self::C => 1,
            Self::Cpp => 2,
            Self::Java => 3,
            Self::Python => 4,
        }
    }

    /// Detects the language from a file extension.
    ///
    /// Returns `None` if the extension is not recognised. Headers ending in
    /// `.h` are treated as C.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        let normalised = ext.to_ascii_lowercase();
        match normalised.as_str() {
            "c" | "h" => Some(Self::C),
            "cc" | "cpp" | "cxx" | "c++" | "hh" | "hpp" | "hxx" => Some(Self::Cpp),
            "java" => Some(Self::Java),
            "py" | "pyi" => Some(Self::Python),
            _ => None,
        }
    }

    /// Detects the language from a file path by examining its extension.
    ///
    /// Returns `None` if the path has no extension or the extension is not
    /// recognised.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Returns the lexical rule table for this language.
    #[must_use]
    pub const fn profile(self) -> &'static LanguageProfile {
        match self {
            Self::C => &profile::C,
            Self::Cpp => &profile::CPP,
            Self::Java => &profile::JAVA,
            Self::Python => &profile::PYTHON,
        }
    }

    /// Returns the lower-case identifier for this language.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::C => "c",
            Self::Cpp => "cpp",
            Self::Java => "java",
            Self::Python => "python",
        }
    }

    /// Returns all supported languages in identifier order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::C, Self::Cpp, Self::Java, Self::Python]
    }
}

impl fmt::Display for SupportedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when parsing a language name fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported language: '{0}'")]
pub struct LanguageParseError(String);

impl LanguageParseError {
    /// Returns the input that failed to parse.
    #[must_use]
    pub const fn input(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for SupportedLanguage {
    type Err = LanguageParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalised = input.trim().to_ascii_lowercase();
        match normalised.as_str() {
            "c" => Ok(Self::C),
            "cpp" | "c++" | "cxx" => Ok(Self::Cpp),
            "java" => Ok(Self::Java),
            "python" | "py" => Ok(Self::Python),
            _ => Err(LanguageParseError(input.trim().to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, SupportedLanguage::C)]
    #[case(2, SupportedLanguage::Cpp)]
    #[case(3, SupportedLanguage::Java)]
    #[case(4, SupportedLanguage::Python)]
    fn from_id_round_trips_boundary_codes(#[case] id: i32, #[case] expected: SupportedLanguage) {
        assert_eq!(SupportedLanguage::from_id(id), Some(expected));
        assert_eq!(expected.id(), id);
    }

    #[rstest]
    #[case(0)]
    #[case(5)]
    #[case(-1)]
    #[case(i32::MAX)]
    fn from_id_rejects_unknown_codes(#[case] id: i32) {
        assert_eq!(SupportedLanguage::from_id(id), None);
    }

    #[rstest]
    #[case("c", SupportedLanguage::C)]
    #[case("h", SupportedLanguage::C)]
    #[case("cpp", SupportedLanguage::Cpp)]
    #[case("HPP", SupportedLanguage::Cpp)]
    #[case("java", SupportedLanguage::Java)]
    #[case("py", SupportedLanguage::Python)]
    #[case("pyi", SupportedLanguage::Python)]
    fn from_extension_recognises_supported_languages(
        #[case] ext: &str,
        #[case] expected: SupportedLanguage,
    ) {
        assert_eq!(SupportedLanguage::from_extension(ext), Some(expected));
    }

    #[rstest]
    #[case("rs")]
    #[case("md")]
    fn from_extension_returns_none_for_unknown(#[case] ext: &str) {
        assert_eq!(SupportedLanguage::from_extension(ext), None);
    }

    #[test]
    fn from_path_returns_none_for_no_extension() {
        assert_eq!(SupportedLanguage::from_path(Path::new("Makefile")), None);
    }

    #[rstest]
    #[case("c", SupportedLanguage::C)]
    #[case("C++", SupportedLanguage::Cpp)]
    #[case(" Java ", SupportedLanguage::Java)]
    #[case("PYTHON", SupportedLanguage::Python)]
    fn from_str_is_case_insensitive(#[case] input: &str, #[case] expected: SupportedLanguage) {
        assert_eq!(SupportedLanguage::from_str(input), Ok(expected));
    }

    #[test]
    fn from_str_reports_rejected_input() {
        let error = "go".parse::<SupportedLanguage>().expect_err("go is not supported");
        assert_eq!(error.input(), "go");
    }

    #[test]
    fn only_python_is_indentation_sensitive() {
        let sensitive: Vec<_> = SupportedLanguage::all()
            .iter()
            .filter(|lang| lang.profile().indentation_sensitive)
            .collect();
        assert_eq!(sensitive, [&SupportedLanguage::Python]);
    }
}
