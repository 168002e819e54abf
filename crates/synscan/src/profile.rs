//! Static per-language lexical rule tables.
//!
//! Profiles are plain data built at compile time. They carry no per-scan
//! state and are shared read-only by every scan, on every thread.

use crate::language::SupportedLanguage;

/// Bracket pairs tracked by every built-in profile.
const BRACKET_PAIRS: &[(u8, u8)] = &[(b'(', b')'), (b'[', b']'), (b'{', b'}')];

/// Lexical rules for one language.
#[derive(Debug, PartialEq, Eq)]
pub struct LanguageProfile {
    /// The language this profile describes.
    pub language: SupportedLanguage,
    /// Bytes that open and close a string literal.
    pub string_delimiters: &'static [u8],
    /// Bytes that open and close a character literal.
    pub char_delimiters: &'static [u8],
    /// Marker starting a comment that runs to the end of the line.
    pub line_comment: &'static [u8],
    /// Opening and closing markers of a block comment, if the language has one.
    pub block_comment: Option<(&'static [u8], &'static [u8])>,
    /// Whether three contiguous string delimiters open a multi-line literal.
    pub triple_quoted_strings: bool,
    /// Opening and closing delimiter pairs.
    pub delimiter_pairs: &'static [(u8, u8)],
    /// Whether leading whitespace is significant.
    pub indentation_sensitive: bool,
    /// Byte allowed between the digits of a number, as in `1'000`.
    pub digit_separator: Option<u8>,
    /// Whether `R"delim( ... )delim"` raw strings are recognised.
    pub raw_strings: bool,
    /// Whether a backslash-newline carries a line comment onto the next line.
    pub spliced_line_comments: bool,
}

impl LanguageProfile {
    /// Returns the closer expected for `open`, if `open` is an opening delimiter.
    #[must_use]
    pub fn closer_for(&self, open: u8) -> Option<u8> {
        self.delimiter_pairs
            .iter()
            .find(|(candidate, _)| *candidate == open)
            .map(|(_, close)| *close)
    }

    /// Returns whether `byte` closes one of the profile's delimiter pairs.
    #[must_use]
    pub fn is_closer(&self, byte: u8) -> bool {
        self.delimiter_pairs.iter().any(|(_, close)| *close == byte)
    }

    /// Returns whether `byte` opens a string literal.
    #[must_use]
    pub fn is_string_delimiter(&self, byte: u8) -> bool {
        self.string_delimiters.contains(&byte)
    }

    /// Returns whether `byte` opens a character literal.
    #[must_use]
    pub fn is_char_delimiter(&self, byte: u8) -> bool {
        self.char_delimiters.contains(&byte)
    }
}

const C_FAMILY_BLOCK_COMMENT: Option<(&[u8], &[u8])> = Some((b"/*", b"*/"));

pub(crate) static C: LanguageProfile = C_FAMILY_TEMPLATE;

pub(crate) static CPP: LanguageProfile = LanguageProfile {
    language: SupportedLanguage::Cpp,
    raw_strings: true,
    ..C_FAMILY_TEMPLATE
};

// Java has no line splicing and separates digits with `_`.
pub(crate) static JAVA: LanguageProfile = LanguageProfile {
    language: SupportedLanguage::Java,
    digit_separator: None,
    spliced_line_comments: false,
    ..C_FAMILY_TEMPLATE
};

pub(crate) static PYTHON: LanguageProfile = LanguageProfile {
    language: SupportedLanguage::Python,
    string_delimiters: b"\"'",
    char_delimiters: b"",
    line_comment: b"#",
    block_comment: None,
    triple_quoted_strings: true,
    delimiter_pairs: BRACKET_PAIRS,
    indentation_sensitive: true,
    digit_separator: None,
    raw_strings: false,
    spliced_line_comments: false,
};

const C_FAMILY_TEMPLATE: LanguageProfile = LanguageProfile {
    language: SupportedLanguage::C,
    string_delimiters: b"\"",
    char_delimiters: b"'",
    line_comment: b"//",
    block_comment: C_FAMILY_BLOCK_COMMENT,
    triple_quoted_strings: false,
    delimiter_pairs: BRACKET_PAIRS,
    indentation_sensitive: false,
    digit_separator: Some(b'\''),
    raw_strings: false,
    spliced_line_comments: true,
};
