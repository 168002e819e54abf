//! Profile-driven tokenizer with error recovery.
//!
//! [`Tokenizer`] walks raw bytes once and yields [`LexEvent`]s: tokens for
//! the trackers downstream, and diagnostics for lexical contexts that never
//! close. Whitespace other than newlines is skipped. The sequence always
//! ends with exactly one [`TokenKind::EndOfInput`] token.
//!
//! Recovery points:
//!
//! - a single-line literal ends at the first un-escaped newline (the newline
//!   is still produced as a token) or at end of input;
//! - block comments, triple-quoted strings, and C++ raw strings run to end of
//!   input.
//!
//! Either way the diagnostic points at the opening delimiter.
//!
//! Java text blocks (`"""`) are not recognised: triple-quoted literals are
//! only read for profiles that enable them, which today is Python alone.

use std::iter::FusedIterator;
use std::ops::Range;

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::position::{PositionTracker, SourcePosition};
use crate::profile::LanguageProfile;

/// Classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Identifier, keyword, or number.
    Identifier,
    /// Any other punctuation character.
    Operator,
    /// An opening bracket, brace, or parenthesis.
    OpenDelimiter,
    /// A closing bracket, brace, or parenthesis.
    CloseDelimiter,
    /// A complete string or character literal.
    StringLiteral,
    /// A complete line or block comment.
    Comment,
    /// A line break outside any literal or comment.
    Newline,
    /// The end of the input.
    EndOfInput,
}

/// A lexeme produced by the [`Tokenizer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token classification.
    pub kind: TokenKind,
    /// Byte range of the lexeme in the scanned text.
    pub span: Range<usize>,
    /// Position of the lexeme's first character.
    pub position: SourcePosition,
}

impl Token {
    /// Returns the lexeme bytes from the text the token was produced from.
    #[must_use]
    pub fn lexeme<'src>(&self, source: &'src [u8]) -> &'src [u8] {
        source.get(self.span.clone()).unwrap_or_default()
    }
}

/// One step of the tokenizer's output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexEvent {
    /// A token.
    Token(Token),
    /// A lexical context that was never closed.
    Diagnostic(Diagnostic),
}

/// The lexical context the tokenizer is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    Normal,
    InString,
    InChar,
    InLineComment,
    InBlockComment,
    InTripleString,
}

/// Single-pass tokenizer over one input under one profile.
///
/// A tokenizer cannot be restarted; construct a new one per scan.
#[derive(Debug)]
pub struct Tokenizer<'src> {
    source: &'src [u8],
    profile: &'static LanguageProfile,
    offset: usize,
    cursor: PositionTracker,
    finished: bool,
}

impl<'src> Tokenizer<'src> {
    /// Creates a tokenizer positioned at the start of `source`.
    #[must_use]
    pub const fn new(source: &'src [u8], profile: &'static LanguageProfile) -> Self {
        Self {
            source,
            profile,
            offset: 0,
            cursor: PositionTracker::new(),
            finished: false,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.source.get(self.offset).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.source.get(self.offset.saturating_add(ahead)).copied()
    }

    fn at_marker(&self, marker: &[u8]) -> bool {
        !marker.is_empty()
            && self
                .source
                .get(self.offset..)
                .is_some_and(|rest| rest.starts_with(marker))
    }

    fn bump(&mut self) {
        if let Some(byte) = self.peek() {
            self.cursor.advance(byte);
            self.offset += 1;
        }
    }

    fn bump_n(&mut self, count: usize) {
        for _ in 0..count {
            self.bump();
        }
    }

    /// Returns whether a backslash-newline (LF or CRLF) starts here.
    fn at_line_splice(&self) -> bool {
        self.peek() == Some(b'\\')
            && match self.peek_at(1) {
                Some(b'\n') => true,
                Some(b'\r') => self.peek_at(2) == Some(b'\n'),
                _ => false,
            }
    }

    /// Skips blanks and backslash line continuations.
    fn skip_blanks(&mut self) {
        while let Some(byte) = self.peek() {
            match byte {
                b' ' | b'\t' | b'\r' | b'\x0c' => self.bump(),
                b'\\' if self.at_line_splice() => self.escape(),
                _ => break,
            }
        }
    }

    fn state_for(&self, byte: u8) -> LexState {
        let profile = self.profile;
        if self.at_marker(profile.line_comment) {
            LexState::InLineComment
        } else if profile
            .block_comment
            .is_some_and(|(open, _)| self.at_marker(open))
        {
            LexState::InBlockComment
        } else if profile.is_string_delimiter(byte) {
            let tripled = profile.triple_quoted_strings
                && self.peek_at(1) == Some(byte)
                && self.peek_at(2) == Some(byte);
            if tripled {
                LexState::InTripleString
            } else {
                LexState::InString
            }
        } else if profile.is_char_delimiter(byte) {
            LexState::InChar
        } else {
            LexState::Normal
        }
    }

    const fn token(&self, kind: TokenKind, start: usize, position: SourcePosition) -> LexEvent {
        LexEvent::Token(Token {
            kind,
            span: start..self.offset,
            position,
        })
    }

    fn normal(&mut self, byte: u8, start: usize, position: SourcePosition) -> LexEvent {
        let kind = if byte == b'\n' {
            TokenKind::Newline
        } else if self.profile.closer_for(byte).is_some() {
            TokenKind::OpenDelimiter
        } else if self.profile.is_closer(byte) {
            TokenKind::CloseDelimiter
        } else if is_word_byte(byte) {
            self.word(byte.is_ascii_digit());
            if self.peek() == Some(b'"') && self.at_raw_string_prefix(start) {
                return self.raw_string(start, position);
            }
            return self.token(TokenKind::Identifier, start, position);
        } else {
            TokenKind::Operator
        };
        self.bump();
        self.token(kind, start, position)
    }

    /// Consumes the rest of a word. Numbers may contain digit separators.
    fn word(&mut self, numeric: bool) {
        let separator = self.profile.digit_separator.filter(|_| numeric);
        while let Some(byte) = self.peek() {
            let separates_digits = Some(byte) == separator
                && self.peek_at(1).is_some_and(|next| next.is_ascii_alphanumeric());
            if !is_word_byte(byte) && !separates_digits {
                break;
            }
            self.bump();
        }
    }

    fn at_raw_string_prefix(&self, start: usize) -> bool {
        self.profile.raw_strings
            && matches!(
                self.source.get(start..self.offset),
                Some(b"R" | b"LR" | b"uR" | b"UR" | b"u8R")
            )
    }

    /// Lexes a C++ raw string, `R"delim( ... )delim"`, from its opening quote.
    fn raw_string(&mut self, start: usize, position: SourcePosition) -> LexEvent {
        self.bump();
        let source = self.source;
        let delimiter_start = self.offset;
        while self.peek().is_some_and(is_raw_delimiter_byte) {
            self.bump();
        }
        let delimiter = source.get(delimiter_start..self.offset).unwrap_or_default();
        if self.peek() != Some(b'(') || delimiter.len() > MAX_RAW_DELIMITER_LEN {
            while self.peek().is_some_and(|byte| byte != b'\n') {
                self.bump();
            }
            return LexEvent::Diagnostic(Diagnostic::new(
                position,
                DiagnosticKind::UnterminatedLiteral,
                "malformed raw string delimiter",
            ));
        }

        let mut closer = Vec::with_capacity(delimiter.len().saturating_add(2));
        closer.push(b')');
        closer.extend_from_slice(delimiter);
        closer.push(b'"');

        self.bump();
        while self.peek().is_some() {
            if self.at_marker(&closer) {
                self.bump_n(closer.len());
                return self.token(TokenKind::StringLiteral, start, position);
            }
            self.bump();
        }
        LexEvent::Diagnostic(Diagnostic::new(
            position,
            DiagnosticKind::UnterminatedLiteral,
            "unclosed raw string",
        ))
    }

    fn line_comment(&mut self, start: usize, position: SourcePosition) -> LexEvent {
        let spliced = self.profile.spliced_line_comments;
        while let Some(byte) = self.peek() {
            if byte == b'\n' {
                break;
            }
            if spliced && self.at_line_splice() {
                self.escape();
            } else {
                self.bump();
            }
        }
        self.token(TokenKind::Comment, start, position)
    }

    fn block_comment(&mut self, start: usize, position: SourcePosition) -> LexEvent {
        let Some((open, close)) = self.profile.block_comment else {
            return self.line_comment(start, position);
        };
        self.bump_n(open.len());
        while self.peek().is_some() {
            if self.at_marker(close) {
                self.bump_n(close.len());
                return self.token(TokenKind::Comment, start, position);
            }
            self.bump();
        }
        let message = format!(
            "unclosed {} {} comment",
            String::from_utf8_lossy(open),
            String::from_utf8_lossy(close)
        );
        LexEvent::Diagnostic(Diagnostic::new(
            position,
            DiagnosticKind::UnterminatedComment,
            message,
        ))
    }

    /// Consumes a backslash and the character it escapes.
    fn escape(&mut self) {
        self.bump();
        if self.peek() == Some(b'\r') && self.peek_at(1) == Some(b'\n') {
            self.bump();
        }
        self.bump();
    }

    fn single_line_literal(
        &mut self,
        quote: u8,
        start: usize,
        position: SourcePosition,
    ) -> LexEvent {
        self.bump();
        loop {
            match self.peek() {
                None | Some(b'\n') => break,
                Some(b'\\') => self.escape(),
                Some(byte) if byte == quote => {
                    self.bump();
                    return self.token(TokenKind::StringLiteral, start, position);
                }
                Some(_) => self.bump(),
            }
        }
        LexEvent::Diagnostic(Diagnostic::new(
            position,
            DiagnosticKind::UnterminatedLiteral,
            format!("unclosed {} quote", quote_name(quote)),
        ))
    }

    fn triple_quoted_literal(
        &mut self,
        quote: u8,
        start: usize,
        position: SourcePosition,
    ) -> LexEvent {
        let closer = [quote; 3];
        self.bump_n(closer.len());
        while let Some(byte) = self.peek() {
            if byte == b'\\' {
                self.escape();
            } else if self.at_marker(&closer) {
                self.bump_n(closer.len());
                return self.token(TokenKind::StringLiteral, start, position);
            } else {
                self.bump();
            }
        }
        LexEvent::Diagnostic(Diagnostic::new(
            position,
            DiagnosticKind::UnterminatedLiteral,
            format!("unclosed triple-quoted string ({})", quote_name(quote)),
        ))
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = LexEvent;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        self.skip_blanks();

        let start = self.offset;
        let position = self.cursor.position();
        let Some(byte) = self.peek() else {
            self.finished = true;
            return Some(self.token(TokenKind::EndOfInput, start, position));
        };

        let event = match self.state_for(byte) {
            LexState::Normal => self.normal(byte, start, position),
            LexState::InString | LexState::InChar => {
                self.single_line_literal(byte, start, position)
            }
            LexState::InTripleString => self.triple_quoted_literal(byte, start, position),
            LexState::InLineComment => self.line_comment(start, position),
            LexState::InBlockComment => self.block_comment(start, position),
        };
        Some(event)
    }
}

impl FusedIterator for Tokenizer<'_> {}

/// Longest delimiter a C++ raw string may carry.
const MAX_RAW_DELIMITER_LEN: usize = 16;

const fn is_raw_delimiter_byte(byte: u8) -> bool {
    byte.is_ascii_graphic() && !matches!(byte, b'(' | b')' | b'\\' | b'"')
}

const fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'$' || !byte.is_ascii()
}

const fn quote_name(quote: u8) -> &'static str {
    match quote {
        b'"' => "double",
        b'\'' => "single",
        _ => "string",
    }
}
