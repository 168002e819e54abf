//! Bracket, brace, and parenthesis balance tracking.

use crate::diagnostic::{Diagnostic, DiagnosticCollector, DiagnosticKind};
use crate::position::SourcePosition;
use crate::profile::LanguageProfile;
use crate::tokenizer::{Token, TokenKind};

/// An opening delimiter awaiting its closer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimiterFrame {
    /// The byte that opened the frame.
    pub opener: u8,
    /// The byte that closes the frame.
    pub expected_closer: u8,
    /// Where the opener appeared.
    pub opened_at: SourcePosition,
}

/// Stack-based delimiter matcher.
///
/// A closer that does not match the innermost open frame is reported and
/// otherwise ignored: the stack is left untouched so that one stray
/// character yields exactly one diagnostic. Frames still open at the end of
/// input are reported at their opener.
#[derive(Debug)]
pub struct DelimiterTracker<'src> {
    source: &'src [u8],
    profile: &'static LanguageProfile,
    stack: Vec<DelimiterFrame>,
}

impl<'src> DelimiterTracker<'src> {
    /// Creates a tracker for tokens produced from `source`.
    #[must_use]
    pub const fn new(source: &'src [u8], profile: &'static LanguageProfile) -> Self {
        Self {
            source,
            profile,
            stack: Vec::new(),
        }
    }

    /// Returns the number of currently open frames.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Feeds one token to the tracker.
    pub fn observe(&mut self, token: &Token, sink: &mut DiagnosticCollector) {
        let Some(&byte) = token.lexeme(self.source).first() else {
            return;
        };
        match token.kind {
            TokenKind::OpenDelimiter => {
                if let Some(expected_closer) = self.profile.closer_for(byte) {
                    self.stack.push(DelimiterFrame {
                        opener: byte,
                        expected_closer,
                        opened_at: token.position,
                    });
                }
            }
            TokenKind::CloseDelimiter => self.close(byte, token.position, sink),
            _ => {}
        }
    }

    fn close(&mut self, byte: u8, position: SourcePosition, sink: &mut DiagnosticCollector) {
        match self.stack.last().copied() {
            Some(frame) if frame.expected_closer == byte => {
                self.stack.pop();
            }
            Some(frame) => sink.append(Diagnostic::new(
                position,
                DiagnosticKind::UnexpectedClosingDelimiter,
                format!(
                    "unexpected closing '{}'; expected '{}' to close '{}' opened at {}",
                    char::from(byte),
                    char::from(frame.expected_closer),
                    char::from(frame.opener),
                    frame.opened_at
                ),
            )),
            None => sink.append(Diagnostic::new(
                position,
                DiagnosticKind::UnexpectedClosingDelimiter,
                format!("unexpected closing '{}'", char::from(byte)),
            )),
        }
    }

    /// Reports every frame still open, outermost first.
    pub fn finish(self, sink: &mut DiagnosticCollector) {
        for frame in self.stack {
            sink.append(Diagnostic::new(
                frame.opened_at,
                DiagnosticKind::UnbalancedDelimiter,
                format!("unclosed '{}' {}", char::from(frame.opener), noun(frame.opener)),
            ));
        }
    }
}

const fn noun(opener: u8) -> &'static str {
    match opener {
        b'(' => "parenthesis",
        b'{' => "brace",
        b'[' => "bracket",
        _ => "delimiter",
    }
}
