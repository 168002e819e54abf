//! Leading-whitespace tracking for indentation-sensitive languages.
//!
//! Every logical line's indentation is measured twice: once with the
//! configured tab width and once with tabs counted as a single column. The
//! two measurements must order the same way against the enclosing block;
//! when they do not, the indentation depends on the tab stop and is reported
//! as inconsistent.
//!
//! Only lines that start outside any bracket and whose first token is code
//! are measured. Blank lines, comment-only lines, and the continuation lines
//! of multi-line literals never are.

use crate::diagnostic::{Diagnostic, DiagnosticCollector, DiagnosticKind};
use crate::position::SourcePosition;
use crate::tokenizer::{Token, TokenKind};

/// A previously seen indentation level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentFrame {
    /// Width with tabs expanded to the configured tab stop.
    pub width: usize,
    /// Width with each tab counted as one column.
    pub alt_width: usize,
}

impl IndentFrame {
    const BASE: Self = Self {
        width: 0,
        alt_width: 0,
    };
}

/// Stack-based indentation checker.
#[derive(Debug)]
pub struct IndentationTracker<'src> {
    source: &'src [u8],
    tab_width: usize,
    stack: Vec<IndentFrame>,
    bracket_depth: usize,
    line_start: Option<usize>,
}

impl<'src> IndentationTracker<'src> {
    /// Creates a tracker for tokens produced from `source`.
    ///
    /// A `tab_width` of zero is treated as one.
    #[must_use]
    pub fn new(source: &'src [u8], tab_width: usize) -> Self {
        Self {
            source,
            tab_width: tab_width.max(1),
            stack: vec![IndentFrame::BASE],
            bracket_depth: 0,
            line_start: Some(0),
        }
    }

    /// Returns the indentation levels currently open, outermost first.
    #[must_use]
    pub const fn levels(&self) -> &[IndentFrame] {
        self.stack.as_slice()
    }

    /// Feeds one token to the tracker.
    pub fn observe(&mut self, token: &Token, sink: &mut DiagnosticCollector) {
        match token.kind {
            TokenKind::Newline => {
                if self.bracket_depth == 0 {
                    self.line_start = Some(token.span.end);
                }
                return;
            }
            TokenKind::Comment | TokenKind::EndOfInput => {
                self.line_start = None;
                return;
            }
            _ => {}
        }

        if let Some(start) = self.line_start.take() {
            let leading = self.source.get(start..token.span.start).unwrap_or_default();
            let frame = self.measure(leading);
            self.check(frame, token.position, sink);
        }

        match token.kind {
            TokenKind::OpenDelimiter => self.bracket_depth += 1,
            TokenKind::CloseDelimiter => self.bracket_depth = self.bracket_depth.saturating_sub(1),
            _ => {}
        }
    }

    fn measure(&self, leading: &[u8]) -> IndentFrame {
        let mut frame = IndentFrame::BASE;
        for &byte in leading {
            match byte {
                b' ' => {
                    frame.width += 1;
                    frame.alt_width += 1;
                }
                b'\t' => {
                    frame.width = (frame.width + 1).next_multiple_of(self.tab_width);
                    frame.alt_width += 1;
                }
                b'\n' | b'\x0c' => frame = IndentFrame::BASE,
                _ => {}
            }
        }
        frame
    }

    fn check(&mut self, line: IndentFrame, position: SourcePosition, sink: &mut DiagnosticCollector) {
        let Some(&top) = self.stack.last() else {
            self.stack.push(IndentFrame::BASE);
            return;
        };

        if line.width > top.width {
            if line.alt_width <= top.alt_width {
                sink.append(inconsistent(position));
            }
            self.stack.push(line);
            return;
        }

        while self.stack.len() > 1 && self.stack.last().is_some_and(|frame| frame.width > line.width) {
            self.stack.pop();
        }

        match self.stack.last() {
            Some(frame) if frame.width == line.width => {
                if frame.alt_width != line.alt_width {
                    sink.append(inconsistent(position));
                }
            }
            _ => {
                sink.append(Diagnostic::new(
                    position,
                    DiagnosticKind::IndentationMismatch,
                    "unindent does not match any outer indentation level",
                ));
                self.stack.push(line);
            }
        }
    }
}

fn inconsistent(position: SourcePosition) -> Diagnostic {
    Diagnostic::new(
        position,
        DiagnosticKind::InconsistentIndentation,
        "inconsistent use of tabs and spaces in indentation",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SupportedLanguage;
    use crate::tokenizer::{LexEvent, Tokenizer};

    fn track(source: &str, tab_width: usize) -> Vec<Diagnostic> {
        let mut tracker = IndentationTracker::new(source.as_bytes(), tab_width);
        let mut sink = DiagnosticCollector::new();
        for event in Tokenizer::new(source.as_bytes(), SupportedLanguage::Python.profile()) {
            if let LexEvent::Token(token) = event {
                tracker.observe(&token, &mut sink);
            }
        }
        sink.finalize().into_vec()
    }

    #[test]
    fn nested_blocks_are_clean() {
        let source = "def f(x):\n    if x:\n        return 1\n    return 2\n\nprint(f(1))\n";
        assert!(track(source, 8).is_empty());
    }

    #[test]
    fn dedent_to_unknown_level_is_a_mismatch() {
        let found = track("if x:\n    a = 1\n   b = 2\n", 8);
        assert_eq!(found.len(), 1);
        let diagnostic = found.first().expect("diagnostic");
        assert_eq!(diagnostic.kind(), DiagnosticKind::IndentationMismatch);
        assert_eq!(diagnostic.position(), SourcePosition::new(3, 4));
    }

    #[test]
    fn repeated_bad_level_is_reported_once() {
        let found = track("if x:\n    a\n  b\n  c\n", 8);
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn blank_and_comment_lines_are_ignored() {
        let source = "if x:\n    a\n\n  # note\n \n    b\n";
        assert!(track(source, 8).is_empty());
    }

    #[test]
    fn lines_inside_brackets_are_ignored() {
        let source = "x = f(1,\n  2,\n      3)\ny = 2\n";
        assert!(track(source, 8).is_empty());
    }

    #[test]
    fn continuation_lines_of_triple_quoted_strings_are_ignored() {
        let source = "s = \"\"\"\n  odd\n     lines\n\"\"\"\nt = 1\n";
        assert!(track(source, 8).is_empty());
    }

    #[test]
    fn tab_and_spaces_at_same_width_are_inconsistent() {
        let found = track("if x:\n\ta\n        b\n", 8);
        assert_eq!(found.len(), 1);
        let diagnostic = found.first().expect("diagnostic");
        assert_eq!(diagnostic.kind(), DiagnosticKind::InconsistentIndentation);
        assert_eq!(diagnostic.position(), SourcePosition::new(3, 9));
    }

    #[test]
    fn consistent_tabs_are_clean() {
        assert!(track("if x:\n\ta\n\tif y:\n\t\tb\n\tc\n", 8).is_empty());
    }

    #[test]
    fn tab_width_changes_measured_width() {
        let tracker = IndentationTracker::new(b"", 4);
        assert_eq!(
            tracker.measure(b"  \t "),
            IndentFrame {
                width: 5,
                alt_width: 4
            }
        );
    }
}
