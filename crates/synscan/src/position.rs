//! One-based source positions.
//!
//! Lines and columns both start at 1. A newline resets the column to 1 and
//! advances the line. Columns count characters rather than bytes: a UTF-8
//! continuation byte joins the character its lead byte started, while any
//! byte that is not part of a well-formed sequence counts as one column.

use std::fmt;

/// A one-based line and column in scanned text.
///
/// Positions order by line first, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourcePosition {
    /// Line number (one-based).
    pub line: u32,
    /// Column number (one-based).
    pub column: u32,
}

impl SourcePosition {
    /// The position of the first character of any input.
    pub const START: Self = Self { line: 1, column: 1 };

    /// Creates a position from one-based coordinates.
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl Default for SourcePosition {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Tracks the position of the next byte while text is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PositionTracker {
    position: SourcePosition,
    pending_continuations: u8,
}

impl PositionTracker {
    pub(crate) const fn new() -> Self {
        Self {
            position: SourcePosition::START,
            pending_continuations: 0,
        }
    }

    /// Returns the position of the next byte.
    pub(crate) const fn position(&self) -> SourcePosition {
        self.position
    }

    /// Consumes `byte`.
    pub(crate) const fn advance(&mut self, byte: u8) {
        if byte == b'\n' {
            self.position = SourcePosition {
                line: self.position.line.saturating_add(1),
                column: 1,
            };
            self.pending_continuations = 0;
        } else if self.pending_continuations > 0 && is_continuation_byte(byte) {
            self.pending_continuations -= 1;
        } else {
            self.position.column = self.position.column.saturating_add(1);
            self.pending_continuations = continuations_after(byte);
        }
    }
}

const fn is_continuation_byte(byte: u8) -> bool {
    byte & 0b1100_0000 == 0b1000_0000
}

/// Number of continuation bytes a UTF-8 lead byte announces.
const fn continuations_after(lead: u8) -> u8 {
    match lead {
        0xC2..=0xDF => 1,
        0xE0..=0xEF => 2,
        0xF0..=0xF4 => 3,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(text: &[u8]) -> SourcePosition {
        let mut tracker = PositionTracker::new();
        for &byte in text {
            tracker.advance(byte);
        }
        tracker.position()
    }

    #[test]
    fn newline_resets_column() {
        assert_eq!(walk(b"ab\ncd"), SourcePosition::new(2, 3));
    }

    #[test]
    fn multibyte_characters_count_once() {
        assert_eq!(walk("é€x".as_bytes()), SourcePosition::new(1, 4));
    }

    #[test]
    fn stray_continuation_bytes_count_one_column_each() {
        assert_eq!(walk(b"\x80\x80"), SourcePosition::new(1, 3));
    }

    #[test]
    fn truncated_sequence_does_not_swallow_next_character() {
        // A three-byte lead followed by ASCII: the lead is one column, `a` another.
        assert_eq!(walk(b"\xE2a"), SourcePosition::new(1, 3));
        assert_eq!(walk(b"\xE2\x82a"), SourcePosition::new(1, 3));
    }

    #[test]
    fn newline_clears_an_unfinished_sequence() {
        assert_eq!(walk(b"\xC3\n\x80"), SourcePosition::new(2, 2));
    }

    #[test]
    fn positions_order_by_line_then_column() {
        assert!(SourcePosition::new(1, 40) < SourcePosition::new(2, 1));
        assert!(SourcePosition::new(3, 2) < SourcePosition::new(3, 5));
    }

    #[test]
    fn displays_as_line_colon_column() {
        assert_eq!(SourcePosition::new(7, 12).to_string(), "7:12");
    }
}
