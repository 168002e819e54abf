//! Diagnostics and the growable buffer that collects them.
//!
//! A scan appends diagnostics to a [`DiagnosticCollector`] in detection
//! order. [`DiagnosticCollector::finalize`] sorts them by position and hands
//! the caller a [`DiagnosticBuffer`], which the caller then owns outright.

use std::fmt;

use crate::position::SourcePosition;

/// Upper bound, in bytes, on a diagnostic message.
pub const MAX_MESSAGE_BYTES: usize = 255;

/// Capacity of a fresh collector.
pub const DEFAULT_CAPACITY: usize = 8;

/// Recoverable syntax defects reported by a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A string or character literal is never closed.
    UnterminatedLiteral,
    /// A block comment is never closed.
    UnterminatedComment,
    /// An opening delimiter is never closed.
    UnbalancedDelimiter,
    /// A closing delimiter has no matching opener.
    UnexpectedClosingDelimiter,
    /// A dedent lands on a width no enclosing block used.
    IndentationMismatch,
    /// Tabs and spaces are mixed in a way that depends on the tab stop.
    InconsistentIndentation,
}

impl DiagnosticKind {
    /// Returns the stable numeric code used at the native boundary.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::UnterminatedLiteral => 1,
            Self::UnterminatedComment => 2,
            Self::UnbalancedDelimiter => 3,
            Self::UnexpectedClosingDelimiter => 4,
            Self::IndentationMismatch => 5,
            Self::InconsistentIndentation => 6,
        }
    }

    /// Returns the snake_case name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnterminatedLiteral => "unterminated_literal",
            Self::UnterminatedComment => "unterminated_comment",
            Self::UnbalancedDelimiter => "unbalanced_delimiter",
            Self::UnexpectedClosingDelimiter => "unexpected_closing_delimiter",
            Self::IndentationMismatch => "indentation_mismatch",
            Self::InconsistentIndentation => "inconsistent_indentation",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reported syntax defect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    position: SourcePosition,
    kind: DiagnosticKind,
    message: String,
}

impl Diagnostic {
    /// Creates a diagnostic, truncating the message to [`MAX_MESSAGE_BYTES`].
    #[must_use]
    pub fn new(position: SourcePosition, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        let mut text = message.into();
        truncate_message(&mut text);
        Self {
            position,
            kind,
            message: text,
        }
    }

    /// Returns where the defect was detected.
    #[must_use]
    pub const fn position(&self) -> SourcePosition {
        self.position
    }

    /// Returns the one-based line of the defect.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.position.line
    }

    /// Returns the one-based column of the defect.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.position.column
    }

    /// Returns the kind of defect.
    #[must_use]
    pub const fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    /// Returns the human-readable description.
    #[must_use]
    pub const fn message(&self) -> &str {
        self.message.as_str()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.position, self.kind, self.message)
    }
}

/// Cuts `message` to at most [`MAX_MESSAGE_BYTES`] without splitting a character.
fn truncate_message(message: &mut String) {
    if message.len() <= MAX_MESSAGE_BYTES {
        return;
    }
    let mut cut = MAX_MESSAGE_BYTES;
    while !message.is_char_boundary(cut) {
        cut -= 1;
    }
    message.truncate(cut);
}

/// Ordered, growable sink written to while a scan runs.
///
/// The collector starts with [`DEFAULT_CAPACITY`] slots and doubles its
/// capacity whenever it fills up, so no diagnostic is ever dropped.
#[derive(Debug)]
pub struct DiagnosticCollector {
    items: Vec<Diagnostic>,
    capacity: usize,
}

impl DiagnosticCollector {
    /// Creates an empty collector with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::with_capacity(DEFAULT_CAPACITY),
            capacity: DEFAULT_CAPACITY,
        }
    }

    /// Appends a diagnostic, growing the buffer if it is full.
    pub fn append(&mut self, diagnostic: Diagnostic) {
        if self.items.len() == self.capacity {
            self.capacity = self.capacity.saturating_mul(2);
            self.items
                .reserve_exact(self.capacity.saturating_sub(self.items.len()));
        }
        tracing::trace!(
            line = diagnostic.line(),
            column = diagnostic.column(),
            kind = %diagnostic.kind(),
            "diagnostic recorded"
        );
        self.items.push(diagnostic);
    }

    /// Returns the number of diagnostics collected so far.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns whether nothing has been collected yet.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the current capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Sorts the diagnostics by position and releases them to the caller.
    ///
    /// The sort is stable: diagnostics at the same position keep their
    /// detection order.
    #[must_use]
    pub fn finalize(mut self) -> DiagnosticBuffer {
        self.items.sort_by_key(Diagnostic::position);
        DiagnosticBuffer {
            items: self.items,
            capacity: self.capacity,
        }
    }
}

impl Default for DiagnosticCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// The sorted result of one scan, owned by the caller.
///
/// Dropping the buffer releases it. [`DiagnosticBuffer::capacity`] reports
/// how much room the scan ended up allocating and is informational only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticBuffer {
    items: Vec<Diagnostic>,
    capacity: usize,
}

impl DiagnosticBuffer {
    /// Returns the number of diagnostics.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns whether the scan found no defects.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the capacity the scan allocated.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the diagnostics in position order.
    #[must_use]
    pub const fn as_slice(&self) -> &[Diagnostic] {
        self.items.as_slice()
    }

    /// Iterates over the diagnostics in position order.
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    /// Consumes the buffer, returning its diagnostics.
    #[must_use]
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

impl IntoIterator for DiagnosticBuffer {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a DiagnosticBuffer {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
