//! Scan dispatch: one forward pass over one input.
//!
//! The [`Scanner`] resolves the language, builds a fresh tokenizer, trackers,
//! and collector for the call, drives the token stream to completion, and
//! returns the sorted diagnostics. Nothing survives between calls, so a
//! single scanner may be shared freely across threads.

use crate::delimiters::DelimiterTracker;
use crate::diagnostic::{DiagnosticBuffer, DiagnosticCollector};
use crate::error::ScanError;
use crate::indentation::IndentationTracker;
use crate::language::SupportedLanguage;
use crate::tokenizer::{LexEvent, Tokenizer};

/// Tab stop used for indentation when none is configured.
pub const DEFAULT_TAB_WIDTH: usize = 8;

/// Largest accepted tab stop.
pub const MAX_TAB_WIDTH: usize = 32;

/// Tunable scan behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Columns a tab advances to when measuring indentation.
    pub tab_width: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }
}

/// Entry point for scanning source text.
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    options: ScanOptions,
}

impl Scanner {
    /// Creates a scanner with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scanner with custom options.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::InvalidTabWidth`] if the tab width is zero or
    /// larger than [`MAX_TAB_WIDTH`].
    pub const fn with_options(options: ScanOptions) -> Result<Self, ScanError> {
        if options.tab_width == 0 || options.tab_width > MAX_TAB_WIDTH {
            return Err(ScanError::invalid_tab_width(options.tab_width, MAX_TAB_WIDTH));
        }
        Ok(Self { options })
    }

    /// Returns the options this scanner applies.
    #[must_use]
    pub const fn options(&self) -> ScanOptions {
        self.options
    }

    /// Scans `text` as the language with boundary identifier `language_id`.
    ///
    /// The text need not be valid UTF-8 and may contain NUL bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::UnknownLanguage`] if `language_id` is not one of
    /// the supported codes. No scanning happens in that case.
    pub fn scan(&self, text: &[u8], language_id: i32) -> Result<DiagnosticBuffer, ScanError> {
        let Some(language) = SupportedLanguage::from_id(language_id) else {
            tracing::warn!(language_id, "rejected scan for unknown language id");
            return Err(ScanError::unknown_language(language_id));
        };
        Ok(self.scan_language(text, language))
    }

    /// Scans `text` as `language`.
    #[must_use]
    pub fn scan_language(&self, text: &[u8], language: SupportedLanguage) -> DiagnosticBuffer {
        let span = tracing::debug_span!("scan", %language, bytes = text.len());
        let _entered = span.enter();

        let profile = language.profile();
        let mut collector = DiagnosticCollector::new();
        let mut delimiters = DelimiterTracker::new(text, profile);
        let mut indentation = profile
            .indentation_sensitive
            .then(|| IndentationTracker::new(text, self.options.tab_width));

        for event in Tokenizer::new(text, profile) {
            match event {
                LexEvent::Diagnostic(diagnostic) => collector.append(diagnostic),
                LexEvent::Token(token) => {
                    if let Some(tracker) = indentation.as_mut() {
                        tracker.observe(&token, &mut collector);
                    }
                    delimiters.observe(&token, &mut collector);
                }
            }
        }
        delimiters.finish(&mut collector);

        let buffer = collector.finalize();
        tracing::debug!(
            diagnostics = buffer.len(),
            capacity = buffer.capacity(),
            "scan complete"
        );
        buffer
    }
}

/// Scans `text` with default options.
///
/// # Errors
///
/// Returns [`ScanError::UnknownLanguage`] if `language_id` is not one of
/// `1 = C`, `2 = C++`, `3 = Java`, `4 = Python`.
pub fn scan(text: &[u8], language_id: i32) -> Result<DiagnosticBuffer, ScanError> {
    Scanner::new().scan(text, language_id)
}

/// Scans `text` as `language` with default options.
#[must_use]
pub fn scan_language(text: &[u8], language: SupportedLanguage) -> DiagnosticBuffer {
    Scanner::new().scan_language(text, language)
}
