//! Syntax diagnostics and the error sink.
//!
//! Syntax errors are diagnostics, not exceptions: the engine reports
//! them through an [`ErrorSink`] and keeps parsing when recovery
//! succeeds. Nothing a sink does influences control flow.

use std::fmt;

use text_size::TextRange;

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {}..{}",
            self.message,
            u32::from(self.range.start()),
            u32::from(self.range.end())
        )
    }
}

/// Receiver for syntax diagnostics emitted during a parse.
pub trait ErrorSink {
    fn report(&mut self, error: SyntaxError);
}

/// The default sink: collects diagnostics for the scan report.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    errors: Vec<SyntaxError>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_errors(self) -> Vec<SyntaxError> {
        self.errors
    }
}

impl ErrorSink for DiagnosticSink {
    fn report(&mut self, error: SyntaxError) {
        self.errors.push(error);
    }
}
