//! Diagnostic reporting: errors, warnings, and the [`Handler`] that collects them.
//!
//! # Examples
//!
//! ```
//! use ivyc_util::diagnostic::{Handler, Level, Span};
//!
//! let handler = Handler::new();
//! handler.emit(Level::Error, "unterminated string literal", Span::DUMMY);
//! assert!(handler.has_errors());
//! ```

pub use crate::span::Span;
use std::cell::RefCell;
use std::fmt;

/// Severity of a reported [`Diagnostic`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Error,
    Warning,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
        }
    }
}

/// A single reported problem: a severity, a message, the source location it
/// applies to, and any supporting notes.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub span: Span,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn new(level: Level, message: impl Into<String>, span: Span) -> Self {
        Self {
            level,
            message: message.into(),
            span,
            notes: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Error, message, span)
    }

    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Warning, message, span)
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}: {}",
            self.span.line, self.span.column, self.level, self.message
        )?;
        for note in &self.notes {
            write!(f, "\n  note: {}", note)?;
        }
        Ok(())
    }
}

/// Builder for a [`Diagnostic`], used where a call site wants to attach
/// several notes before handing the result to a [`Handler`].
pub struct DiagnosticBuilder {
    diagnostic: Diagnostic,
}

impl DiagnosticBuilder {
    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self {
            diagnostic: Diagnostic::error(message, span),
        }
    }

    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self {
            diagnostic: Diagnostic::warning(message, span),
        }
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.diagnostic.notes.push(note.into());
        self
    }

    pub fn build(self) -> Diagnostic {
        self.diagnostic
    }

    pub fn emit(self, handler: &Handler) {
        handler.emit_diagnostic(self.diagnostic);
    }
}

/// Collects diagnostics emitted while a pipeline stage runs.
///
/// The lexer and parser keep running after recording an error and recover at
/// the next safe point; the translator stops at its first error. Either
/// policy is implemented by the caller, not by `Handler` itself -- `Handler`
/// only accumulates and reports counts.
#[derive(Default)]
pub struct Handler {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Handler {
    pub fn new() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    pub fn emit(&self, level: Level, message: impl Into<String>, span: Span) {
        self.emit_diagnostic(Diagnostic::new(level, message, span));
    }

    pub fn emit_diagnostic(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.borrow().iter().any(|d| d.level == Level::Error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == Level::Error)
            .count()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    /// The first error reported, if any -- the pipeline's fatal cause, since
    /// the translator fails with a single structured error rather than a
    /// full diagnostic list.
    pub fn first_error(&self) -> Option<Diagnostic> {
        self.diagnostics
            .borrow()
            .iter()
            .find(|d| d.level == Level::Error)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_tracks_error_count_separately_from_warnings() {
        let handler = Handler::new();
        handler.emit(Level::Warning, "unused import", Span::DUMMY);
        assert!(!handler.has_errors());
        handler.emit(Level::Error, "unexpected token", Span::DUMMY);
        assert!(handler.has_errors());
        assert_eq!(handler.error_count(), 1);
    }

    #[test]
    fn first_error_returns_the_earliest_one() {
        let handler = Handler::new();
        handler.emit(Level::Error, "first", Span::DUMMY);
        handler.emit(Level::Error, "second", Span::DUMMY);
        assert_eq!(handler.first_error().unwrap().message, "first");
    }

    #[test]
    fn builder_attaches_notes() {
        let handler = Handler::new();
        DiagnosticBuilder::error("type mismatch", Span::DUMMY)
            .note("expected `int`")
            .emit(&handler);
        let diags = handler.diagnostics();
        assert_eq!(diags[0].notes, vec!["expected `int`"]);
    }
}
