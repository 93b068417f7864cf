//! The pipeline-wide error kinds, shared so every phase raises the same
//! vocabulary instead of ad-hoc strings.

use crate::span::Span;
use std::path::PathBuf;
use thiserror::Error;

/// A single fatal cause, carrying the location it was raised at.
///
/// Lexing and parsing recover from these and keep collecting diagnostics via
/// [`crate::Handler`]; the translator treats its first `PipelineError` as
/// fatal and stops.
#[derive(Debug, Error, Clone)]
pub enum PipelineError {
    #[error("{0}: unterminated string or character literal, or unrecognized character")]
    LexError(String),

    #[error("{0}: {1}")]
    ParseError(Span, String),

    #[error("unknown standard library module `{0}`")]
    UnknownStdlibModule(String),

    #[error("could not load module `{path}`: {reason}")]
    ModuleLoadError { path: PathBuf, reason: String },

    #[error("{0}: cannot assign to immutable binding `{1}`")]
    ImmutableAssign(Span, String),

    #[error("{0}: `{1}` is private and cannot be accessed outside of `{2}`")]
    AccessViolation(Span, String, String),

    #[error("{0}: internal error: {1}")]
    InternalError(Span, String),
}

impl PipelineError {
    pub fn span(&self) -> Option<Span> {
        match self {
            PipelineError::ParseError(span, _)
            | PipelineError::ImmutableAssign(span, _)
            | PipelineError::AccessViolation(span, _, _)
            | PipelineError::InternalError(span, _) => Some(*span),
            _ => None,
        }
    }
}

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
