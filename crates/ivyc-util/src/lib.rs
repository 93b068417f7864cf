//! ivyc-util - Shared foundation types for the Ivy transpiler.
//!
//! This crate has no knowledge of the Ivy grammar. It provides the small set
//! of types every later phase needs: interned identifiers ([`Symbol`]),
//! source locations ([`Span`], [`FileId`], [`SourceMap`]), and diagnostic
//! reporting ([`Diagnostic`], [`Handler`]).
//!
//! Keeping these in one crate means the lexer, parser, and translator all
//! agree on what a "place in the source" or a "reported error" looks like.

pub mod diagnostic;
pub mod error;
pub mod span;
pub mod symbol;

pub use diagnostic::{Diagnostic, DiagnosticBuilder, Handler, Level};
pub use span::{FileId, SourceFile, SourceMap, Span};
pub use symbol::Symbol;
