//! ivyc-par - Recursive-descent Pratt parser for Ivy.
//!
//! Turns a token list (from [`ivyc_lex`]) into the closed [`ast`] family,
//! recovering from parse errors at declaration boundaries (§4.2) rather than
//! stopping at the first one.

pub mod ast;
mod parser;

pub use ast::Ast;
pub use parser::Parser;
