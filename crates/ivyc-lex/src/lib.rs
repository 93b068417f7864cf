//! ivyc-lex - Tokenizes Ivy source text.
//!
//! Converts a UTF-8 source string into an ordered token list terminated by
//! one `EndOfInput` token. Lex errors are reported through
//! [`ivyc_util::Handler`] but never halt tokenization: the lexer always
//! produces a best-effort token and continues, leaving error-free-ness to be
//! checked by the caller after the fact.

mod cursor;
mod lexer;
pub mod token;

pub use lexer::Lexer;
pub use token::{Token, TokenKind};
