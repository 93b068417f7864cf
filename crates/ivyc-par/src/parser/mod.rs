//! Recursive-descent parser: token list -> `Vec<Stmt>`.
//!
//! The grammar is split across sibling modules the way the token dispatch
//! table in `§4.2` is organized: [`declaration`] handles top-level and
//! block-level declaration dispatch, [`stmt`] handles the control-flow and
//! block forms, [`expr`] is the Pratt ladder plus primary/postfix parsing,
//! [`aggregate`] handles `class`/`struct` member lists, and [`types`] parses
//! type-nodes. All of them are `impl<'a> Parser<'a>` blocks over the single
//! [`Parser`] defined here.

mod aggregate;
mod declaration;
mod expr;
mod stmt;
mod types;

use ivyc_util::{DiagnosticBuilder, FileId, Handler, Span};

use ivyc_lex::{Token, TokenKind};

use crate::ast::{Ast, Stmt};
use ivyc_util::Symbol;

/// Keywords and tokens the parser resynchronizes on after a parse error
/// (§4.2 error recovery).
pub(crate) const SYNC_KEYWORDS: &[TokenKind] = &[
    TokenKind::Class,
    TokenKind::Fn,
    TokenKind::Let,
    TokenKind::Mut,
    TokenKind::For,
    TokenKind::If,
    TokenKind::While,
    TokenKind::Return,
    TokenKind::Switch,
];

pub struct Parser<'a> {
    tokens: Vec<Token>,
    position: usize,
    handler: &'a Handler,
    file_id: FileId,
    /// Nonzero while a speculative parse (generics vs. comparison, §9) is in
    /// flight; [`Parser::error`] is silenced during a failed attempt since
    /// the cursor rolls back and the attempt never happened as far as
    /// diagnostics are concerned.
    speculative_depth: u32,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, file_id: FileId, handler: &'a Handler) -> Self {
        Self {
            tokens,
            position: 0,
            handler,
            file_id,
            speculative_depth: 0,
        }
    }

    /// Parses the whole token stream into a top-level statement list,
    /// recovering from errors at declaration boundaries rather than
    /// stopping at the first one.
    pub fn parse(mut self) -> Ast {
        let mut stmts = Vec::new();
        while !self.is_at_end() {
            match self.parse_declaration() {
                Some(stmt) => stmts.push(stmt),
                None => self.synchronize(),
            }
        }
        stmts
    }

    pub(crate) fn current(&self) -> &Token {
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    pub(crate) fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.current().kind, TokenKind::EndOfInput)
    }

    pub(crate) fn advance(&mut self) -> Token {
        let tok = self.current().clone();
        if !self.is_at_end() {
            self.position += 1;
        }
        tok
    }

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.current_kind()) == std::mem::discriminant(kind)
    }

    pub(crate) fn match_kind(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: &TokenKind, what: &str) -> Option<Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            self.error(format!(
                "expected {what}, found '{}'",
                self.current().lexeme
            ));
            None
        }
    }

    pub(crate) fn current_span(&self) -> Span {
        let tok = self.current();
        Span::with_file(0, 0, self.file_id, tok.line, tok.column)
    }

    pub(crate) fn span_from(&self, start: Span) -> Span {
        start.merge(self.current_span())
    }

    pub(crate) fn error(&self, message: impl Into<String>) {
        if self.speculative_depth == 0 {
            DiagnosticBuilder::error(message, self.current_span()).emit(self.handler);
        }
    }

    /// Reads an identifier without consuming it, erroring (unless
    /// speculating) and returning `None` if the current token isn't one.
    pub(crate) fn parse_ident(&mut self) -> Option<Symbol> {
        match self.current_kind().clone() {
            TokenKind::Identifier(sym) => {
                self.advance();
                Some(sym)
            }
            _ => {
                self.error(format!(
                    "expected an identifier, found '{}'",
                    self.current().lexeme
                ));
                None
            }
        }
    }

    /// Looks ahead `offset` tokens without consuming any.
    pub(crate) fn peek(&self, offset: usize) -> &TokenKind {
        let index = (self.position + offset).min(self.tokens.len() - 1);
        &self.tokens[index].kind
    }

    /// Cursor checkpoint for speculative parsing (generics vs. comparison
    /// disambiguation, §4.2 and §9).
    pub(crate) fn save(&self) -> usize {
        self.position
    }

    pub(crate) fn restore(&mut self, checkpoint: usize) {
        self.position = checkpoint;
    }

    pub(crate) fn begin_speculative(&mut self) {
        self.speculative_depth += 1;
    }

    pub(crate) fn end_speculative(&mut self) {
        self.speculative_depth -= 1;
    }

    /// Consumes tokens until just past the next semicolon, or until the
    /// next token starts a new declaration, per §4.2's synchronization set.
    fn synchronize(&mut self) {
        while !self.is_at_end() {
            if matches!(self.current_kind(), TokenKind::Semicolon) {
                self.advance();
                return;
            }
            if SYNC_KEYWORDS
                .iter()
                .any(|k| std::mem::discriminant(k) == std::mem::discriminant(self.current_kind()))
            {
                return;
            }
            self.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ivyc_lex::Lexer;

    fn parse(source: &str) -> (Ast, Handler) {
        let handler = Handler::new();
        let tokens = Lexer::new(source, FileId::DUMMY, &handler).tokenize();
        let ast = Parser::new(tokens, FileId::DUMMY, &handler).parse();
        (ast, handler)
    }

    #[test]
    fn empty_source_parses_to_empty_program() {
        let (ast, handler) = parse("");
        assert!(ast.is_empty());
        assert!(!handler.has_errors());
    }

    #[test]
    fn synchronize_skips_to_next_declaration_keyword() {
        let (ast, handler) = parse("let x = ; let y = 1;");
        assert!(handler.has_errors());
        assert!(ast
            .iter()
            .any(|s| matches!(s, Stmt::VarStmt { name, .. } if name.as_str() == "y")));
    }
}
