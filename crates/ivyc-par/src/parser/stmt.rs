//! Control-flow and block statement parsing. Declarations nested inside a
//! block (`let`, `fn`, `class`, ...) go back through
//! [`Parser::parse_declaration`], so a block is just a list of those.

use ivyc_lex::TokenKind;

use crate::ast::{Block, Case, Stmt};
use crate::parser::{Parser, SYNC_KEYWORDS};

impl<'a> Parser<'a> {
    pub(crate) fn parse_statement(&mut self) -> Option<Stmt> {
        match self.current_kind() {
            TokenKind::LBrace => self.parse_block().map(Stmt::Block),
            TokenKind::If => self.parse_if_stmt(),
            TokenKind::While => self.parse_while_stmt(),
            TokenKind::For => self.parse_for_stmt(),
            TokenKind::Switch => self.parse_switch_stmt(),
            TokenKind::Break => {
                self.advance();
                self.expect(&TokenKind::Semicolon, "';' after 'break'")?;
                Some(Stmt::Break)
            }
            TokenKind::Fallthrough => {
                self.advance();
                self.expect(&TokenKind::Semicolon, "';' after 'fallthrough'")?;
                Some(Stmt::Fallthrough)
            }
            TokenKind::Return => self.parse_return_stmt(),
            _ => self.parse_expr_stmt(),
        }
    }

    pub(crate) fn parse_block(&mut self) -> Option<Block> {
        let span = self.current_span();
        self.expect(&TokenKind::LBrace, "'{' to start a block")?;
        let mut stmts = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            match self.parse_declaration() {
                Some(stmt) => stmts.push(stmt),
                None => self.synchronize_stmt(),
            }
        }
        self.expect(&TokenKind::RBrace, "'}' closing a block")?;
        Some(Block {
            stmts,
            span: self.span_from(span),
        })
    }

    fn parse_if_stmt(&mut self) -> Option<Stmt> {
        self.advance(); // 'if'
        self.expect(&TokenKind::LParen, "'(' after 'if'")?;
        let cond = self.parse_expr()?;
        self.expect(&TokenKind::RParen, "')' after an 'if' condition")?;
        let then_branch = Box::new(self.parse_declaration()?);
        let else_branch = if self.match_kind(&TokenKind::Else) {
            if self.check(&TokenKind::If) {
                Some(Box::new(self.parse_if_stmt()?))
            } else {
                Some(Box::new(self.parse_declaration()?))
            }
        } else {
            None
        };
        Some(Stmt::If(cond, then_branch, else_branch))
    }

    fn parse_while_stmt(&mut self) -> Option<Stmt> {
        self.advance(); // 'while'
        self.expect(&TokenKind::LParen, "'(' after 'while'")?;
        let cond = self.parse_expr()?;
        self.expect(&TokenKind::RParen, "')' after a 'while' condition")?;
        let body = Box::new(self.parse_declaration()?);
        Some(Stmt::While(cond, body))
    }

    /// `for (init?; cond?; step?) body`, each clause independently optional.
    fn parse_for_stmt(&mut self) -> Option<Stmt> {
        self.advance(); // 'for'
        self.expect(&TokenKind::LParen, "'(' after 'for'")?;

        let init = if self.match_kind(&TokenKind::Semicolon) {
            None
        } else if matches!(self.current_kind(), TokenKind::Let | TokenKind::Mut) {
            Some(Box::new(self.parse_var_stmt()?))
        } else {
            Some(Box::new(self.parse_expr_stmt()?))
        };

        let cond = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(&TokenKind::Semicolon, "';' after a 'for' condition")?;

        let step = if self.check(&TokenKind::RParen) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(&TokenKind::RParen, "')' closing a 'for' clause")?;

        let body = Box::new(self.parse_declaration()?);
        Some(Stmt::For(init, cond, step, body))
    }

    /// `switch (subject) { case v: stmts... case v: stmts... }`. Case bodies
    /// run statement-by-statement until the next `case` or the closing
    /// brace -- no `{}` required per case -- but are always wrapped into a
    /// [`Block`], matching the "every `Case` body is a `Block`" invariant.
    fn parse_switch_stmt(&mut self) -> Option<Stmt> {
        self.advance(); // 'switch'
        self.expect(&TokenKind::LParen, "'(' after 'switch'")?;
        let subject = self.parse_expr()?;
        self.expect(&TokenKind::RParen, "')' after a 'switch' subject")?;
        self.expect(&TokenKind::LBrace, "'{' to start a 'switch' body")?;

        let mut cases = Vec::new();
        while self.match_kind(&TokenKind::Case) {
            let value = self.parse_expr()?;
            self.expect(&TokenKind::Colon, "':' after a 'case' value")?;
            let body = self.parse_case_body()?;
            cases.push(Case { value, body });
        }

        self.expect(&TokenKind::RBrace, "'}' closing a 'switch' body")?;
        Some(Stmt::Switch(subject, cases))
    }

    fn parse_case_body(&mut self) -> Option<Block> {
        let span = self.current_span();
        let mut stmts = Vec::new();
        while !self.check(&TokenKind::Case) && !self.check(&TokenKind::RBrace) && !self.is_at_end()
        {
            match self.parse_declaration() {
                Some(stmt) => stmts.push(stmt),
                None => self.synchronize_stmt(),
            }
        }
        Some(Block {
            stmts,
            span: self.span_from(span),
        })
    }

    fn parse_return_stmt(&mut self) -> Option<Stmt> {
        self.advance(); // 'return'
        let value = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(&TokenKind::Semicolon, "';' after a 'return' statement")?;
        Some(Stmt::Return(value))
    }

    pub(crate) fn parse_expr_stmt(&mut self) -> Option<Stmt> {
        let expr = self.parse_expr()?;
        self.expect(&TokenKind::Semicolon, "';' after an expression statement")?;
        Some(Stmt::ExprStmt(expr))
    }

    /// Like the top-level synchronize, but also stops at a block's closing
    /// brace so a bad statement never eats the rest of its enclosing block.
    pub(crate) fn synchronize_stmt(&mut self) {
        while !self.is_at_end() && !self.check(&TokenKind::RBrace) {
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
