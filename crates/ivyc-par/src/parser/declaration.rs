//! Top-level and block-level declaration dispatch (§4.2): `package`,
//! `import`, `class`/`struct`, `enum`, `fn`, and `let`/`mut` all parse here;
//! anything else falls through to [`Parser::parse_statement`]. Blocks call
//! this same entry point per statement, so a local `fn`/`class`/`let` nests
//! exactly like a top-level one.

use ivyc_lex::TokenKind;
use ivyc_util::Symbol;

use crate::ast::{EnumDecl, FunctionDecl, Mutability, Stmt};
use crate::parser::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn parse_declaration(&mut self) -> Option<Stmt> {
        match self.current_kind() {
            TokenKind::Package => self.parse_package_decl(),
            TokenKind::Import => self.parse_import_decl(),
            TokenKind::Class => self.parse_aggregate(true),
            TokenKind::Struct => self.parse_aggregate(false),
            TokenKind::Enum => self.parse_enum_decl(),
            TokenKind::Fn => self.parse_function().map(Stmt::Function),
            TokenKind::Let | TokenKind::Mut => self.parse_var_stmt(),
            _ => self.parse_statement(),
        }
    }

    fn parse_package_decl(&mut self) -> Option<Stmt> {
        self.advance(); // 'package'
        let name = self.parse_ident()?;
        self.expect(&TokenKind::Semicolon, "';' after a package declaration")?;
        Some(Stmt::Package(name))
    }

    /// A bare identifier names a bundled stdlib module (`is_stdlib = true`);
    /// a quoted string names a file path, per the invariant that `is_stdlib`
    /// holds iff the import names a bare identifier.
    fn parse_import_decl(&mut self) -> Option<Stmt> {
        self.advance(); // 'import'
        let (path, is_stdlib) = match self.current_kind().clone() {
            TokenKind::Identifier(sym) => {
                self.advance();
                (sym, true)
            }
            TokenKind::Str(sym) => {
                self.advance();
                (sym, false)
            }
            _ => {
                self.error("expected a module name or a quoted path after 'import'");
                return None;
            }
        };
        let alias = if self.match_kind(&TokenKind::As) {
            Some(self.parse_ident()?)
        } else {
            None
        };
        self.expect(&TokenKind::Semicolon, "';' after an import declaration")?;
        Some(Stmt::Import {
            path,
            alias,
            is_stdlib,
        })
    }

    pub(crate) fn parse_function(&mut self) -> Option<FunctionDecl> {
        let span = self.current_span();
        self.advance(); // 'fn'
        let name = self.parse_ident()?;
        let type_params = self.parse_optional_type_params()?;
        let params = self.parse_param_list()?;
        let ret = if self.match_kind(&TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };
        let body = self.parse_block()?;
        Some(FunctionDecl {
            name,
            type_params,
            params,
            ret,
            body,
            span: self.span_from(span),
        })
    }

    /// `<T, U, ...>`, or an empty list when absent -- `type_params` is
    /// always present on a `FunctionDecl`/`AggregateDecl`, never `Option`.
    pub(crate) fn parse_optional_type_params(&mut self) -> Option<Vec<Symbol>> {
        let mut params = Vec::new();
        if self.match_kind(&TokenKind::Lt) {
            loop {
                params.push(self.parse_ident()?);
                if !self.match_kind(&TokenKind::Comma) {
                    break;
                }
            }
            self.expect(&TokenKind::Gt, "'>' closing a generic parameter list")?;
        }
        Some(params)
    }

    fn parse_enum_decl(&mut self) -> Option<Stmt> {
        let span = self.current_span();
        self.advance(); // 'enum'
        let name = self.parse_ident()?;
        self.expect(&TokenKind::LBrace, "'{' to start an enum body")?;
        let mut members = Vec::new();
        if !self.check(&TokenKind::RBrace) {
            loop {
                members.push(self.parse_ident()?);
                if !self.match_kind(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RBrace, "'}' closing an enum body")?;
        Some(Stmt::Enum(EnumDecl {
            name,
            members,
            span: self.span_from(span),
        }))
    }

    /// `let`/`mut` are mutually exclusive (the dispatch above only reaches
    /// here on one or the other), so `mutability` is never ambiguous.
    pub(crate) fn parse_var_stmt(&mut self) -> Option<Stmt> {
        let span = self.current_span();
        let mutability = if self.match_kind(&TokenKind::Let) {
            Mutability::Let
        } else {
            self.expect(&TokenKind::Mut, "'let' or 'mut'")?;
            Mutability::Mut
        };
        let name = self.parse_ident()?;
        let ty = if self.match_kind(&TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };
        let initializer = if self.match_kind(&TokenKind::Eq) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.expect(&TokenKind::Semicolon, "';' after a variable declaration")?;
        Some(Stmt::VarStmt {
            name,
            ty,
            initializer,
            mutability,
            span: self.span_from(span),
        })
    }
}
