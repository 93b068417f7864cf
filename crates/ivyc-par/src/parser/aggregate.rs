//! `class`/`struct` body parsing: access-mode sections, `static` members,
//! and constructor/destructor detection by name (§4.2).

use ivyc_lex::TokenKind;
use ivyc_util::Symbol;

use crate::ast::{Access, AggregateDecl, FunctionDecl, Member, MemberRole, Stmt};
use crate::parser::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn parse_aggregate(&mut self, is_class: bool) -> Option<Stmt> {
        let span = self.current_span();
        self.advance(); // 'class' or 'struct'
        let name = self.parse_ident()?;
        let type_params = self.parse_optional_type_params()?;
        self.expect(&TokenKind::LBrace, "'{' to start a class/struct body")?;

        let mut members = Vec::new();
        // Public by default until the first `public:`/`private:` label (§4.2).
        let mut access = Access::Public;
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            if self.match_kind(&TokenKind::Public) {
                self.expect(&TokenKind::Colon, "':' after 'public'")?;
                access = Access::Public;
                continue;
            }
            if self.match_kind(&TokenKind::Private) {
                self.expect(&TokenKind::Colon, "':' after 'private'")?;
                access = Access::Private;
                continue;
            }

            // `static` attaches only to the single member that follows.
            let is_static = self.match_kind(&TokenKind::Static);
            match self.parse_member(name, is_static, access) {
                Some(member) => members.push(member),
                None => self.synchronize_member(),
            }
        }

        self.expect(&TokenKind::RBrace, "'}' closing a class/struct body")?;
        self.match_kind(&TokenKind::Semicolon);

        let decl = AggregateDecl {
            name,
            type_params,
            members,
            span: self.span_from(span),
        };
        Some(if is_class {
            Stmt::Class(decl)
        } else {
            Stmt::Struct(decl)
        })
    }

    fn parse_member(&mut self, owner: Symbol, is_static: bool, access: Access) -> Option<Member> {
        match self.current_kind() {
            TokenKind::Fn => {
                let (decl, role) = self.parse_member_function(owner)?;
                Some(Member {
                    declaration: Stmt::Function(decl),
                    access,
                    is_static,
                    role,
                })
            }
            TokenKind::Let | TokenKind::Mut => {
                let declaration = self.parse_var_stmt()?;
                Some(Member {
                    declaration,
                    access,
                    is_static,
                    role: MemberRole::Field,
                })
            }
            _ => {
                self.error(format!(
                    "expected a member declaration, found '{}'",
                    self.current().lexeme
                ));
                None
            }
        }
    }

    /// A leading `~` before the name marks a destructor; a name matching
    /// the owning class marks a constructor. Both are stored under the
    /// class's own name (never `~Name`) -- the `MemberRole` already carries
    /// the distinction, so the translator doesn't need to inspect the name.
    fn parse_member_function(&mut self, owner: Symbol) -> Option<(FunctionDecl, MemberRole)> {
        let span = self.current_span();
        self.advance(); // 'fn'
        let is_destructor = self.match_kind(&TokenKind::Tilde);
        let name = self.parse_ident()?;
        let role = if is_destructor {
            MemberRole::Destructor
        } else if name == owner {
            MemberRole::Constructor
        } else {
            MemberRole::Method
        };

        let type_params = self.parse_optional_type_params()?;
        let params = self.parse_param_list()?;
        let ret = if self.match_kind(&TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };
        let body = self.parse_block()?;

        let effective_name = if is_destructor { owner } else { name };
        Some((
            FunctionDecl {
                name: effective_name,
                type_params,
                params,
                ret,
                body,
                span: self.span_from(span),
            },
            role,
        ))
    }

    fn synchronize_member(&mut self) {
        while !self.is_at_end() && !self.check(&TokenKind::RBrace) {
            if matches!(self.current_kind(), TokenKind::Semicolon) {
                self.advance();
                return;
            }
            if matches!(
                self.current_kind(),
                TokenKind::Fn
                    | TokenKind::Let
                    | TokenKind::Mut
                    | TokenKind::Public
                    | TokenKind::Private
                    | TokenKind::Static
            ) {
                return;
            }
            self.advance();
        }
    }
}
