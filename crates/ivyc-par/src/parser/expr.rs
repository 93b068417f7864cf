//! Expression parsing: a Pratt-style precedence ladder implemented as one
//! recursive-descent function per level (§4.2's precedence table, lowest to
//! highest), plus primary/postfix parsing and the generics speculative
//! parse this is the one place the grammar isn't predictive LL(1).

use ivyc_lex::TokenKind;

use crate::ast::{AssignOp, BinOp, Expr, Literal, LogicalOp, Param, UnOp};
use crate::parser::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn parse_expr(&mut self) -> Option<Expr> {
        self.parse_assignment()
    }

    fn parse_assignment(&mut self) -> Option<Expr> {
        let target = self.parse_logical_or()?;

        let op = match self.current_kind() {
            TokenKind::Eq => AssignOp::Assign,
            TokenKind::PlusEq => AssignOp::AddAssign,
            TokenKind::MinusEq => AssignOp::SubAssign,
            TokenKind::StarEq => AssignOp::MulAssign,
            TokenKind::SlashEq => AssignOp::DivAssign,
            TokenKind::PercentEq => AssignOp::ModAssign,
            _ => return Some(target),
        };
        self.advance();

        // Right-associative: `a = b = c` parses as `a = (b = c)`.
        let value = self.parse_assignment()?;
        self.build_assignment(target, op, value)
    }

    /// Validates the assignment target per §4.2 and rewrites `Get = value`
    /// into `Set(object, name, value)`. Compound-assign on a field keeps the
    /// `Get` shape wrapped in `Assign` instead, since `Set` only models the
    /// plain-`=` case the specification names.
    fn build_assignment(&mut self, target: Expr, op: AssignOp, value: Expr) -> Option<Expr> {
        match target {
            Expr::Variable(_) | Expr::Subscript(_, _) => {
                Some(Expr::Assign(Box::new(target), op, Box::new(value)))
            }
            Expr::Get(object, name) if op == AssignOp::Assign => {
                Some(Expr::Set(object, name, Box::new(value)))
            }
            Expr::Get(_, _) => Some(Expr::Assign(Box::new(target), op, Box::new(value))),
            _ => {
                self.error("invalid assignment target");
                None
            }
        }
    }

    fn parse_logical_or(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_logical_and()?;
        while self.match_kind(&TokenKind::OrOr) {
            let rhs = self.parse_logical_and()?;
            lhs = Expr::Logical(Box::new(lhs), LogicalOp::Or, Box::new(rhs));
        }
        Some(lhs)
    }

    fn parse_logical_and(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_equality()?;
        while self.match_kind(&TokenKind::AndAnd) {
            let rhs = self.parse_equality()?;
            lhs = Expr::Logical(Box::new(lhs), LogicalOp::And, Box::new(rhs));
        }
        Some(lhs)
    }

    fn parse_equality(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_comparison()?;
        loop {
            let op = match self.current_kind() {
                TokenKind::EqEq => BinOp::Eq,
                TokenKind::NotEq => BinOp::Ne,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_comparison()?;
            lhs = Expr::Binary(Box::new(lhs), op, Box::new(rhs));
        }
        Some(lhs)
    }

    fn parse_comparison(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_additive()?;
        loop {
            let op = match self.current_kind() {
                TokenKind::Lt => BinOp::Lt,
                TokenKind::LtEq => BinOp::Le,
                TokenKind::Gt => BinOp::Gt,
                TokenKind::GtEq => BinOp::Ge,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_additive()?;
            lhs = Expr::Binary(Box::new(lhs), op, Box::new(rhs));
        }
        Some(lhs)
    }

    fn parse_additive(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_multiplicative()?;
        loop {
            let op = match self.current_kind() {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_multiplicative()?;
            lhs = Expr::Binary(Box::new(lhs), op, Box::new(rhs));
        }
        Some(lhs)
    }

    fn parse_multiplicative(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.current_kind() {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Percent => BinOp::Mod,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_unary()?;
            lhs = Expr::Binary(Box::new(lhs), op, Box::new(rhs));
        }
        Some(lhs)
    }

    fn parse_unary(&mut self) -> Option<Expr> {
        let op = match self.current_kind() {
            TokenKind::Bang => UnOp::Not,
            TokenKind::Minus => UnOp::Neg,
            TokenKind::PlusPlus => UnOp::PreInc,
            TokenKind::MinusMinus => UnOp::PreDec,
            TokenKind::Star => UnOp::Deref,
            TokenKind::AndAnd => UnOp::RefRef,
            TokenKind::Ampersand => UnOp::Ref,
            _ => return self.parse_postfix(),
        };
        self.advance();
        let operand = self.parse_unary()?;
        Some(Expr::Unary(op, Box::new(operand)))
    }

    /// Postfix chain: call, subscript, field/scope access, post-inc/dec, and
    /// -- only directly after a bare identifier -- a speculative attempt at
    /// a generic call (§4.2, §9: `f<a,b>(c)` vs. `f < a, b > (c)`).
    fn parse_postfix(&mut self) -> Option<Expr> {
        let mut expr = self.parse_primary()?;
        loop {
            if self.match_kind(&TokenKind::LParen) {
                let args = self.parse_call_args()?;
                expr = Expr::Call(Box::new(expr), args, None);
            } else if self.match_kind(&TokenKind::LBracket) {
                let index = self.parse_expr()?;
                self.expect(&TokenKind::RBracket, "']' after index expression")?;
                expr = Expr::Subscript(Box::new(expr), Box::new(index));
            } else if self.match_kind(&TokenKind::Dot) {
                let name = self.parse_ident()?;
                expr = Expr::Get(Box::new(expr), name);
            } else if self.match_kind(&TokenKind::ColonColon) {
                let name = self.parse_ident()?;
                expr = Expr::Scope(Box::new(expr), name);
            } else if self.match_kind(&TokenKind::PlusPlus) {
                expr = Expr::Unary(UnOp::PostInc, Box::new(expr));
            } else if self.match_kind(&TokenKind::MinusMinus) {
                expr = Expr::Unary(UnOp::PostDec, Box::new(expr));
            } else if matches!(expr, Expr::Variable(_)) && self.check(&TokenKind::Lt) {
                match self.try_parse_generic_call(&expr) {
                    Some(call) => expr = call,
                    None => break,
                }
            } else {
                break;
            }
        }
        Some(expr)
    }

    /// Attempts `'<' Type (',' Type)* '>' '('`; on any failure, rolls the
    /// cursor back so the `<` is free to be read as a comparison operator by
    /// the caller one level up the ladder.
    fn try_parse_generic_call(&mut self, callee: &Expr) -> Option<Expr> {
        let checkpoint = self.save();
        self.begin_speculative();

        let parsed = (|| -> Option<Vec<_>> {
            self.advance(); // '<'
            let mut type_args = Vec::new();
            if !self.check(&TokenKind::Gt) {
                loop {
                    type_args.push(self.parse_type()?);
                    if !self.match_kind(&TokenKind::Comma) {
                        break;
                    }
                }
            }
            self.expect(&TokenKind::Gt, "'>' closing generic argument list")?;
            self.expect(&TokenKind::LParen, "'(' after generic argument list")?;
            Some(type_args)
        })();

        let result = parsed.and_then(|type_args| {
            self.parse_call_args()
                .map(|args| Expr::Call(Box::new(callee.clone()), args, Some(type_args)))
        });

        self.end_speculative();
        if result.is_none() {
            self.restore(checkpoint);
        }
        result
    }

    /// Parses comma-separated call arguments, assuming the opening `(` has
    /// already been consumed; consumes through the closing `)`.
    fn parse_call_args(&mut self) -> Option<Vec<Expr>> {
        let mut args = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                args.push(self.parse_expr()?);
                if !self.match_kind(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RParen, "')' after argument list")?;
        Some(args)
    }

    fn parse_primary(&mut self) -> Option<Expr> {
        match self.current_kind().clone() {
            TokenKind::Integer(n) => {
                self.advance();
                Some(Expr::Literal(Literal::Integer(n)))
            }
            TokenKind::Float(f) => {
                self.advance();
                Some(Expr::Literal(Literal::Float(f)))
            }
            TokenKind::Str(s) => {
                self.advance();
                Some(Expr::Literal(Literal::Str(s)))
            }
            TokenKind::Char(c) => {
                self.advance();
                Some(Expr::Literal(Literal::Char(c)))
            }
            TokenKind::True => {
                self.advance();
                Some(Expr::Literal(Literal::Bool(true)))
            }
            TokenKind::False => {
                self.advance();
                Some(Expr::Literal(Literal::Bool(false)))
            }
            TokenKind::This => {
                self.advance();
                Some(Expr::This)
            }
            TokenKind::New => self.parse_new_expr(),
            TokenKind::TypeCast => self.parse_type_cast_expr(),
            TokenKind::Identifier(sym) => {
                self.advance();
                Some(Expr::Variable(sym))
            }
            TokenKind::LParen => self.parse_grouping(),
            TokenKind::LBracket => self.parse_array_literal_or_lambda(),
            _ => {
                self.error(format!(
                    "expected expression, found '{}'",
                    self.current().lexeme
                ));
                None
            }
        }
    }

    fn parse_grouping(&mut self) -> Option<Expr> {
        self.advance(); // '('
        let inner = self.parse_expr()?;
        self.expect(&TokenKind::RParen, "')' closing a parenthesized expression")?;
        Some(Expr::Grouping(Box::new(inner)))
    }

    fn parse_new_expr(&mut self) -> Option<Expr> {
        self.advance(); // 'new'
        let name = self.parse_ident()?;
        self.expect(&TokenKind::LParen, "'(' after a class name in 'new'")?;
        let args = self.parse_call_args()?;
        Some(Expr::New(name, args))
    }

    fn parse_type_cast_expr(&mut self) -> Option<Expr> {
        self.advance(); // 'type_cast'
        self.expect(&TokenKind::Lt, "'<' after 'type_cast'")?;
        let ty = self.parse_type()?;
        self.expect(&TokenKind::Gt, "'>' after a 'type_cast' target type")?;
        self.expect(&TokenKind::LParen, "'(' after 'type_cast<T>'")?;
        let inner = self.parse_expr()?;
        self.expect(&TokenKind::RParen, "')' closing 'type_cast'")?;
        Some(Expr::TypeCast(ty, Box::new(inner)))
    }

    /// Disambiguates `[](params) { body }` lambdas from `[a, b, c]` array
    /// literals by the three-token prefix `[`, `]`, `(` (§4.2).
    fn parse_array_literal_or_lambda(&mut self) -> Option<Expr> {
        if matches!(self.peek(1), TokenKind::RBracket) && matches!(self.peek(2), TokenKind::LParen)
        {
            return self.parse_lambda();
        }

        self.advance(); // '['
        let mut elements = Vec::new();
        if !self.check(&TokenKind::RBracket) {
            loop {
                elements.push(self.parse_expr()?);
                if !self.match_kind(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RBracket, "']' closing an array literal")?;
        Some(Expr::ArrayLiteral(elements))
    }

    fn parse_lambda(&mut self) -> Option<Expr> {
        self.advance(); // '['
        self.advance(); // ']'
        let params = self.parse_param_list()?;
        let ret = if self.match_kind(&TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };
        let body = self.parse_block()?;
        Some(Expr::Lambda(params, ret, Box::new(body)))
    }

    /// Shared by function/method declarations and lambdas: `(name: T, ...)`.
    pub(crate) fn parse_param_list(&mut self) -> Option<Vec<Param>> {
        self.expect(&TokenKind::LParen, "'(' to start a parameter list")?;
        let mut params = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                let span = self.current_span();
                let name = self.parse_ident()?;
                self.expect(&TokenKind::Colon, "':' before a parameter type")?;
                let ty = self.parse_type()?;
                params.push(Param { name, ty, span });
                if !self.match_kind(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RParen, "')' closing a parameter list")?;
        Some(params)
    }
}
