//! Type-node parsing: primitives, arrays, references, function types.

use ivyc_lex::TokenKind;
use ivyc_util::Symbol;

use crate::ast::{ReferenceKind, Type};
use crate::parser::Parser;

impl<'a> Parser<'a> {
    /// Parses a type-node. Reference kinds are read from a leading `&&`,
    /// `&`, or `*`; a bare name defaults to no reference wrapper at all (the
    /// Immutable-reference default for parameter positions is applied later,
    /// by the translator, since it depends on where the type appears).
    pub(crate) fn parse_type(&mut self) -> Option<Type> {
        let base = if self.match_kind(&TokenKind::AndAnd) {
            Type::Reference(Box::new(self.parse_type()?), ReferenceKind::Move)
        } else if self.match_kind(&TokenKind::Ampersand) {
            Type::Reference(Box::new(self.parse_type()?), ReferenceKind::Mutable)
        } else if self.match_kind(&TokenKind::Star) {
            Type::Reference(Box::new(self.parse_type()?), ReferenceKind::Copy)
        } else {
            self.parse_function_or_primitive_type()?
        };

        self.parse_array_suffix(base)
    }

    fn parse_function_or_primitive_type(&mut self) -> Option<Type> {
        if self.match_kind(&TokenKind::LParen) {
            let mut params = Vec::new();
            if !self.check(&TokenKind::RParen) {
                loop {
                    params.push(self.parse_type()?);
                    if !self.match_kind(&TokenKind::Comma) {
                        break;
                    }
                }
            }
            self.expect(&TokenKind::RParen, "')' after function type parameters")?;
            self.expect(&TokenKind::Arrow, "'->' in function type")?;
            let ret = self.parse_type()?;
            return Some(Type::Function(params, Box::new(ret)));
        }

        let name = self.parse_type_name()?;
        Some(Type::Primitive(name))
    }

    fn parse_type_name(&mut self) -> Option<Symbol> {
        match self.current_kind().clone() {
            TokenKind::Identifier(sym) => {
                self.advance();
                Some(sym)
            }
            _ => {
                self.error(format!(
                    "expected a type name, found '{}'",
                    self.current().lexeme
                ));
                None
            }
        }
    }

    /// `T[]` is an array of `T`; multiple `[]` suffixes compose by nesting.
    fn parse_array_suffix(&mut self, mut ty: Type) -> Option<Type> {
        while self.check(&TokenKind::LBracket) {
            let checkpoint = self.save();
            self.advance();
            if self.match_kind(&TokenKind::RBracket) {
                ty = Type::Array(Box::new(ty));
            } else {
                self.restore(checkpoint);
                break;
            }
        }
        Some(ty)
    }
}
