//! Identifiers and keyword lookup.

use ivyc_util::Symbol;

use super::core::is_ident_continue;
use crate::token::{keyword_from_ident, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes `[A-Za-z_][A-Za-z0-9_]*`, resolving it against the fixed
    /// keyword table before falling back to a plain identifier.
    pub(crate) fn lex_identifier(&mut self) -> TokenKind {
        while is_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(self.token_start);
        keyword_from_ident(text).unwrap_or_else(|| TokenKind::Identifier(Symbol::intern(text)))
    }
}

#[cfg(test)]
mod tests {
    use ivyc_util::{FileId, Handler};

    use crate::token::TokenKind;
    use crate::Lexer;

    fn lex_one(source: &str) -> TokenKind {
        let handler = Handler::new();
        Lexer::new(source, FileId::DUMMY, &handler)
            .tokenize()
            .remove(0)
            .kind
    }

    #[test]
    fn plain_identifier() {
        assert_eq!(
            lex_one("balance"),
            TokenKind::Identifier(ivyc_util::Symbol::intern("balance"))
        );
    }

    #[test]
    fn identifier_with_underscores_and_digits() {
        assert_eq!(
            lex_one("_foo_123"),
            TokenKind::Identifier(ivyc_util::Symbol::intern("_foo_123"))
        );
    }

    #[test]
    fn keywords_take_priority_over_identifier() {
        assert_eq!(lex_one("let"), TokenKind::Let);
        assert_eq!(lex_one("fn"), TokenKind::Fn);
        assert_eq!(lex_one("fallthrough"), TokenKind::Fallthrough);
        assert_eq!(lex_one("type_cast"), TokenKind::TypeCast);
    }
}
