//! Operators, via maximal munch: each leading character commits to the
//! longest legal operator starting with it.

use crate::token::TokenKind;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// `+`, `+=`
    pub(crate) fn lex_plus(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            TokenKind::PlusEq
        } else if self.cursor.match_char('+') {
            TokenKind::PlusPlus
        } else {
            TokenKind::Plus
        }
    }

    /// `-`, `->`, `-=`, `--`
    pub(crate) fn lex_minus(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('>') {
            TokenKind::Arrow
        } else if self.cursor.match_char('=') {
            TokenKind::MinusEq
        } else if self.cursor.match_char('-') {
            TokenKind::MinusMinus
        } else {
            TokenKind::Minus
        }
    }

    /// `*`, `*=`
    pub(crate) fn lex_star(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            TokenKind::StarEq
        } else {
            TokenKind::Star
        }
    }

    /// `/`, `/=`, or enters a line/block comment (never reached for
    /// comments directly -- those are consumed by `skip_whitespace_and_comments`
    /// before dispatch, so this only ever sees `/` as an operator).
    pub(crate) fn lex_slash(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            TokenKind::SlashEq
        } else {
            TokenKind::Slash
        }
    }

    /// `%`, `%=`
    pub(crate) fn lex_percent(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            TokenKind::PercentEq
        } else {
            TokenKind::Percent
        }
    }

    /// `=`, `==`
    pub(crate) fn lex_equals(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            TokenKind::EqEq
        } else {
            TokenKind::Eq
        }
    }

    /// `!`, `!=`
    pub(crate) fn lex_bang(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            TokenKind::NotEq
        } else {
            TokenKind::Bang
        }
    }

    /// `<`, `<=`, `<<`
    pub(crate) fn lex_less(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            TokenKind::LtEq
        } else if self.cursor.match_char('<') {
            TokenKind::Shl
        } else {
            TokenKind::Lt
        }
    }

    /// `>`, `>=`, `>>`
    pub(crate) fn lex_greater(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            TokenKind::GtEq
        } else if self.cursor.match_char('>') {
            TokenKind::Shr
        } else {
            TokenKind::Gt
        }
    }

    /// `&`, `&&`
    pub(crate) fn lex_ampersand(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('&') {
            TokenKind::AndAnd
        } else {
            TokenKind::Ampersand
        }
    }

    /// `|`, `||`
    pub(crate) fn lex_pipe(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('|') {
            TokenKind::OrOr
        } else {
            TokenKind::Pipe
        }
    }

    /// `^`
    pub(crate) fn lex_caret(&mut self) -> TokenKind {
        self.cursor.advance();
        TokenKind::Caret
    }

    /// `:`, `::`
    pub(crate) fn lex_colon(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char(':') {
            TokenKind::ColonColon
        } else {
            TokenKind::Colon
        }
    }

    /// `.`
    pub(crate) fn lex_dot(&mut self) -> TokenKind {
        self.cursor.advance();
        TokenKind::Dot
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
    fn compound_assign_operators() {
        assert_eq!(lex_one("+="), TokenKind::PlusEq);
        assert_eq!(lex_one("-="), TokenKind::MinusEq);
        assert_eq!(lex_one("*="), TokenKind::StarEq);
        assert_eq!(lex_one("/="), TokenKind::SlashEq);
        assert_eq!(lex_one("%="), TokenKind::PercentEq);
    }

    #[test]
    fn increment_and_decrement() {
        assert_eq!(lex_one("++"), TokenKind::PlusPlus);
        assert_eq!(lex_one("--"), TokenKind::MinusMinus);
    }

    #[test]
    fn shifts_and_logical() {
        assert_eq!(lex_one("<<"), TokenKind::Shl);
        assert_eq!(lex_one(">>"), TokenKind::Shr);
        assert_eq!(lex_one("&&"), TokenKind::AndAnd);
        assert_eq!(lex_one("||"), TokenKind::OrOr);
    }

    #[test]
    fn scope_and_arrow() {
        assert_eq!(lex_one("::"), TokenKind::ColonColon);
        assert_eq!(lex_one("->"), TokenKind::Arrow);
    }

    #[test]
    fn maximal_munch_prefers_longer_operator() {
        assert_eq!(lex_one("!="), TokenKind::NotEq);
        assert_eq!(lex_one("!"), TokenKind::Bang);
        assert_eq!(lex_one("<="), TokenKind::LtEq);
        assert_eq!(lex_one("<"), TokenKind::Lt);
    }
}
