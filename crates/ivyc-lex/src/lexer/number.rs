//! Integer and float literals.
//!
//! An integer is a run of decimal digits; it becomes a float only when
//! followed by `.` and a further digit -- `1.` alone stays an integer
//! followed by a `Dot` token, consistent with `Call`/`Get` postfix parsing.

use crate::token::TokenKind;
use crate::Lexer;

impl<'a> Lexer<'a> {
    pub(crate) fn lex_number(&mut self) -> TokenKind {
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        let is_float =
            self.cursor.current_char() == '.' && self.cursor.peek_char(1).is_ascii_digit();

        if is_float {
            self.cursor.advance(); // '.'
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }
            let text = self.cursor.slice_from(self.token_start);
            match text.parse::<f64>() {
                Ok(value) => TokenKind::Float(value),
                Err(_) => {
                    self.report_error(format!("invalid float literal '{text}'"));
                    TokenKind::Float(0.0)
                }
            }
        } else {
            let text = self.cursor.slice_from(self.token_start);
            match text.parse::<i64>() {
                Ok(value) => TokenKind::Integer(value),
                Err(_) => {
                    self.report_error(format!("integer literal '{text}' out of range"));
                    TokenKind::Integer(0)
                }
            }
        }
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
    fn decimal_integer() {
        assert_eq!(lex_one("42"), TokenKind::Integer(42));
        assert_eq!(lex_one("0"), TokenKind::Integer(0));
    }

    #[test]
    fn float_requires_digit_after_dot() {
        assert_eq!(lex_one("3.14"), TokenKind::Float(3.14));
    }

    #[test]
    fn trailing_dot_without_digit_stays_an_integer() {
        assert_eq!(lex_one("1.size()"), TokenKind::Integer(1));
    }
}
