//! String and character literals.
//!
//! Neither form processes escape sequences -- the content between the
//! quotes is carried through verbatim, matching the translator's contract
//! to emit literal string content unchanged.

use crate::token::TokenKind;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// `"…"`. An embedded newline is allowed and advances the line counter;
    /// a missing closing quote is a lex error, but the best-effort content
    /// read so far is still returned as a `Str` token.
    pub(crate) fn lex_string(&mut self) -> TokenKind {
        self.cursor.advance(); // opening quote
        let content_start = self.cursor.position();

        while !self.cursor.is_at_end() && self.cursor.current_char() != '"' {
            self.cursor.advance();
        }

        let content = self.cursor.slice_from(content_start).to_string();

        if self.cursor.current_char() == '"' {
            self.cursor.advance();
        } else {
            self.report_error("unterminated string literal".to_string());
        }

        TokenKind::Str(ivyc_util::Symbol::intern(&content))
    }

    /// `'c'`. Exactly one character between the quotes.
    pub(crate) fn lex_char(&mut self) -> TokenKind {
        self.cursor.advance(); // opening quote

        if self.cursor.is_at_end() || self.cursor.current_char() == '\'' {
            self.report_error("empty character literal".to_string());
            return TokenKind::Char('\0');
        }

        let c = self.cursor.current_char();
        self.cursor.advance();

        if self.cursor.current_char() == '\'' {
            self.cursor.advance();
        } else {
            self.report_error("unterminated character literal".to_string());
        }

        TokenKind::Char(c)
    }
}

#[cfg(test)]
mod tests {
    use ivyc_util::{FileId, Handler, Symbol};

    use crate::token::TokenKind;
    use crate::Lexer;

    fn lex_one(source: &str) -> (TokenKind, bool) {
        let handler = Handler::new();
        let kind = Lexer::new(source, FileId::DUMMY, &handler)
            .tokenize()
            .remove(0)
            .kind;
        (kind, handler.has_errors())
    }

    #[test]
    fn simple_string() {
        let (kind, errored) = lex_one("\"hello\"");
        assert_eq!(kind, TokenKind::Str(Symbol::intern("hello")));
        assert!(!errored);
    }

    #[test]
    fn string_contents_kept_verbatim_no_escape_processing() {
        let (kind, _) = lex_one("\"a\\nb\"");
        assert_eq!(kind, TokenKind::Str(Symbol::intern("a\\nb")));
    }

    #[test]
    fn unterminated_string_reports_but_still_returns_a_token() {
        let (kind, errored) = lex_one("\"oops");
        assert_eq!(kind, TokenKind::Str(Symbol::intern("oops")));
        assert!(errored);
    }

    #[test]
    fn character_literal() {
        let (kind, errored) = lex_one("'a'");
        assert_eq!(kind, TokenKind::Char('a'));
        assert!(!errored);
    }

    #[test]
    fn unterminated_character_literal_reports() {
        let (_, errored) = lex_one("'a");
        assert!(errored);
    }
}
