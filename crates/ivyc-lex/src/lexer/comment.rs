//! Whitespace and comment skipping. Block comments do not nest.

use crate::Lexer;

impl<'a> Lexer<'a> {
    pub(crate) fn skip_whitespace_and_comments(&mut self) {
        loop {
            if self.cursor.is_at_end() {
                return;
            }
            match self.cursor.current_char() {
                ' ' | '\t' | '\r' | '\n' => self.cursor.advance(),
                '/' if self.cursor.peek_char(1) == '/' => self.skip_line_comment(),
                '/' if self.cursor.peek_char(1) == '*' => self.skip_block_comment(),
                _ => return,
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
            self.cursor.advance();
        }
    }

    fn skip_block_comment(&mut self) {
        self.cursor.advance(); // '/'
        self.cursor.advance(); // '*'
        loop {
            if self.cursor.is_at_end() {
                self.report_error("unterminated block comment".to_string());
                return;
            }
            if self.cursor.current_char() == '*' && self.cursor.peek_char(1) == '/' {
                self.cursor.advance();
                self.cursor.advance();
                return;
            }
            self.cursor.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use ivyc_util::{FileId, Handler};

    use crate::token::TokenKind;
    use crate::Lexer;

    fn first_kind(source: &str) -> TokenKind {
        let handler = Handler::new();
        Lexer::new(source, FileId::DUMMY, &handler)
            .tokenize()
            .remove(0)
            .kind
    }

    #[test]
    fn skips_line_comment() {
        assert_eq!(
            first_kind("// a comment\nhello"),
            TokenKind::Identifier(ivyc_util::Symbol::intern("hello"))
        );
    }

    #[test]
    fn skips_block_comment() {
        assert_eq!(
            first_kind("/* comment */ hello"),
            TokenKind::Identifier(ivyc_util::Symbol::intern("hello"))
        );
    }

    #[test]
    fn block_comments_do_not_nest() {
        // The first `*/` closes the comment; the trailing `*/` leaves two
        // stray characters that lex as operators, not as part of a comment.
        let handler = Handler::new();
        let toks = Lexer::new("/* outer /* inner */ outer */", FileId::DUMMY, &handler).tokenize();
        assert!(!handler.has_errors());
        assert!(toks.len() > 1, "trailing `outer */` should re-enter lexing");
    }

    #[test]
    fn unterminated_block_comment_reports_an_error() {
        let handler = Handler::new();
        Lexer::new("/* never closed", FileId::DUMMY, &handler).tokenize();
        assert!(handler.has_errors());
    }
}
