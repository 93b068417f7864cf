//! Core lexer implementation: dispatch over the first character of a token.

use ivyc_util::{DiagnosticBuilder, FileId, Handler, Span};

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

/// Converts Ivy source text into a token stream.
///
/// Tokenization is single-pass with at most two characters of lookahead.
/// Lex errors (unterminated literals, unrecognized characters) are reported
/// through the [`Handler`] but never halt tokenization -- the lexer always
/// produces a best-effort token and keeps going.
pub struct Lexer<'a> {
    pub(crate) cursor: Cursor<'a>,
    pub(crate) handler: &'a Handler,
    pub(crate) file_id: FileId,
    pub(crate) token_start: usize,
    pub(crate) token_start_line: u32,
    pub(crate) token_start_column: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, file_id: FileId, handler: &'a Handler) -> Self {
        Self {
            cursor: Cursor::new(source),
            handler,
            file_id,
            token_start: 0,
            token_start_line: 1,
            token_start_column: 1,
        }
    }

    /// Tokenizes the whole source, always ending in one `EndOfInput` token.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.kind == TokenKind::EndOfInput;
            tokens.push(token);
            if is_eof {
                return tokens;
            }
        }
    }

    fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();

        if self.cursor.is_at_end() {
            return self.make(TokenKind::EndOfInput);
        }

        let kind = match self.cursor.current_char() {
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            '{' => self.single(TokenKind::LBrace),
            '}' => self.single(TokenKind::RBrace),
            '[' => self.single(TokenKind::LBracket),
            ']' => self.single(TokenKind::RBracket),
            ',' => self.single(TokenKind::Comma),
            ';' => self.single(TokenKind::Semicolon),
            '~' => self.single(TokenKind::Tilde),
            '+' => self.lex_plus(),
            '-' => self.lex_minus(),
            '*' => self.lex_star(),
            '/' => self.lex_slash(),
            '%' => self.lex_percent(),
            '=' => self.lex_equals(),
            '!' => self.lex_bang(),
            '<' => self.lex_less(),
            '>' => self.lex_greater(),
            '&' => self.lex_ampersand(),
            '|' => self.lex_pipe(),
            '^' => self.lex_caret(),
            ':' => self.lex_colon(),
            '.' => self.lex_dot(),
            '"' => self.lex_string(),
            '\'' => self.lex_char(),
            c if is_ident_start(c) => self.lex_identifier(),
            c if c.is_ascii_digit() => self.lex_number(),
            c => {
                self.report_error(format!("unrecognized character '{c}'"));
                self.cursor.advance();
                TokenKind::Invalid(c)
            }
        };

        self.make(kind)
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.cursor.advance();
        kind
    }

    fn make(&self, kind: TokenKind) -> Token {
        let lexeme = self.cursor.slice_from(self.token_start).to_string();
        Token::new(kind, lexeme, self.token_start_line, self.token_start_column)
    }

    pub(crate) fn report_error(&self, message: impl Into<String>) {
        let span = Span::with_file(
            self.token_start,
            self.cursor.position(),
            self.file_id,
            self.token_start_line,
            self.token_start_column,
        );
        DiagnosticBuilder::error(message, span).emit(self.handler);
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

pub(crate) fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let handler = Handler::new();
        Lexer::new(source, FileId::DUMMY, &handler)
            .tokenize()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn tokenizes_punctuation_and_ends_with_eof() {
        assert_eq!(
            kinds("(){}[],;"),
            vec![
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::Comma,
                TokenKind::Semicolon,
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn unrecognized_character_reports_and_continues() {
        let handler = Handler::new();
        let toks = Lexer::new("a ` b", FileId::DUMMY, &handler).tokenize();
        assert!(handler.has_errors());
        assert!(toks
            .iter()
            .any(|t| matches!(t.kind, TokenKind::Invalid('`'))));
        assert!(toks.iter().any(|t| t.lexeme == "b"));
    }

    #[test]
    fn records_line_and_column_of_first_character() {
        let handler = Handler::new();
        let toks = Lexer::new("let\nx", FileId::DUMMY, &handler).tokenize();
        assert_eq!((toks[0].line, toks[0].column), (1, 1));
        assert_eq!((toks[1].line, toks[1].column), (2, 1));
    }

    #[quickcheck_macros::quickcheck]
    fn tokenizing_is_deterministic(idents: Vec<String>) -> bool {
        let source = idents
            .iter()
            .filter(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic()))
            .cloned()
            .collect::<Vec<_>>()
            .join(" ");
        let handler_a = Handler::new();
        let handler_b = Handler::new();
        let a = Lexer::new(&source, FileId::DUMMY, &handler_a).tokenize();
        let b = Lexer::new(&source, FileId::DUMMY, &handler_b).tokenize();
        a == b
    }
}
