//! Character cursor for traversing source code.
//!
//! Maintains the current byte position plus 1-based line/column, and
//! handles UTF-8 multi-byte characters correctly.

pub struct Cursor<'a> {
    source: &'a str,
    position: usize,
    line: u32,
    column: u32,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Returns the character at the cursor, or `'\0'` at end of source.
    pub fn current_char(&self) -> char {
        self.char_at(0)
    }

    #[inline]
    pub fn char_at(&self, offset: usize) -> char {
        let pos = self.position + offset;
        if pos >= self.source.len() {
            return '\0';
        }
        let b = self.source.as_bytes()[pos];
        if b < 128 {
            return b as char;
        }
        self.source[pos..].chars().next().unwrap_or('\0')
    }

    #[inline]
    pub fn peek_char(&self, offset: usize) -> char {
        self.char_at(offset)
    }

    /// Advances past the current character, tracking line/column.
    #[inline]
    pub fn advance(&mut self) {
        if self.position >= self.source.len() {
            return;
        }
        let b = self.source.as_bytes()[self.position];
        if b < 128 {
            self.position += 1;
            if b == b'\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            return;
        }
        if let Some(c) = self.source[self.position..].chars().next() {
            self.position += c.len_utf8();
            self.column += 1;
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Consumes `expected` if it's the current character.
    pub fn match_char(&mut self, expected: char) -> bool {
        if self.current_char() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Slice of the source from `start` up to (not including) the cursor.
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.source[start..self.position]
    }

    pub fn remaining(&self) -> &'a str {
        &self.source[self.position..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_tracks_line_and_column() {
        let mut cursor = Cursor::new("ab\ncd");
        cursor.advance();
        cursor.advance();
        assert_eq!((cursor.line(), cursor.column()), (1, 3));
        cursor.advance();
        assert_eq!((cursor.line(), cursor.column()), (2, 1));
    }

    #[test]
    fn advance_handles_utf8() {
        let mut cursor = Cursor::new("αβ");
        assert_eq!(cursor.current_char(), 'α');
        cursor.advance();
        assert_eq!(cursor.current_char(), 'β');
    }

    #[test]
    fn match_char_consumes_on_success_only() {
        let mut cursor = Cursor::new("==");
        assert!(cursor.match_char('='));
        assert!(cursor.match_char('='));
        assert!(cursor.is_at_end());
    }

    #[test]
    fn slice_from_returns_consumed_text() {
        let mut cursor = Cursor::new("let x");
        let start = cursor.position();
        cursor.advance();
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.slice_from(start), "let");
    }
}
