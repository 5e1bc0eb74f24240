//! Character cursor over the complete input text.
//!
//! The scanner owns the read position and the 1-based line counter used in
//! every diagnostic. The line counter is bumped whenever a `\n` is consumed,
//! no matter which production consumes it.

use crate::Error;

pub(crate) struct Scanner<'a> {
    input: &'a str,
    position: usize,
    line: usize,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Scanner {
            input,
            position: 0,
            line: 1,
        }
    }

    #[inline]
    pub(crate) fn line(&self) -> usize {
        self.line
    }

    /// The unconsumed part of the input.
    #[inline]
    pub(crate) fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    #[inline]
    pub(crate) fn has_next(&self) -> bool {
        self.position < self.input.len()
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub(crate) fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
        }
        Some(ch)
    }

    /// Consumes `expected` if it is the next character.
    pub(crate) fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.next();
            true
        } else {
            false
        }
    }

    /// Consumes `expected` if the input continues with it.
    pub(crate) fn eat_str(&mut self, expected: &str) -> bool {
        if self.rest().starts_with(expected) {
            for _ in expected.chars() {
                self.next();
            }
            true
        } else {
            false
        }
    }

    /// Skips spaces, tabs and carriage returns, stopping at a newline.
    pub(crate) fn skip_blank(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t' | '\r')) {
            self.next();
        }
    }

    /// Skips a `#` comment up to, not including, the end of the line.
    pub(crate) fn skip_comment(&mut self) {
        if self.peek() != Some('#') {
            return;
        }
        while self.has_next() && self.peek() != Some('\n') {
            self.next();
        }
    }

    /// Skips whitespace and newlines, and comments if asked to, then returns
    /// the next character without consuming it.
    pub(crate) fn peek_significant(&mut self, skip_comments: bool) -> Option<char> {
        loop {
            match self.peek()? {
                ' ' | '\t' | '\r' | '\n' => {
                    self.next();
                }
                '#' if skip_comments => self.skip_comment(),
                ch => return Some(ch),
            }
        }
    }

    /// Like [`Scanner::peek_significant`], but consumes the character.
    pub(crate) fn next_significant(&mut self, skip_comments: bool) -> Option<char> {
        self.peek_significant(skip_comments)?;
        self.next()
    }

    /// Skips blanks on the current line and consumes the next character.
    ///
    /// A newline comes back as `'\n'`; `None` means end of input.
    pub(crate) fn next_significant_or_linebreak(&mut self) -> Option<char> {
        self.skip_blank();
        self.next()
    }

    pub(crate) fn error(&self, msg: impl Into<String>) -> Error {
        Error::format(self.line, msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_counting() {
        let mut scanner = Scanner::new("a\nb\r\nc");
        assert_eq!(scanner.line(), 1);
        assert_eq!(scanner.next(), Some('a'));
        assert_eq!(scanner.next(), Some('\n'));
        assert_eq!(scanner.line(), 2);
        assert_eq!(scanner.next_significant(false), Some('b'));
        assert_eq!(scanner.next_significant(false), Some('c'));
        assert_eq!(scanner.line(), 3);
        assert!(!scanner.has_next());
        assert_eq!(scanner.next(), None);
    }

    #[test]
    fn test_significant_skips_comments() {
        let mut scanner = Scanner::new("  # note\n\n  x");
        assert_eq!(scanner.peek_significant(true), Some('x'));
        assert_eq!(scanner.line(), 3);

        let mut scanner = Scanner::new("  # note\nx");
        assert_eq!(scanner.peek_significant(false), Some('#'));

        let mut scanner = Scanner::new("# trailing");
        scanner.skip_comment();
        assert!(!scanner.has_next());
    }

    #[test]
    fn test_linebreak_sentinel() {
        let mut scanner = Scanner::new(" \t\r\nz");
        assert_eq!(scanner.next_significant_or_linebreak(), Some('\n'));
        assert_eq!(scanner.next_significant_or_linebreak(), Some('z'));
        assert_eq!(scanner.next_significant_or_linebreak(), None);
    }

    #[test]
    fn test_eat_str() {
        let mut scanner = Scanner::new("\"\"\"rest");
        assert!(!scanner.eat_str("''"));
        assert!(scanner.eat_str("\"\"\""));
        assert_eq!(scanner.rest(), "rest");
        assert!(scanner.eat('r'));
        assert!(!scanner.eat('x'));
    }
}
