//! IMAP lexer for tokenizing server response lines.
//!
//! This module implements a lexer for the subset of the IMAP grammar
//! (RFC 9051) that appears inside response lines: atoms, quoted strings,
//! literals, and the bracket/paren delimiters. The cursor can be saved and
//! rewound, which the response-code scanner relies on: a line whose code is
//! not recognized must be left byte-identical for the downstream parser.

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

mod token;

pub use token::Token;

use crate::{Error, Result};

/// IMAP lexer state.
pub struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Returns the current position in the input.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Moves the cursor to an absolute position, clamped to the input length.
    ///
    /// Used to roll back after a speculative read.
    pub fn seek(&mut self, pos: usize) {
        self.pos = pos.min(self.input.len());
    }

    /// Returns true if at end of input.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Peeks at the current byte without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Peeks at the byte at offset from current position.
    #[must_use]
    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    /// Advances by one byte and returns it.
    pub fn advance(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    /// Skips n bytes.
    pub fn skip(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.input.len());
    }

    /// Skips optional spaces.
    pub fn skip_spaces(&mut self) {
        while self.peek() == Some(b' ') {
            self.advance();
        }
    }

    /// Reads the next token.
    pub fn next_token(&mut self) -> Result<Token<'a>> {
        let Some(byte) = self.peek() else {
            return Ok(Token::Eof);
        };

        match byte {
            // CRLF
            b'\r' => {
                if self.peek_at(1) == Some(b'\n') {
                    self.skip(2);
                    Ok(Token::Crlf)
                } else {
                    Err(self.error("Expected LF after CR"))
                }
            }

            // Space
            b' ' => {
                self.advance();
                Ok(Token::Space)
            }

            // Special characters
            b'(' => {
                self.advance();
                Ok(Token::LParen)
            }
            b')' => {
                self.advance();
                Ok(Token::RParen)
            }
            b'[' => {
                self.advance();
                Ok(Token::LBracket)
            }
            b']' => {
                self.advance();
                Ok(Token::RBracket)
            }
            b'*' => {
                self.advance();
                Ok(Token::Asterisk)
            }
            b'+' => {
                self.advance();
                Ok(Token::Plus)
            }

            // Quoted string
            b'"' => self.read_quoted_string(),

            // Literal
            b'{' => self.read_literal(),

            // Atom
            _ if is_atom_char(byte) => {
                // read_atom only declines when the first byte is not an atom
                // char, which the guard above rules out
                match self.read_atom()? {
                    Some(s) => Ok(Token::Atom(s)),
                    None => Err(self.error("Empty atom")),
                }
            }

            // Invalid character
            _ => Err(self.error(&format!("Unexpected character: {byte:#04x}"))),
        }
    }

    /// Reads an atom, or returns `Ok(None)` if the next byte cannot start one.
    ///
    /// The non-match case leaves the cursor untouched so callers can fall
    /// through to other grammar rules.
    pub fn read_atom(&mut self) -> Result<Option<&'a str>> {
        let start = self.pos;

        while let Some(b) = self.peek() {
            if is_atom_char(b) {
                self.advance();
            } else {
                break;
            }
        }

        if self.pos == start {
            return Ok(None);
        }

        let s = std::str::from_utf8(&self.input[start..self.pos])
            .map_err(|_| self.error("Invalid UTF-8 in atom"))?;

        Ok(Some(s))
    }

    /// Reads a parenthesized list of simple tokens, e.g. `(26)` or `(a "b")`.
    ///
    /// Returns `Ok(None)` if the next byte is not `(` or the list shape is
    /// malformed (unterminated, or containing a token that is not an atom or
    /// string); the cursor is left wherever the attempt stopped, so callers
    /// that care must save and restore their own position. Errors from the
    /// underlying token reads (bad literal, invalid escape) propagate.
    pub fn read_simple_list(&mut self) -> Result<Option<Vec<String>>> {
        if self.peek() != Some(b'(') {
            return Ok(None);
        }
        self.advance();

        let mut items = Vec::new();

        loop {
            match self.next_token()? {
                Token::RParen => return Ok(Some(items)),
                Token::Space => {}
                Token::Atom(s) => items.push(s.to_string()),
                Token::QuotedString(s) => items.push(s),
                Token::Literal(data) => {
                    let s = String::from_utf8(data)
                        .map_err(|_| self.error("Invalid UTF-8 in literal"))?;
                    items.push(s);
                }
                // Eof, Crlf, or a structural token: not a simple list
                _ => return Ok(None),
            }
        }
    }

    /// Reads a quoted string token.
    fn read_quoted_string(&mut self) -> Result<Token<'a>> {
        self.advance(); // Skip opening quote

        let mut result = Vec::new();

        loop {
            match self.advance() {
                Some(b'"') => break,
                Some(b'\\') => {
                    // Escaped character
                    match self.advance() {
                        Some(b'"') => result.push(b'"'),
                        Some(b'\\') => result.push(b'\\'),
                        Some(c) => {
                            // In IMAP, only " and \ can be escaped
                            return Err(self.error(&format!("Invalid escape: \\{c}")));
                        }
                        None => return Err(self.error("Unexpected EOF in quoted string")),
                    }
                }
                Some(c) => result.push(c),
                None => return Err(self.error("Unexpected EOF in quoted string")),
            }
        }

        let s =
            String::from_utf8(result).map_err(|_| self.error("Invalid UTF-8 in quoted string"))?;

        Ok(Token::QuotedString(s))
    }

    /// Reads a literal: `{n}` or `{n+}` size prefix followed by n bytes.
    fn read_literal(&mut self) -> Result<Token<'a>> {
        self.advance(); // Skip {

        let start = self.pos;

        while let Some(b) = self.peek() {
            match b {
                b'0'..=b'9' | b'+' => {
                    self.advance();
                }
                b'}' => break,
                _ => return Err(self.error("Invalid character in literal size")),
            }
        }

        let size_str = std::str::from_utf8(&self.input[start..self.pos])
            .map_err(|_| self.error("Invalid literal size"))?;
        let size_str = size_str.trim_end_matches('+');

        let size: usize = size_str
            .parse()
            .map_err(|_| self.error("Invalid literal size number"))?;

        if self.advance() != Some(b'}') {
            return Err(self.error("Expected } after literal size"));
        }

        // CRLF separates the size prefix from the literal data
        if self.advance() != Some(b'\r') || self.advance() != Some(b'\n') {
            return Err(self.error("Expected CRLF after literal size"));
        }

        // size comes off the wire; `pos + size` could overflow on a huge
        // prefix, so compare against the remaining input instead
        if size > self.input.len() - self.pos {
            return Err(self.error("Incomplete literal data"));
        }

        let data = self.input[self.pos..self.pos + size].to_vec();
        self.skip(size);

        Ok(Token::Literal(data))
    }

    /// Creates a parse error at the current position.
    fn error(&self, message: &str) -> Error {
        Error::Parse {
            position: self.pos,
            message: message.to_string(),
        }
    }
}

/// Returns true if the byte is a valid atom character.
///
/// Note: This includes `\` to handle flags like `\Seen` as single tokens,
/// even though RFC 9051 technically defines `\` as a quoted-special.
#[must_use]
pub const fn is_atom_char(b: u8) -> bool {
    // IMAP atom chars are any CHAR except atom-specials
    // atom-specials = "(" / ")" / "{" / SP / CTL / list-wildcards / quoted-specials / resp-specials
    // list-wildcards = "%" / "*"
    // quoted-specials = DQUOTE / "\"
    // resp-specials = "]"
    //
    // Note: We include "\" to handle flags like \Seen as single tokens

    matches!(b,
        0x21..=0x27 |  // ! " # $ % & '  (but not " which is 0x22)
        0x2B..=0x5A |  // + , - . / 0-9 : ; < = > ? @ A-Z
        0x5C |         // \ (for flags like \Seen)
        0x5E..=0x7A |  // ^ _ ` a-z
        0x7C |         // |
        0x7E           // ~
    ) && b != b'"'
        && b != b'%'
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone, clippy::manual_string_new, clippy::needless_collect, clippy::used_underscore_items, clippy::similar_names)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_tokens() {
        let mut lexer = Lexer::new(b"* OK");

        assert_eq!(lexer.next_token().unwrap(), Token::Asterisk);
        assert_eq!(lexer.next_token().unwrap(), Token::Space);
        assert_eq!(lexer.next_token().unwrap(), Token::Atom("OK"));
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }

    #[test]
    fn test_tagged_response() {
        let mut lexer = Lexer::new(b"A001 OK SELECT completed\r\n");

        assert_eq!(lexer.next_token().unwrap(), Token::Atom("A001"));
        assert_eq!(lexer.next_token().unwrap(), Token::Space);
        assert_eq!(lexer.next_token().unwrap(), Token::Atom("OK"));
        assert_eq!(lexer.next_token().unwrap(), Token::Space);
        assert_eq!(lexer.next_token().unwrap(), Token::Atom("SELECT"));
        assert_eq!(lexer.next_token().unwrap(), Token::Space);
        assert_eq!(lexer.next_token().unwrap(), Token::Atom("completed"));
        assert_eq!(lexer.next_token().unwrap(), Token::Crlf);
    }

    #[test]
    fn test_brackets() {
        let mut lexer = Lexer::new(b"[MAILBOXID (26)]");

        assert_eq!(lexer.next_token().unwrap(), Token::LBracket);
        assert_eq!(lexer.next_token().unwrap(), Token::Atom("MAILBOXID"));
        assert_eq!(lexer.next_token().unwrap(), Token::Space);
        assert_eq!(lexer.next_token().unwrap(), Token::LParen);
        assert_eq!(lexer.next_token().unwrap(), Token::Atom("26"));
        assert_eq!(lexer.next_token().unwrap(), Token::RParen);
        assert_eq!(lexer.next_token().unwrap(), Token::RBracket);
    }

    #[test]
    fn test_quoted_string() {
        let mut lexer = Lexer::new(b"\"hello world\"");

        assert_eq!(
            lexer.next_token().unwrap(),
            Token::QuotedString("hello world".to_string())
        );
    }

    #[test]
    fn test_quoted_string_escaped() {
        let mut lexer = Lexer::new(b"\"hello \\\"world\\\"\"");

        assert_eq!(
            lexer.next_token().unwrap(),
            Token::QuotedString("hello \"world\"".to_string())
        );
    }

    #[test]
    fn test_literal() {
        let mut lexer = Lexer::new(b"{5}\r\nhello");

        match lexer.next_token().unwrap() {
            Token::Literal(data) => assert_eq!(data, b"hello"),
            other => panic!("Expected literal, got {other:?}"),
        }
    }

    #[test]
    fn test_literal_truncated() {
        let mut lexer = Lexer::new(b"{10}\r\nhello");

        assert!(lexer.next_token().is_err());
    }

    #[test]
    fn test_literal_size_near_usize_max() {
        // A size prefix close to usize::MAX must fail cleanly, not wrap the
        // bounds arithmetic
        let mut lexer = Lexer::new(b"{18446744073709551615}\r\nx");

        assert!(lexer.next_token().is_err());
    }

    #[test]
    fn test_literal_size_beyond_u64() {
        let mut lexer = Lexer::new(b"{99999999999999999999999}\r\nx");

        assert!(lexer.next_token().is_err());
    }

    #[test]
    fn test_read_atom_non_match() {
        let mut lexer = Lexer::new(b"(26)");

        assert_eq!(lexer.read_atom().unwrap(), None);
        assert_eq!(lexer.position(), 0);
    }

    #[test]
    fn test_read_atom_stops_at_bracket() {
        let mut lexer = Lexer::new(b"CLOSED]");

        assert_eq!(lexer.read_atom().unwrap(), Some("CLOSED"));
        assert_eq!(lexer.peek(), Some(b']'));
    }

    #[test]
    fn test_seek_rolls_back() {
        let mut lexer = Lexer::new(b"MAILBOXID (26)");

        let mark = lexer.position();
        assert_eq!(lexer.read_atom().unwrap(), Some("MAILBOXID"));
        lexer.seek(mark);
        assert_eq!(lexer.read_atom().unwrap(), Some("MAILBOXID"));
    }

    #[test]
    fn test_simple_list() {
        let mut lexer = Lexer::new(b"(26)");

        assert_eq!(
            lexer.read_simple_list().unwrap(),
            Some(vec!["26".to_string()])
        );
    }

    #[test]
    fn test_simple_list_multiple() {
        let mut lexer = Lexer::new(b"(a \"b c\" d)");

        assert_eq!(
            lexer.read_simple_list().unwrap(),
            Some(vec!["a".to_string(), "b c".to_string(), "d".to_string()])
        );
    }

    #[test]
    fn test_simple_list_empty() {
        let mut lexer = Lexer::new(b"()");

        assert_eq!(lexer.read_simple_list().unwrap(), Some(vec![]));
    }

    #[test]
    fn test_simple_list_absent() {
        let mut lexer = Lexer::new(b"26)");

        assert_eq!(lexer.read_simple_list().unwrap(), None);
        assert_eq!(lexer.position(), 0);
    }

    #[test]
    fn test_simple_list_unterminated() {
        let mut lexer = Lexer::new(b"(26");

        assert_eq!(lexer.read_simple_list().unwrap(), None);
    }

    #[test]
    fn test_simple_list_bad_literal_propagates() {
        let mut lexer = Lexer::new(b"({99}\r\nshort)");

        assert!(lexer.read_simple_list().is_err());
    }

    #[test]
    fn test_is_atom_char() {
        assert!(is_atom_char(b'A'));
        assert!(is_atom_char(b'z'));
        assert!(is_atom_char(b'0'));
        assert!(is_atom_char(b':'));
        assert!(is_atom_char(b'\\'));
        assert!(!is_atom_char(b' '));
        assert!(!is_atom_char(b'('));
        assert!(!is_atom_char(b')'));
        assert!(!is_atom_char(b']'));
        assert!(!is_atom_char(b'{'));
    }
}
