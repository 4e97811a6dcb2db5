//! Classified server response lines.

use bytes::Bytes;

use crate::parser::lexer::{Lexer, Token};
use crate::types::{Status, Tag};
use crate::{Error, Result};

/// Classification of a server response line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Untagged response (prefixed `*`).
    Untagged,
    /// Tagged response correlated to a client command.
    Tagged(Tag),
    /// Continuation request (prefixed `+`).
    Continuation,
}

/// A single server response line with a mutable read cursor.
///
/// The line is classified once at construction (untagged/tagged/continuation
/// plus an optional status condition); after that, readers walk the resp-text
/// with the cursor operations. [`reset`](Self::reset) rewinds to the start of
/// the resp-text, which is the contract scanners rely on: a line they decline
/// must re-parse byte-identically downstream.
///
/// Cloning is cheap; the raw bytes are reference-counted.
#[derive(Debug, Clone)]
pub struct ResponseLine {
    raw: Bytes,
    kind: LineKind,
    status: Option<Status>,
    /// Cursor position `reset` rewinds to (start of the resp-text).
    home: usize,
    pos: usize,
}

impl ResponseLine {
    /// Parses and classifies a raw response line.
    ///
    /// The line may or may not carry its trailing CRLF.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the line does not start with `*`, `+`, or
    /// a tag atom followed by a space.
    pub fn parse(raw: impl Into<Bytes>) -> Result<Self> {
        let raw: Bytes = raw.into();

        let (kind, status, home) = {
            let mut lexer = Lexer::new(&raw);
            match lexer.next_token()? {
                Token::Asterisk => {
                    expect_space(&mut lexer)?;
                    let (status, home) = read_optional_status(&mut lexer)?;
                    (LineKind::Untagged, status, home)
                }
                Token::Plus => {
                    if lexer.peek() == Some(b' ') {
                        lexer.advance();
                    }
                    (LineKind::Continuation, None, lexer.position())
                }
                Token::Atom(tag) => {
                    let tag = Tag::new(tag);
                    expect_space(&mut lexer)?;
                    let (status, home) = read_optional_status(&mut lexer)?;
                    (LineKind::Tagged(tag), status, home)
                }
                token => {
                    return Err(Error::Parse {
                        position: 0,
                        message: format!("Expected *, +, or tag, got {token:?}"),
                    });
                }
            }
        };

        Ok(Self {
            raw,
            kind,
            status,
            home,
            pos: home,
        })
    }

    /// Returns the line classification.
    #[must_use]
    pub fn kind(&self) -> &LineKind {
        &self.kind
    }

    /// Returns true for an untagged response.
    #[must_use]
    pub fn is_untagged(&self) -> bool {
        matches!(self.kind, LineKind::Untagged)
    }

    /// Returns true for a tagged response.
    #[must_use]
    pub fn is_tagged(&self) -> bool {
        matches!(self.kind, LineKind::Tagged(_))
    }

    /// Returns the command tag for a tagged response.
    #[must_use]
    pub fn tag(&self) -> Option<&Tag> {
        match &self.kind {
            LineKind::Tagged(tag) => Some(tag),
            _ => None,
        }
    }

    /// Returns the status condition, if the line carries one.
    #[must_use]
    pub fn status(&self) -> Option<Status> {
        self.status
    }

    /// Returns true if the line carries the OK status condition.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status.is_some_and(Status::is_ok)
    }

    /// Returns the raw bytes of the line.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// Returns the resp-text (everything after the prefix and status),
    /// without the trailing CRLF.
    #[must_use]
    pub fn text(&self) -> String {
        let mut end = self.raw.len();
        if self.raw.ends_with(b"\r\n") {
            end -= 2;
        }
        String::from_utf8_lossy(&self.raw[self.home.min(end)..end]).into_owned()
    }

    /// Rewinds the cursor to the start of the resp-text.
    pub fn reset(&mut self) {
        self.pos = self.home;
    }

    /// Skips spaces at the cursor.
    pub fn skip_spaces(&mut self) {
        let mut lexer = Lexer::new(&self.raw);
        lexer.seek(self.pos);
        lexer.skip_spaces();
        self.pos = lexer.position();
    }

    /// Reads a single byte at the cursor, or `None` at end of line.
    pub fn read_byte(&mut self) -> Option<u8> {
        let mut lexer = Lexer::new(&self.raw);
        lexer.seek(self.pos);
        let byte = lexer.advance();
        self.pos = lexer.position();
        byte
    }

    /// Reads an atom at the cursor, or `Ok(None)` if none is present.
    ///
    /// # Errors
    ///
    /// Propagates structural tokenizer failures (invalid UTF-8).
    pub fn read_atom(&mut self) -> Result<Option<String>> {
        let mut lexer = Lexer::new(&self.raw);
        lexer.seek(self.pos);
        let atom = lexer.read_atom().map(|opt| opt.map(ToString::to_string));
        self.pos = lexer.position();
        atom
    }

    /// Reads a parenthesized simple list at the cursor, or `Ok(None)` if the
    /// next byte does not open one or the list shape is malformed.
    ///
    /// # Errors
    ///
    /// Propagates structural tokenizer failures (bad literal, invalid
    /// escape) from the element reads.
    pub fn read_simple_list(&mut self) -> Result<Option<Vec<String>>> {
        let mut lexer = Lexer::new(&self.raw);
        lexer.seek(self.pos);
        let list = lexer.read_simple_list();
        self.pos = lexer.position();
        list
    }
}

/// Consumes exactly one space token.
fn expect_space(lexer: &mut Lexer<'_>) -> Result<()> {
    match lexer.next_token()? {
        Token::Space => Ok(()),
        token => Err(Error::Parse {
            position: lexer.position(),
            message: format!("Expected space, got {token:?}"),
        }),
    }
}

/// Tries to read a status keyword; rewinds on non-status payloads such as
/// `* 23 EXISTS` so the cursor home stays at the payload start.
fn read_optional_status(lexer: &mut Lexer<'_>) -> Result<(Option<Status>, usize)> {
    let mark = lexer.position();

    let status = lexer.read_atom()?.and_then(Status::parse);
    if status.is_some() {
        if lexer.peek() == Some(b' ') {
            lexer.advance();
        }
        Ok((status, lexer.position()))
    } else {
        lexer.seek(mark);
        Ok((None, mark))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone, clippy::manual_string_new, clippy::used_underscore_items, clippy::similar_names)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_ok() {
        let line = ResponseLine::parse(&b"* OK [MAILBOXID (26)] Ok\r\n"[..]).unwrap();

        assert!(line.is_untagged());
        assert!(!line.is_tagged());
        assert!(line.is_ok());
        assert_eq!(line.text(), "[MAILBOXID (26)] Ok");
    }

    #[test]
    fn test_tagged_ok() {
        let line = ResponseLine::parse(&b"A1 OK [READ-WRITE] SELECT completed\r\n"[..]).unwrap();

        assert!(line.is_tagged());
        assert_eq!(line.tag().unwrap().as_str(), "A1");
        assert_eq!(line.status(), Some(Status::Ok));
        assert_eq!(line.text(), "[READ-WRITE] SELECT completed");
    }

    #[test]
    fn test_untagged_data_line() {
        let line = ResponseLine::parse(&b"* 23 EXISTS\r\n"[..]).unwrap();

        assert!(line.is_untagged());
        assert!(!line.is_ok());
        assert_eq!(line.status(), None);
        assert_eq!(line.text(), "23 EXISTS");
    }

    #[test]
    fn test_continuation() {
        let line = ResponseLine::parse(&b"+ Ready\r\n"[..]).unwrap();

        assert_eq!(*line.kind(), LineKind::Continuation);
        assert_eq!(line.text(), "Ready");
    }

    #[test]
    fn test_preauth_is_not_ok() {
        let line = ResponseLine::parse(&b"* PREAUTH welcome\r\n"[..]).unwrap();

        assert_eq!(line.status(), Some(Status::PreAuth));
        assert!(!line.is_ok());
    }

    #[test]
    fn test_cursor_reads_and_reset() {
        let mut line = ResponseLine::parse(&b"* OK [MAILBOXID (26)] Ok\r\n"[..]).unwrap();

        assert_eq!(line.read_byte(), Some(b'['));
        assert_eq!(line.read_atom().unwrap(), Some("MAILBOXID".to_string()));
        line.skip_spaces();
        assert_eq!(
            line.read_simple_list().unwrap(),
            Some(vec!["26".to_string()])
        );
        assert_eq!(line.read_byte(), Some(b']'));

        line.reset();
        assert_eq!(line.read_byte(), Some(b'['));
    }

    #[test]
    fn test_garbage_line_rejected() {
        assert!(ResponseLine::parse(&b"(nonsense)\r\n"[..]).is_err());
    }

    #[test]
    fn test_without_crlf() {
        let line = ResponseLine::parse(&b"* OK [CLOSED] done"[..]).unwrap();

        assert!(line.is_ok());
        assert_eq!(line.text(), "[CLOSED] done");
    }
}
